use crate::notice_generation::domain::ScannerDetails;
use std::cmp::Ordering;
use std::fmt;

/// ScannerVersion - a dotted version compared component by component
///
/// Components are compared numerically where both sides are numbers and
/// lexically otherwise; missing trailing components count as zero, so
/// `3.0` equals `3.0.0`. Pre-release suffixes after `-` or `+` are ignored.
#[derive(Debug, Clone)]
pub struct ScannerVersion {
    raw: String,
    components: Vec<String>,
}

impl ScannerVersion {
    pub fn parse(version: &str) -> Self {
        let core = version
            .trim()
            .trim_start_matches(['v', 'V'])
            .split(['-', '+'])
            .next()
            .unwrap_or_default();
        let components = core
            .split('.')
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            raw: version.to_string(),
            components,
        }
    }

    /// The smallest version of the next minor release: `3.0.2` → `3.1.0`
    pub fn next_minor(&self) -> Self {
        let major = self.numeric(0).unwrap_or(0);
        let minor = self.numeric(1).unwrap_or(0);
        Self::parse(&format!("{}.{}.0", major, minor + 1))
    }

    fn numeric(&self, index: usize) -> Option<u64> {
        self.components.get(index).and_then(|c| c.parse().ok())
    }
}

impl fmt::Display for ScannerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for ScannerVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScannerVersion {}

impl PartialOrd for ScannerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScannerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).map_or("0", String::as_str);
            let b = other.components.get(i).map_or("0", String::as_str);
            let ordering = match (a.parse::<u64>(), b.parse::<u64>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => a.cmp(b),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// ScannerCriteria policy - which cached results are compatible with a scanner
///
/// A cached result is usable when it was produced by a scanner with the same
/// name whose version lies in `[min_version, max_version)`.
#[derive(Debug, Clone)]
pub struct ScannerCriteria {
    name: Option<String>,
    min_version: Option<ScannerVersion>,
    max_version: Option<ScannerVersion>,
}

impl ScannerCriteria {
    pub fn new(
        name: impl Into<String>,
        min_version: ScannerVersion,
        max_version: Option<ScannerVersion>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            min_version: Some(min_version),
            max_version,
        }
    }

    /// Matches results of any scanner
    pub fn any() -> Self {
        Self {
            name: None,
            min_version: None,
            max_version: None,
        }
    }

    /// Matches only results of exactly this scanner name and version
    pub fn exact(details: &ScannerDetails) -> Self {
        let version = ScannerVersion::parse(&details.version);
        let mut upper = version.components.clone();
        // The exclusive bound is the version with an extra, smallest-possible increment
        upper.push("1".to_string());
        Self::new(
            details.name.clone(),
            version,
            Some(ScannerVersion {
                raw: format!("{}.1", details.version),
                components: upper,
            }),
        )
    }

    /// Same scanner name, version at least the given one and below the next minor release
    pub fn for_details(details: &ScannerDetails) -> Self {
        let min_version = ScannerVersion::parse(&details.version);
        let max_version = min_version.next_minor();
        Self::new(details.name.clone(), min_version, Some(max_version))
    }

    pub fn matches(&self, details: &ScannerDetails) -> bool {
        if let Some(name) = &self.name {
            if !name.eq_ignore_ascii_case(&details.name) {
                return false;
            }
        }

        let version = ScannerVersion::parse(&details.version);
        if let Some(min) = &self.min_version {
            if version < *min {
                return false;
            }
        }
        if let Some(max) = &self.max_version {
            if version >= *max {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for ScannerCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.min_version, &self.max_version) {
            (None, _, _) => write!(f, "any scanner"),
            (Some(name), Some(min), Some(max)) => write!(f, "{} [{}, {})", name, min, max),
            (Some(name), Some(min), None) => write!(f, "{} >= {}", name, min),
            (Some(name), None, _) => write!(f, "{}", name),
        }
    }
}
