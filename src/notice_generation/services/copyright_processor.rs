use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Years outside this range are treated as part of the holder name
const MIN_YEAR: u32 = 1900;
const MAX_YEAR: u32 = 2099;

/// Ranges wider than this are kept as their two endpoints instead of being expanded
const MAX_EXPANDED_RANGE: u32 = 100;

fn prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:copyright(?:ed)?\b|copr\.|\(c\)|©)[\s:,]*")
            .expect("prefix regex is valid")
    })
}

fn rights_reserved_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)[\s.,;:]*all\s+rights\s+reserved[\s.]*$")
            .expect("rights reserved regex is valid")
    })
}

fn year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})(?:\s*[-–]\s*(\d{4}|\d{2}))?\b").expect("year regex is valid")
    })
}

/// Result of processing a set of raw copyright statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedCopyrights {
    /// Canonical statement → the raw statements merged into it
    pub processed: BTreeMap<String, BTreeSet<String>>,
    /// Raw statements that failed the structural check, unchanged
    pub unprocessed: BTreeSet<String>,
}

impl ProcessedCopyrights {
    /// Canonical statements followed by unprocessed ones, as one sorted set
    pub fn all_statements(&self) -> BTreeSet<String> {
        self.processed
            .keys()
            .chain(self.unprocessed.iter())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.processed.is_empty() && self.unprocessed.is_empty()
    }
}

/// A statement that passed the structural check
#[derive(Debug)]
struct ParsedStatement {
    years: BTreeSet<u32>,
    holder: String,
    holder_key: String,
}

#[derive(Debug, Default)]
struct Group {
    years: BTreeSet<u32>,
    holders: BTreeSet<String>,
    sources: BTreeSet<String>,
}

/// CopyrightStatementsProcessor - deduplicates and merges raw copyright statements
///
/// Statements naming the same holder (compared case- and punctuation-insensitively)
/// are merged into a single `Copyright (C) <years> <holder>` line carrying the
/// union of all years. The output only depends on the set of inputs, never on
/// their order, and processing the output again yields the same output.
pub struct CopyrightStatementsProcessor;

impl CopyrightStatementsProcessor {
    pub fn process<I, S>(statements: I) -> ProcessedCopyrights
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut groups: BTreeMap<String, Group> = BTreeMap::new();
        let mut unprocessed = BTreeSet::new();

        for raw in statements {
            let raw = raw.into();
            match Self::parse(&raw) {
                Some(parsed) => {
                    let group = groups.entry(parsed.holder_key).or_default();
                    group.years.extend(parsed.years);
                    group.holders.insert(parsed.holder);
                    group.sources.insert(raw);
                }
                None => {
                    unprocessed.insert(raw);
                }
            }
        }

        let mut processed: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for group in groups.into_values() {
            // BTreeSet iteration is sorted, so the first holder is the smallest spelling
            let Some(holder) = group.holders.iter().next() else {
                continue;
            };
            let statement = Self::render(&group.years, holder);
            processed.entry(statement).or_default().extend(group.sources);
        }

        ProcessedCopyrights {
            processed,
            unprocessed,
        }
    }

    fn parse(raw: &str) -> Option<ParsedStatement> {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

        let mut rest = collapsed.as_str();
        let mut has_prefix = false;
        while let Some(m) = prefix_regex().find(rest) {
            if m.end() == 0 {
                break;
            }
            has_prefix = true;
            rest = &rest[m.end()..];
        }
        if !has_prefix {
            return None;
        }

        let rest = rights_reserved_regex().replace(rest, "");
        let (years, holder) = Self::split_years(rest.trim());

        let holder = holder
            .trim_start_matches(|c: char| c.is_whitespace() || ",;:-–".contains(c))
            .trim_end_matches(|c: char| c.is_whitespace() || ".,;:".contains(c))
            .to_string();

        let holder_key = holder
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if holder_key.is_empty() {
            return None;
        }

        Some(ParsedStatement {
            years,
            holder,
            holder_key,
        })
    }

    /// Consumes a leading list of years and year ranges
    fn split_years(mut rest: &str) -> (BTreeSet<u32>, &str) {
        let mut years = BTreeSet::new();

        loop {
            let candidate =
                rest.trim_start_matches(|c: char| c.is_whitespace() || ",;:-–".contains(c));
            let Some(caps) = year_regex().captures(candidate) else {
                break;
            };
            let Some(start) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
                break;
            };
            if !(MIN_YEAR..=MAX_YEAR).contains(&start) {
                break;
            }

            match caps.get(2).map(|m| m.as_str()) {
                Some(end) => {
                    let end = match end.parse::<u32>() {
                        Ok(two_digits) if end.len() == 2 => start / 100 * 100 + two_digits,
                        Ok(four_digits) => four_digits,
                        Err(_) => start,
                    };
                    if end >= start && end - start <= MAX_EXPANDED_RANGE {
                        years.extend(start..=end);
                    } else {
                        years.insert(start);
                        if (MIN_YEAR..=MAX_YEAR).contains(&end) {
                            years.insert(end);
                        }
                    }
                }
                None => {
                    years.insert(start);
                }
            }

            // The match is anchored at the start, so its end is a byte offset into candidate
            let consumed = caps.get(0).map_or(0, |m| m.end());
            rest = &candidate[consumed..];
        }

        (years, rest)
    }

    fn render(years: &BTreeSet<u32>, holder: &str) -> String {
        if years.is_empty() {
            format!("Copyright (C) {}", holder)
        } else {
            format!("Copyright (C) {} {}", Self::format_years(years), holder)
        }
    }

    /// Renders consecutive runs as ranges: {2009, 2010, 2011, 2015} → "2009-2011, 2015"
    fn format_years(years: &BTreeSet<u32>) -> String {
        let mut runs: Vec<(u32, u32)> = Vec::new();
        for &year in years {
            match runs.last_mut() {
                Some((_, end)) if *end + 1 == year => *end = year,
                _ => runs.push((year, year)),
            }
        }
        runs.iter()
            .map(|&(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{}-{}", start, end)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
