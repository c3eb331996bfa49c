use crate::shared::error::NoticeError;
use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;

/// Base names of files that typically carry license information
const LICENSE_FILE_BASE_PATTERNS: &[&str] = &[
    "copying*",
    "copyright",
    "licence*",
    "license*",
    "*.licence",
    "*.license",
    "patents",
    "readme*",
    "unlicence",
    "unlicense",
];

/// The default license file patterns in lower, upper and capitalized case
pub fn license_file_patterns() -> Vec<String> {
    let mut patterns = Vec::new();
    for base in LICENSE_FILE_BASE_PATTERNS {
        let variants = [base.to_string(), base.to_uppercase(), capitalize(base)];
        for variant in variants {
            if !patterns.contains(&variant) {
                patterns.push(variant);
            }
        }
    }
    patterns
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    matcher: GlobMatcher,
    basename_only: bool,
}

/// FileMatcher - decides whether a relative path is matched by any of a set of globs
///
/// `*` and `?` never cross a `/`, `**` does. Matching is case-sensitive and
/// anchored to the whole relative path, except for patterns without a `/`,
/// which are matched against the file name only.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    patterns: Vec<String>,
    compiled: Vec<CompiledPattern>,
}

impl FileMatcher {
    pub fn new<I, S>(patterns: I) -> Result<Self, NoticeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let compiled = patterns
            .iter()
            .map(|pattern| {
                let glob = GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .build()
                    .map_err(|e| NoticeError::Configuration {
                        message: format!("invalid glob pattern '{}': {}", pattern, e),
                        hint: "Patterns support '*', '**', '?' and character classes like '[abc]'"
                            .to_string(),
                    })?;
                Ok(CompiledPattern {
                    matcher: glob.compile_matcher(),
                    basename_only: !pattern.contains('/'),
                })
            })
            .collect::<Result<Vec<_>, NoticeError>>()?;

        Ok(Self { patterns, compiled })
    }

    /// A matcher for the default license file names
    pub fn license_file_matcher() -> Self {
        Self::new(license_file_patterns()).expect("built-in license file patterns are valid")
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true if and only if `path` is matched by any pattern.
    ///
    /// Paths with characters no file system accepts never match.
    pub fn matches(&self, path: &str) -> bool {
        if path.is_empty() || path.chars().any(char::is_control) {
            return false;
        }

        let normalized = path.replace('\\', "/");
        let normalized = normalized.trim_start_matches("./");
        let basename = normalized.rsplit('/').next().unwrap_or(normalized);

        self.compiled.iter().any(|p| {
            if p.basename_only {
                p.matcher.is_match(Path::new(basename))
            } else {
                p.matcher.is_match(Path::new(normalized))
            }
        })
    }
}
