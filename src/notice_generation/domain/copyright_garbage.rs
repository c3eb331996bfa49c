use serde::Deserialize;
use std::collections::BTreeSet;

/// CopyrightGarbage - statements known to be bogus scanner output
///
/// Loaded from YAML (`items: [...]`). Matching is exact; the set is only ever
/// used as a filter and never changes scan results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CopyrightGarbage {
    #[serde(default)]
    items: BTreeSet<String>,
}

impl CopyrightGarbage {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, statement: &str) -> bool {
        self.items.contains(statement)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
