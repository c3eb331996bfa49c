use crate::ports::outbound::LicenseTextProvider;
use std::collections::BTreeMap;

/// MapLicenseTextProvider adapter serving license texts from memory
#[derive(Debug, Clone, Default)]
pub struct MapLicenseTextProvider {
    texts: BTreeMap<String, String>,
}

impl MapLicenseTextProvider {
    pub fn new<I, K, V>(texts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            texts: texts
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl LicenseTextProvider for MapLicenseTextProvider {
    fn license_text(&self, license: &str) -> Option<String> {
        self.texts.get(license).cloned()
    }

    fn has_license_text(&self, license: &str) -> bool {
        self.texts.contains_key(license)
    }
}
