use crate::shared::error::NoticeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a single identifier component (security limit)
const MAX_COMPONENT_LENGTH: usize = 255;

/// Placeholder used in storage paths for empty components
const UNKNOWN_PATH_COMPONENT: &str = "unknown";

/// PackageIdentifier value object - the coordinates of a package or project
///
/// Equality and ordering follow the `(type, namespace, name, version)` tuple,
/// which the derived implementations give us through field order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageIdentifier {
    package_type: String,
    namespace: String,
    name: String,
    version: String,
}

impl PackageIdentifier {
    pub fn new(
        package_type: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, NoticeError> {
        let id = Self {
            package_type: package_type.into(),
            namespace: namespace.into(),
            name: name.into(),
            version: version.into(),
        };
        id.validate()?;
        Ok(id)
    }

    fn validate(&self) -> Result<(), NoticeError> {
        let malformed = |reason: String| NoticeError::MalformedIdentifier {
            coordinates: self.to_coordinates(),
            reason,
        };

        if self.package_type.trim().is_empty() {
            return Err(malformed("type must not be empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(malformed("name must not be empty".to_string()));
        }

        for (label, value) in self.components() {
            if value.contains(':') {
                return Err(malformed(format!("{} must not contain ':'", label)));
            }
            if value.len() > MAX_COMPONENT_LENGTH {
                return Err(malformed(format!(
                    "{} is too long ({} bytes). Maximum allowed: {} bytes",
                    label,
                    value.len(),
                    MAX_COMPONENT_LENGTH
                )));
            }
            if value.chars().any(char::is_control) {
                return Err(malformed(format!("{} contains control characters", label)));
            }
        }

        Ok(())
    }

    fn components(&self) -> [(&'static str, &str); 4] {
        [
            ("type", &self.package_type),
            ("namespace", &self.namespace),
            ("name", &self.name),
            ("version", &self.version),
        ]
    }

    pub fn package_type(&self) -> &str {
        &self.package_type
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Projects (the root of a dependency graph) carry an empty version
    pub fn is_project(&self) -> bool {
        self.version.is_empty()
    }

    /// Canonical `type:namespace:name:version` coordinates.
    ///
    /// An empty namespace collapses the double separator: `npm:lodash:4.17.21`.
    pub fn to_coordinates(&self) -> String {
        if self.namespace.is_empty() {
            format!("{}:{}:{}", self.package_type, self.name, self.version)
        } else {
            format!(
                "{}:{}:{}:{}",
                self.package_type, self.namespace, self.name, self.version
            )
        }
    }

    /// Storage path form `type/namespace/name/version`.
    ///
    /// Every component is percent-encoded so it is a single safe path segment,
    /// empty components become `unknown`.
    pub fn to_path(&self) -> String {
        self.components()
            .iter()
            .map(|(_, value)| {
                if value.is_empty() {
                    UNKNOWN_PATH_COMPONENT.to_string()
                } else {
                    encode_path_component(value)
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Human readable name used in notice headers: `[namespace:]name:version`
    pub fn to_display_name(&self) -> String {
        if self.namespace.trim().is_empty() {
            format!("{}:{}", self.name, self.version)
        } else {
            format!("{}:{}:{}", self.namespace, self.name, self.version)
        }
    }
}

fn encode_path_component(value: &str) -> String {
    let encoded = urlencoding::encode(value).into_owned();
    // "." and ".." are not escaped by percent-encoding but must never be path segments
    match encoded.as_str() {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        _ => encoded,
    }
}

impl fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinates())
    }
}

impl FromStr for PackageIdentifier {
    type Err = NoticeError;

    fn from_str(coordinates: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = coordinates.split(':').collect();
        match parts.as_slice() {
            [package_type, namespace, name, version] => {
                Self::new(*package_type, *namespace, *name, *version)
            }
            [package_type, name, version] => Self::new(*package_type, "", *name, *version),
            _ => Err(NoticeError::MalformedIdentifier {
                coordinates: coordinates.to_string(),
                reason: format!(
                    "expected 3 or 4 ':'-separated components, found {}",
                    parts.len()
                ),
            }),
        }
    }
}

impl Serialize for PackageIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_coordinates())
    }
}

impl<'de> Deserialize<'de> for PackageIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let coordinates = String::deserialize(deserializer)?;
        coordinates.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nestjs() -> PackageIdentifier {
        PackageIdentifier::new("npm", "@nestjs", "platform-express", "6.2.3").unwrap()
    }

    #[test]
    fn test_coordinates_with_namespace() {
        assert_eq!(nestjs().to_coordinates(), "npm:@nestjs:platform-express:6.2.3");
    }

    #[test]
    fn test_coordinates_without_namespace_collapse_separator() {
        let id = PackageIdentifier::new("npm", "", "lodash", "4.17.21").unwrap();
        assert_eq!(id.to_coordinates(), "npm:lodash:4.17.21");
        assert_eq!(id.to_string(), "npm:lodash:4.17.21");
    }

    #[test]
    fn test_parse_four_components() {
        let id: PackageIdentifier = "npm:@nestjs:platform-express:6.2.3".parse().unwrap();
        assert_eq!(id, nestjs());
    }

    #[test]
    fn test_parse_three_components() {
        let id: PackageIdentifier = "Maven:guava:31.1".parse().unwrap();
        assert_eq!(id.package_type(), "Maven");
        assert_eq!(id.namespace(), "");
        assert_eq!(id.name(), "guava");
        assert_eq!(id.version(), "31.1");
    }

    #[test]
    fn test_parse_explicit_empty_namespace() {
        let id: PackageIdentifier = "npm::lodash:4.17.21".parse().unwrap();
        assert_eq!(id.namespace(), "");
        assert_eq!(id.to_coordinates(), "npm:lodash:4.17.21");
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["", "npm", "npm:lodash", "a:b:c:d:e", ":ns:name:1.0", "npm:ns::1.0"] {
            let result: Result<PackageIdentifier, _> = input.parse();
            assert!(
                matches!(result, Err(NoticeError::MalformedIdentifier { .. })),
                "expected '{}' to be malformed",
                input
            );
        }
    }

    #[test]
    fn test_project_has_empty_version() {
        let project: PackageIdentifier = "Go:github.com/acme:app:".parse().unwrap();
        assert!(project.is_project());
        assert!(!nestjs().is_project());
    }

    #[test]
    fn test_ordering_is_lexicographic_tuple() {
        let a = PackageIdentifier::new("npm", "", "a", "2.0.0").unwrap();
        let b = PackageIdentifier::new("npm", "", "b", "1.0.0").unwrap();
        let c = PackageIdentifier::new("npm", "@scope", "a", "1.0.0").unwrap();
        let maven = PackageIdentifier::new("Maven", "org", "z", "1").unwrap();

        let mut ids = vec![c.clone(), b.clone(), maven.clone(), a.clone()];
        ids.sort();
        assert_eq!(ids, vec![maven, a, b, c]);
    }

    #[test]
    fn test_to_path_encodes_components() {
        assert_eq!(nestjs().to_path(), "npm/%40nestjs/platform-express/6.2.3");

        let id = PackageIdentifier::new("Go", "", "golang.org/x/text", "v0.3.0").unwrap();
        assert_eq!(id.to_path(), "Go/unknown/golang.org%2Fx%2Ftext/v0.3.0");
    }

    #[test]
    fn test_to_path_escapes_dot_segments() {
        let id = PackageIdentifier::new("npm", "..", "x", ".").unwrap();
        assert_eq!(id.to_path(), "npm/%2E%2E/x/%2E");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(nestjs().to_display_name(), "@nestjs:platform-express:6.2.3");
        let id = PackageIdentifier::new("npm", "", "lodash", "4.17.21").unwrap();
        assert_eq!(id.to_display_name(), "lodash:4.17.21");
    }

    #[test]
    fn test_serde_uses_coordinates() {
        let json = serde_json::to_string(&nestjs()).unwrap();
        assert_eq!(json, "\"npm:@nestjs:platform-express:6.2.3\"");

        let back: PackageIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, nestjs());

        let bad: Result<PackageIdentifier, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
