use super::PackageIdentifier;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;

/// Provenance - where scanned source code came from
///
/// The canonical string form (`Display`) is what gets hashed into storage keys,
/// so it must stay stable across releases: changing it invalidates every cached
/// scan result and archive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// A checkout of a version control repository
    Vcs {
        url: String,
        revision: String,
        #[serde(default)]
        resolved_revision: String,
        #[serde(default)]
        path: String,
    },
    /// A downloaded source artifact (tarball, zip, source jar, ...)
    SourceArtifact { url: String, hash: String },
}

impl Provenance {
    pub fn vcs(
        url: impl Into<String>,
        revision: impl Into<String>,
        resolved_revision: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Provenance::Vcs {
            url: url.into(),
            revision: revision.into(),
            resolved_revision: resolved_revision.into(),
            path: path.into(),
        }
    }

    pub fn source_artifact(url: impl Into<String>, hash: impl Into<String>) -> Self {
        Provenance::SourceArtifact {
            url: url.into(),
            hash: hash.into(),
        }
    }

    /// Lowercase hex SHA-1 digest of the canonical string form
    pub fn storage_hash(&self) -> String {
        hex::encode(Sha1::digest(self.to_string().as_bytes()))
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Vcs {
                url,
                revision,
                resolved_revision,
                path,
            } => write!(
                f,
                "vcs:url={};revision={};resolved_revision={};path={}",
                url, revision, resolved_revision, path
            ),
            Provenance::SourceArtifact { url, hash } => {
                write!(f, "artifact:url={};hash={}", url, hash)
            }
        }
    }
}

/// The key under which everything derived from scanning `id` at `provenance` is stored
///
/// `<type>/<namespace>/<name>/<version>/<sha1 of provenance>`
pub fn storage_key(id: &PackageIdentifier, provenance: &Provenance) -> String {
    format!("{}/{}", id.to_path(), provenance.storage_hash())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git() -> Provenance {
        Provenance::vcs(
            "https://github.com/nestjs/nest.git",
            "v6.2.3",
            "0a1b2c3d",
            "packages/platform-express",
        )
    }

    #[test]
    fn test_canonical_string_vcs() {
        assert_eq!(
            git().to_string(),
            "vcs:url=https://github.com/nestjs/nest.git;revision=v6.2.3;resolved_revision=0a1b2c3d;path=packages/platform-express"
        );
    }

    #[test]
    fn test_canonical_string_artifact() {
        let artifact = Provenance::source_artifact("https://example.com/a.tgz", "sha1:abc");
        assert_eq!(
            artifact.to_string(),
            "artifact:url=https://example.com/a.tgz;hash=sha1:abc"
        );
    }

    #[test]
    fn test_storage_hash_is_sha1_of_canonical_string() {
        let provenance = Provenance::source_artifact("u", "h");
        // sha1("artifact:url=u;hash=h")
        let expected = hex::encode(Sha1::digest(b"artifact:url=u;hash=h"));
        assert_eq!(provenance.storage_hash(), expected);
        assert_eq!(provenance.storage_hash().len(), 40);
    }

    #[test]
    fn test_storage_hash_differs_between_revisions() {
        let other = Provenance::vcs(
            "https://github.com/nestjs/nest.git",
            "v6.2.4",
            "0a1b2c3d",
            "packages/platform-express",
        );
        assert_ne!(git(), other);
        assert_ne!(git().storage_hash(), other.storage_hash());
        assert_eq!(git().storage_hash(), git().storage_hash());
    }

    #[test]
    fn test_serde_tagged_representation() {
        let json = serde_json::to_value(git()).unwrap();
        assert_eq!(json["kind"], "vcs");
        assert_eq!(json["revision"], "v6.2.3");

        let parsed: Provenance = serde_json::from_str(
            r#"{"kind":"source_artifact","url":"https://x/y.tgz","hash":"abc"}"#,
        )
        .unwrap();
        assert_eq!(parsed, Provenance::source_artifact("https://x/y.tgz", "abc"));
    }

    #[test]
    fn test_vcs_optional_fields_default_to_empty() {
        let parsed: Provenance =
            serde_json::from_str(r#"{"kind":"vcs","url":"u","revision":"r"}"#).unwrap();
        assert_eq!(parsed, Provenance::vcs("u", "r", "", ""));
    }
}
