use super::{PackageIdentifier, Provenance};
use std::collections::{BTreeMap, BTreeSet};

/// DependencyGraph aggregate - the packages an analyzed project depends on
///
/// Produced by a package-manager analyzer. The root is the project itself and
/// never appears among the packages, not even when the analyzer lists it as a
/// dependency of itself.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    root: PackageIdentifier,
    packages: BTreeSet<PackageIdentifier>,
    provenances: BTreeMap<PackageIdentifier, Provenance>,
}

impl DependencyGraph {
    pub fn new(root: PackageIdentifier) -> Self {
        Self {
            root,
            packages: BTreeSet::new(),
            provenances: BTreeMap::new(),
        }
    }

    pub fn add_package(&mut self, id: PackageIdentifier, provenance: Option<Provenance>) {
        if id == self.root {
            return;
        }
        if let Some(provenance) = provenance {
            self.provenances.insert(id.clone(), provenance);
        }
        self.packages.insert(id);
    }

    /// Registers both endpoints of a dependency as packages
    pub fn add_dependency(&mut self, parent: PackageIdentifier, child: PackageIdentifier) {
        for id in [parent, child] {
            if id != self.root {
                self.packages.insert(id);
            }
        }
    }

    pub fn root(&self) -> &PackageIdentifier {
        &self.root
    }

    /// All packages except the root, sorted by identifier
    pub fn packages(&self) -> impl Iterator<Item = &PackageIdentifier> {
        self.packages.iter()
    }

    pub fn provenance(&self, id: &PackageIdentifier) -> Option<&Provenance> {
        self.provenances.get(id)
    }

    pub fn total_package_count(&self) -> usize {
        self.packages.len()
    }
}
