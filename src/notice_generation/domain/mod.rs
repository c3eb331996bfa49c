pub mod copyright_garbage;
pub mod dependency_graph;
pub mod findings;
pub mod identifier;
pub mod notice;
pub mod provenance;
pub mod scan_result;

pub use copyright_garbage::CopyrightGarbage;
pub use dependency_graph::DependencyGraph;
pub use findings::{
    CopyrightFinding, LicenseFinding, LicenseFindingsMap, LicenseFindingsMapExt, TextLocation,
};
pub use identifier::PackageIdentifier;
pub use notice::{LicenseFileNotice, LicenseNotice, PackageNotice};
pub use provenance::{storage_key, Provenance};
pub use scan_result::{ScanResult, ScannerDetails};
