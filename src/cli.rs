use clap::builder::RangedU64ValueParser;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::notice_generation::domain::{PackageIdentifier, Provenance};
use crate::shared::error::NoticeError;

/// Cache license scan results, archive license files and render NOTICE files
#[derive(Parser, Debug)]
#[command(name = "notice-kit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Configuration file (defaults to ./notice-kit.config.yml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan the sources of a package unless a compatible result is cached
    Scan(ScanArgs),

    /// Render the notice for all dependencies of an analyzed project
    Notice(NoticeArgs),

    /// List the copyrights of a scanned package and where they were found
    ListCopyrights(ListCopyrightsArgs),
}

/// Where the scanned sources came from: a VCS checkout or a source artifact
#[derive(ClapArgs, Debug, Clone)]
pub struct ProvenanceArgs {
    /// URL of the repository the sources were checked out from
    #[arg(long, required_unless_present = "artifact_url", requires = "revision")]
    pub vcs_url: Option<String>,

    /// Revision that was requested, e.g. a tag
    #[arg(long)]
    pub revision: Option<String>,

    /// Revision the checkout resolved to (defaults to --revision)
    #[arg(long, requires = "vcs_url")]
    pub resolved_revision: Option<String>,

    /// Path inside the repository the package lives in
    #[arg(long, requires = "vcs_url")]
    pub vcs_path: Option<String>,

    /// URL of the source artifact
    #[arg(long, conflicts_with = "vcs_url", requires = "artifact_hash")]
    pub artifact_url: Option<String>,

    /// Hash of the source artifact
    #[arg(long, requires = "artifact_url")]
    pub artifact_hash: Option<String>,
}

impl ProvenanceArgs {
    pub fn to_provenance(&self) -> Result<Provenance, NoticeError> {
        match (&self.vcs_url, &self.artifact_url) {
            (Some(url), None) => {
                let revision = self.revision.clone().unwrap_or_default();
                let resolved = self
                    .resolved_revision
                    .clone()
                    .unwrap_or_else(|| revision.clone());
                Ok(Provenance::vcs(
                    url,
                    revision,
                    resolved,
                    self.vcs_path.clone().unwrap_or_default(),
                ))
            }
            (None, Some(url)) => Ok(Provenance::source_artifact(
                url,
                self.artifact_hash.clone().unwrap_or_default(),
            )),
            _ => Err(NoticeError::Validation {
                message: "exactly one of --vcs-url and --artifact-url is required".to_string(),
            }),
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct ScanArgs {
    /// Directory with the package's sources
    #[arg(short, long, value_name = "DIR")]
    pub input_path: PathBuf,

    /// Package coordinates, e.g. npm:@nestjs:platform-express:6.2.3
    #[arg(long, value_name = "ID")]
    pub package_id: PackageIdentifier,

    #[command(flatten)]
    pub provenance: ProvenanceArgs,

    /// Write the scan result as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct NoticeArgs {
    /// Analyzer result listing the project's packages and their provenances
    #[arg(short, long, value_name = "FILE")]
    pub analyzer_result: PathBuf,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of packages processed at the same time
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub jobs: Option<usize>,

    /// YAML file listing copyright statements to ignore
    #[arg(long, value_name = "FILE")]
    pub copyright_garbage: Option<PathBuf>,

    /// Directory with license texts, one file per license id.
    /// Can be specified multiple times; earlier directories win
    #[arg(long = "license-texts", value_name = "DIR")]
    pub license_texts: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ListCopyrightsArgs {
    /// Package coordinates, e.g. npm::is-windows:1.0.2
    #[arg(long, value_name = "ID")]
    pub package_id: PackageIdentifier,

    #[command(flatten)]
    pub provenance: ProvenanceArgs,

    /// Only list copyrights of this license
    #[arg(long, value_name = "LICENSE")]
    pub license_id: Option<String>,
}

impl Args {
    /// Parses the process arguments; `--help` and `--version` also come back as errors
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
