use crate::notice_generation::domain::PackageNotice;

/// Separates the notices of two packages
pub const NOTICE_SEPARATOR: &str = "\n----\n\n";

/// Separates two licenses within the notice of one package
pub const LICENSE_SEPARATOR: &str = "\n  --\n\n";

pub const HEADER_WITH_PACKAGES: &str =
    "This project contains or depends on third-party software components pursuant to the following licenses:\n";

pub const HEADER_WITHOUT_PACKAGES: &str =
    "This project neither contains or depends on any third-party software components.\n";

/// NoticeRenderer - turns package notices into the final notice text
///
/// The output only uses `\n` line endings regardless of platform, and
/// identical input always yields byte-identical output.
pub struct NoticeRenderer;

impl NoticeRenderer {
    /// Renders the complete report: the header followed by every package in the given order
    pub fn render_report(notices: &[PackageNotice]) -> String {
        let mut out = String::new();
        if notices.is_empty() {
            out.push_str(HEADER_WITHOUT_PACKAGES);
            return out;
        }

        out.push_str(HEADER_WITH_PACKAGES);
        for notice in notices {
            out.push_str(&Self::render_package(notice));
        }
        out
    }

    pub fn render_package(notice: &PackageNotice) -> String {
        let mut out = String::new();
        out.push_str(NOTICE_SEPARATOR);
        out.push_str("Package: ");
        out.push_str(&notice.id.to_display_name());
        out.push_str("\n\n");

        for file in &notice.license_files {
            out.push_str(&format!(
                "This package contains the file {} with the following contents:\n\n",
                file.path
            ));
            out.push_str(&file.content);
            out.push('\n');

            if !file.copyrights.is_empty() {
                out.push_str(
                    "The following copyright holder information relates to the license(s) above:\n",
                );
            }
            for copyright in &file.copyrights {
                out.push_str(copyright);
                out.push('\n');
            }
        }

        if !notice.licenses.is_empty() {
            out.push_str(
                "The following copyrights and licenses were found in the source code of this package:\n\n",
            );
        }

        let last = notice.licenses.len().saturating_sub(1);
        for (index, license) in notice.licenses.iter().enumerate() {
            for copyright in &license.copyrights {
                out.push_str(copyright);
                out.push('\n');
            }
            if !license.copyrights.is_empty() {
                out.push('\n');
            }

            out.push_str(&license.text);

            if index < last {
                out.push_str(LICENSE_SEPARATOR);
            }
        }

        out
    }
}
