/// Domain services - stateless algorithms over the domain model
pub mod copyright_processor;
pub mod file_matcher;
pub mod notice_renderer;

pub use copyright_processor::{CopyrightStatementsProcessor, ProcessedCopyrights};
pub use file_matcher::{license_file_patterns, FileMatcher};
pub use notice_renderer::{
    NoticeRenderer, HEADER_WITHOUT_PACKAGES, HEADER_WITH_PACKAGES, LICENSE_SEPARATOR,
    NOTICE_SEPARATOR,
};
