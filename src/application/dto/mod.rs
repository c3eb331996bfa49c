/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod list_copyrights_request;
mod notice_request;
mod notice_response;
mod scan_request;

pub use list_copyrights_request::ListCopyrightsRequest;
pub use notice_request::{NoticeRequest, DEFAULT_JOBS};
pub use notice_response::NoticeResponse;
pub use scan_request::{ScanRequest, ScanResponse};
