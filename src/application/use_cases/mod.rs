/// Use cases module containing application business logic orchestration
mod generate_notice;
mod list_copyrights;
mod scan_package;

pub use generate_notice::GenerateNoticeUseCase;
pub use list_copyrights::ListCopyrightsUseCase;
pub use scan_package::ScanPackageUseCase;
