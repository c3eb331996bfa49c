use crate::application::dto::{NoticeRequest, NoticeResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// NoticeGenerationPort - Inbound port for the notice generation use case
///
/// This port defines the interface that driving adapters (the CLI) use to
/// render a notice. Implementations report progress on the current task and
/// are therefore not required to be `Send`.
#[async_trait(?Send)]
pub trait NoticeGenerationPort {
    /// Generates the notice for every package of the request's dependency graph
    ///
    /// # Errors
    /// Returns an error if the request is invalid. Failures of single packages
    /// are reported in the response instead.
    async fn generate_notice(&self, request: NoticeRequest) -> Result<NoticeResponse>;
}
