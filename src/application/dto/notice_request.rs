use crate::notice_generation::domain::{CopyrightGarbage, DependencyGraph};

/// Default number of packages processed concurrently
pub const DEFAULT_JOBS: usize = 4;

/// NoticeRequest - render the notice for every package of a resolved project
///
/// Package provenances are taken from the dependency graph.
#[derive(Debug, Clone)]
pub struct NoticeRequest {
    pub graph: DependencyGraph,
    pub copyright_garbage: CopyrightGarbage,
    /// Maximum number of packages processed at the same time
    pub jobs: usize,
}

impl NoticeRequest {
    pub fn new(graph: DependencyGraph, copyright_garbage: CopyrightGarbage) -> Self {
        Self {
            graph,
            copyright_garbage,
            jobs: DEFAULT_JOBS,
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }
}
