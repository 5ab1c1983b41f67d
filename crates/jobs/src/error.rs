//! Error types for the job runtime.

use thiserror::Error;

use crate::scheduler::ScheduleError;

#[derive(Error, Debug)]
pub enum JobError {
    /// The job identifier has no handler in the registry. Registration is
    /// rejected before any state is mutated.
    #[error("unknown job id: {0}")]
    UnknownJob(String),

    /// A handler was registered twice for the same identifier. Surfaced at
    /// start-up, before the process accepts registration requests.
    #[error("handler already registered for job id: {0}")]
    DuplicateHandler(String),

    /// The scheduler rejected the add operation. The previous schedule for
    /// this id was already removed, so the job is left unscheduled.
    #[error("failed to install schedule for job '{id}': {source}")]
    ScheduleInstall {
        id: String,
        #[source]
        source: ScheduleError,
    },
}

/// Result alias for job runtime operations.
pub type Result<T> = std::result::Result<T, JobError>;
