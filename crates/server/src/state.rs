use std::sync::Arc;

use uhrwerk_jobs::{CronScheduler, JobRuntime};

pub struct AppState {
    pub runtime: Arc<JobRuntime>,
    pub scheduler: Arc<CronScheduler>,
}
