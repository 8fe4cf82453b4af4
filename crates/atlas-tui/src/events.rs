//! Events folded into the reducer.

use atlas_core::api::ApiError;
use atlas_core::session::Identity;
use atlas_types::{Job, MessageResponse};

use crate::common::task::TaskId;

/// Everything the runtime can feed into [`crate::update::update`].
#[derive(Debug)]
pub enum UiEvent {
    /// Frame tick; drives the loading spinner.
    Tick,
    Key(crossterm::event::KeyEvent),
    Task(TaskDone),
}

/// Completion of a spawned request.
#[derive(Debug)]
pub struct TaskDone {
    pub id: TaskId,
    pub payload: TaskPayload,
}

#[derive(Debug)]
pub enum TaskPayload {
    LoginDone(Result<Identity, ApiError>),
    SignupDone(Result<(), ApiError>),
    LogoutDone(Result<MessageResponse, ApiError>),
    OpenJobs(Result<Vec<Job>, ApiError>),
    AppliedJobs(Result<Vec<Job>, ApiError>),
    CreatedJobs(Result<Vec<Job>, ApiError>),
    JobCreated(Result<Job, ApiError>),
    Applied {
        job_id: u64,
        result: Result<MessageResponse, ApiError>,
    },
}
