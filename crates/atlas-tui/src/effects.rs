//! Effects returned by the reducer and executed by the runtime.

use atlas_types::{JobDraft, LoginRequest, SignupRequest};

use crate::common::task::TaskId;

/// Side effects the reducer requests. The reducer never performs I/O
/// itself; the runtime spawns one async task per request effect and
/// feeds the completion back as a [`crate::events::UiEvent::Task`].
#[derive(Debug)]
pub enum UiEffect {
    Login {
        task: TaskId,
        request: LoginRequest,
    },
    Signup {
        task: TaskId,
        request: SignupRequest,
    },
    Logout {
        task: TaskId,
    },
    FetchOpenJobs {
        task: TaskId,
    },
    FetchAppliedJobs {
        task: TaskId,
    },
    FetchCreatedJobs {
        task: TaskId,
    },
    CreateJob {
        task: TaskId,
        draft: JobDraft,
    },
    Apply {
        task: TaskId,
        job_id: u64,
    },
    /// Remove the persisted session after the backend rejected it.
    ClearSession,
}
