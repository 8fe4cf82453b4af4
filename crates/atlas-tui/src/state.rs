//! Application state. Mutated only by the reducer in [`crate::update`].

use atlas_core::session::Identity;

use crate::common::task::{TaskSeq, Tasks};
use crate::route::Route;
use crate::views::board::BoardView;
use crate::views::create_job::CreateJobView;
use crate::views::login::LoginView;
use crate::views::signup::SignupView;

#[derive(Debug, Default)]
pub struct AppState {
    pub should_quit: bool,
    pub route: Route,
    /// Snapshot of the persisted session's identity. Kept in sync by the
    /// reducer: set on login, cleared on logout and on credential rejection.
    pub identity: Option<Identity>,
    /// Flash message shown in the footer until the next keypress.
    pub status: Option<String>,
    pub spinner_frame: usize,

    pub task_seq: TaskSeq,
    pub tasks: Tasks,

    pub login: LoginView,
    pub signup: SignupView,
    pub board: BoardView,
    pub create_job: CreateJobView,
}

impl AppState {
    #[must_use]
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            identity,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref().map(|id| id.username.as_str())
    }

    /// True while any request is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        let t = &self.tasks;
        t.login.is_running()
            || t.signup.is_running()
            || t.logout.is_running()
            || t.open_jobs.is_running()
            || t.applied_jobs.is_running()
            || t.created_jobs.is_running()
            || t.job_create.is_running()
            || t.job_apply.is_running()
    }
}
