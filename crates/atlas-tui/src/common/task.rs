//! In-flight request bookkeeping.
//!
//! Each request kind tracks at most one active task id. Completions for any
//! other id are stale (the view was torn down or navigated away from) and
//! get dropped by the reducer.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    Signup,
    Logout,
    OpenJobs,
    AppliedJobs,
    CreatedJobs,
    JobCreate,
    JobApply,
}

/// Task lifecycle state (stored in AppState, mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, id: TaskId) {
        self.active = Some(id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub signup: TaskState,
    pub logout: TaskState,
    pub open_jobs: TaskState,
    pub applied_jobs: TaskState,
    pub created_jobs: TaskState,
    pub job_create: TaskState,
    pub job_apply: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::Signup => &mut self.signup,
            TaskKind::Logout => &mut self.logout,
            TaskKind::OpenJobs => &mut self.open_jobs,
            TaskKind::AppliedJobs => &mut self.applied_jobs,
            TaskKind::CreatedJobs => &mut self.created_jobs,
            TaskKind::JobCreate => &mut self.job_create,
            TaskKind::JobApply => &mut self.job_apply,
        }
    }
}
