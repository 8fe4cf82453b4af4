//! Event reducer.
//!
//! `update` folds one [`UiEvent`] into [`AppState`] and returns the
//! effects the runtime must execute. No I/O happens here, which keeps
//! every transition unit-testable.

use atlas_core::api::ApiError;
use atlas_core::auth::SIGNUP_SUCCESS_MESSAGE;
use atlas_types::Role;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::task::{TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::{TaskDone, TaskPayload, UiEvent};
use crate::route::{Access, Route, ViewPhase};
use crate::state::AppState;
use crate::views::board::BoardView;
use crate::views::create_job::CreateJobView;
use crate::views::login::LoginView;
use crate::views::signup::SignupView;
use crate::views::{board, create_job, home, login, signup};

pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Key(key) => handle_key(state, key),
        UiEvent::Task(done) => handle_task(state, done),
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return vec![];
    }
    state.status = None;
    match state.route {
        Route::Home => home::handle_key(state, key),
        Route::Login => login::handle_key(state, key),
        Route::Signup => signup::handle_key(state, key),
        Route::Board => board::handle_key(state, key),
        Route::CreateJob => create_job::handle_key(state, key),
    }
}

/// Switches routes, resetting the target view and kicking off its
/// initial fetches. Session-required routes redirect to the login form
/// when no session is stored; the request is never sent.
pub fn navigate(state: &mut AppState, route: Route) -> Vec<UiEffect> {
    if route.access() == Access::SessionRequired && state.identity.is_none() {
        state.route = Route::Login;
        state.login = LoginView::default();
        state.login.notice = Some(ApiError::Unauthenticated.to_string());
        return vec![];
    }
    state.route = route;
    match route {
        Route::Home => vec![],
        Route::Login => {
            state.login = LoginView::default();
            vec![]
        }
        Route::Signup => {
            state.signup = SignupView::default();
            vec![]
        }
        Route::Board => {
            state.board = BoardView::default();
            state.board.pending_loads = 2;
            let open = start_task(state, TaskKind::OpenJobs);
            let applied = start_task(state, TaskKind::AppliedJobs);
            vec![
                UiEffect::FetchOpenJobs { task: open },
                UiEffect::FetchAppliedJobs { task: applied },
            ]
        }
        Route::CreateJob => {
            state.create_job = CreateJobView::default();
            let task = start_task(state, TaskKind::CreatedJobs);
            vec![UiEffect::FetchCreatedJobs { task }]
        }
    }
}

/// Where a fresh login lands: freelancers on the job board, clients on
/// their posting screen, anyone without a known role on the home view.
fn landing_route(role: Option<Role>) -> Route {
    match role {
        Some(Role::Freelancer) => Route::Board,
        Some(Role::Client) => Route::CreateJob,
        None => Route::Home,
    }
}

/// Allocates a task id and records it as the active one for `kind`.
pub fn start_task(state: &mut AppState, kind: TaskKind) -> TaskId {
    let id = state.task_seq.next_id();
    state.tasks.state_mut(kind).on_started(id);
    id
}

#[derive(Clone, Copy)]
enum Gated {
    Board,
    CreateJob,
}

fn handle_task(state: &mut AppState, done: TaskDone) -> Vec<UiEffect> {
    let TaskDone { id, payload } = done;
    match payload {
        TaskPayload::LoginDone(result) => {
            if !state.tasks.login.finish_if_active(id) {
                return vec![];
            }
            state.login.submitting = false;
            match result {
                Ok(identity) => {
                    state.status = Some(format!("Logged in as {}.", identity.username));
                    let landing = landing_route(identity.role);
                    state.identity = Some(identity);
                    navigate(state, landing)
                }
                Err(err) => {
                    state.login.notice = Some(err.to_string());
                    vec![]
                }
            }
        }
        TaskPayload::SignupDone(result) => {
            if !state.tasks.signup.finish_if_active(id) {
                return vec![];
            }
            state.signup.submitting = false;
            match result {
                Ok(()) => {
                    let effects = navigate(state, Route::Login);
                    state.status = Some(SIGNUP_SUCCESS_MESSAGE.to_string());
                    state.login.notice = Some(format!("{SIGNUP_SUCCESS_MESSAGE}. Please log in."));
                    effects
                }
                Err(err) => {
                    state.signup.notice = Some(err.to_string());
                    vec![]
                }
            }
        }
        TaskPayload::LogoutDone(result) => {
            if !state.tasks.logout.finish_if_active(id) {
                return vec![];
            }
            // The session store is already handled by the lifecycle helper:
            // cleared on success and on credential rejection, kept otherwise.
            match result {
                Ok(_) => {
                    state.identity = None;
                    let effects = navigate(state, Route::Login);
                    state.status = Some("Logged out.".to_string());
                    effects
                }
                Err(err) if err.is_authorization_expired() => {
                    state.identity = None;
                    let effects = navigate(state, Route::Login);
                    state.status = Some(err.to_string());
                    effects
                }
                Err(err) => {
                    state.status = Some(format!("Logout failed: {err}"));
                    vec![]
                }
            }
        }
        TaskPayload::OpenJobs(result) => {
            if !state.tasks.open_jobs.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(jobs) => {
                    state.board.jobs = jobs;
                    finish_board_load(state);
                    vec![]
                }
                Err(err) => fail_gated(state, Gated::Board, &err),
            }
        }
        TaskPayload::AppliedJobs(result) => {
            if !state.tasks.applied_jobs.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(jobs) => {
                    state.board.applied = jobs;
                    finish_board_load(state);
                    vec![]
                }
                Err(err) => fail_gated(state, Gated::Board, &err),
            }
        }
        TaskPayload::CreatedJobs(result) => {
            if !state.tasks.created_jobs.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(jobs) => {
                    state.create_job.created = jobs;
                    if state.create_job.phase.is_loading() {
                        state.create_job.phase = ViewPhase::Ready;
                    }
                    vec![]
                }
                Err(err) => fail_gated(state, Gated::CreateJob, &err),
            }
        }
        TaskPayload::JobCreated(result) => {
            if !state.tasks.job_create.finish_if_active(id) {
                return vec![];
            }
            state.create_job.submitting = false;
            match result {
                Ok(job) => {
                    state.create_job.reset_form();
                    state.create_job.created.insert(0, job);
                    state.create_job.notice = Some("Job posted.".to_string());
                    vec![]
                }
                Err(err) if err.is_authorization_expired() => {
                    expire_session(state, Gated::CreateJob)
                }
                Err(err) => {
                    state.create_job.notice = Some(err.to_string());
                    vec![]
                }
            }
        }
        TaskPayload::Applied { job_id, result } => {
            if !state.tasks.job_apply.finish_if_active(id) {
                return vec![];
            }
            state.board.applying = None;
            match result {
                Ok(response) => {
                    record_application(state, job_id);
                    state.board.notice = Some(if response.message.is_empty() {
                        "Application submitted.".to_string()
                    } else {
                        response.message
                    });
                    vec![]
                }
                Err(err) if err.is_authorization_expired() => expire_session(state, Gated::Board),
                Err(err) => {
                    state.board.notice = Some(err.to_string());
                    vec![]
                }
            }
        }
    }
}

fn finish_board_load(state: &mut AppState) {
    state.board.pending_loads = state.board.pending_loads.saturating_sub(1);
    if state.board.pending_loads == 0 && state.board.phase.is_loading() {
        state.board.phase = ViewPhase::Ready;
    }
}

/// Settles a gated view's phase after a failed fetch. A rejected
/// credential also drops the local session and asks the runtime to
/// clear the store.
fn fail_gated(state: &mut AppState, view: Gated, err: &ApiError) -> Vec<UiEffect> {
    match err {
        ApiError::Unauthenticated => {
            set_phase(state, view, ViewPhase::ErrorNoSession);
            vec![]
        }
        ApiError::AuthorizationExpired => expire_session(state, view),
        other => {
            let phase = ViewPhase::Failed(other.to_string());
            if phase_of(state, view).is_loading() {
                set_phase(state, view, phase);
            }
            vec![]
        }
    }
}

fn expire_session(state: &mut AppState, view: Gated) -> Vec<UiEffect> {
    state.identity = None;
    set_phase(state, view, ViewPhase::ErrorExpired);
    vec![UiEffect::ClearSession]
}

fn phase_of(state: &AppState, view: Gated) -> &ViewPhase {
    match view {
        Gated::Board => &state.board.phase,
        Gated::CreateJob => &state.create_job.phase,
    }
}

fn set_phase(state: &mut AppState, view: Gated, phase: ViewPhase) {
    match view {
        Gated::Board => state.board.phase = phase,
        Gated::CreateJob => state.create_job.phase = phase,
    }
}

fn record_application(state: &mut AppState, job_id: u64) {
    if state.board.has_applied(job_id) {
        return;
    }
    if let Some(job) = state.board.jobs.iter().find(|j| j.id == job_id).cloned() {
        state.board.applied.push(job);
    }
}

#[cfg(test)]
mod tests {
    use atlas_core::session::Identity;
    use atlas_types::{Job, JobLevel, MessageResponse, Role};

    use super::*;

    fn identity() -> Identity {
        Identity {
            username: "alice".to_string(),
            role: Some(Role::Freelancer),
        }
    }

    fn job(id: u64) -> Job {
        Job {
            id,
            title: format!("job-{id}"),
            description: "desc".to_string(),
            rate: 50.0,
            level: JobLevel::Senior,
            creator: "bob".to_string(),
        }
    }

    fn task_ids(effects: &[UiEffect]) -> Vec<TaskId> {
        effects
            .iter()
            .filter_map(|e| match e {
                UiEffect::Login { task, .. }
                | UiEffect::Signup { task, .. }
                | UiEffect::Logout { task }
                | UiEffect::FetchOpenJobs { task }
                | UiEffect::FetchAppliedJobs { task }
                | UiEffect::FetchCreatedJobs { task }
                | UiEffect::CreateJob { task, .. }
                | UiEffect::Apply { task, .. } => Some(*task),
                UiEffect::ClearSession => None,
            })
            .collect()
    }

    #[test]
    fn gate_redirects_to_login_without_session() {
        let mut state = AppState::new(None);

        let effects = navigate(&mut state, Route::Board);

        assert!(effects.is_empty());
        assert_eq!(state.route, Route::Login);
        assert_eq!(
            state.login.notice.as_deref(),
            Some("No access token found. Please log in.")
        );
    }

    #[test]
    fn board_becomes_ready_after_both_fetches() {
        let mut state = AppState::new(Some(identity()));

        let effects = navigate(&mut state, Route::Board);
        let ids = task_ids(&effects);
        assert_eq!(ids.len(), 2);
        assert!(state.board.phase.is_loading());

        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id: ids[0],
                payload: TaskPayload::OpenJobs(Ok(vec![job(1)])),
            }),
        );
        assert!(state.board.phase.is_loading());

        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id: ids[1],
                payload: TaskPayload::AppliedJobs(Ok(vec![])),
            }),
        );
        assert_eq!(state.board.phase, ViewPhase::Ready);
        assert_eq!(state.board.jobs.len(), 1);
    }

    #[test]
    fn expired_credential_clears_session_and_store() {
        let mut state = AppState::new(Some(identity()));
        let effects = navigate(&mut state, Route::Board);
        let ids = task_ids(&effects);

        let effects = update(
            &mut state,
            UiEvent::Task(TaskDone {
                id: ids[0],
                payload: TaskPayload::OpenJobs(Err(ApiError::AuthorizationExpired)),
            }),
        );

        assert_eq!(state.board.phase, ViewPhase::ErrorExpired);
        assert!(state.identity.is_none());
        assert!(matches!(effects.as_slice(), [UiEffect::ClearSession]));
    }

    #[test]
    fn network_failure_surfaces_in_view_without_dropping_session() {
        let mut state = AppState::new(Some(identity()));
        let effects = navigate(&mut state, Route::Board);
        let ids = task_ids(&effects);

        let effects = update(
            &mut state,
            UiEvent::Task(TaskDone {
                id: ids[0],
                payload: TaskPayload::OpenJobs(Err(ApiError::Network("timed out".to_string()))),
            }),
        );

        assert!(effects.is_empty());
        assert!(matches!(state.board.phase, ViewPhase::Failed(_)));
        assert!(state.identity.is_some());
    }

    #[test]
    fn stale_completion_is_dropped_after_refresh() {
        let mut state = AppState::new(Some(identity()));
        let first = task_ids(&navigate(&mut state, Route::Board));
        let second = task_ids(&navigate(&mut state, Route::Board));

        // Completion from the torn-down fetch must not touch the view.
        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id: first[0],
                payload: TaskPayload::OpenJobs(Ok(vec![job(9)])),
            }),
        );
        assert!(state.board.jobs.is_empty());
        assert!(state.board.phase.is_loading());

        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id: second[0],
                payload: TaskPayload::OpenJobs(Ok(vec![job(1)])),
            }),
        );
        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id: second[1],
                payload: TaskPayload::AppliedJobs(Ok(vec![])),
            }),
        );
        assert_eq!(state.board.phase, ViewPhase::Ready);
        assert_eq!(state.board.jobs[0].id, 1);
    }

    #[test]
    fn login_success_lands_freelancer_on_the_board() {
        let mut state = AppState::new(None);
        navigate(&mut state, Route::Login);
        state.login.submitting = true;
        let id = start_task(&mut state, TaskKind::Login);

        let effects = update(
            &mut state,
            UiEvent::Task(TaskDone {
                id,
                payload: TaskPayload::LoginDone(Ok(identity())),
            }),
        );

        assert_eq!(state.route, Route::Board);
        assert_eq!(state.username(), Some("alice"));
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn login_without_a_role_lands_on_home() {
        let mut state = AppState::new(None);
        navigate(&mut state, Route::Login);
        state.login.submitting = true;
        let id = start_task(&mut state, TaskKind::Login);

        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id,
                payload: TaskPayload::LoginDone(Ok(Identity {
                    username: "alice".to_string(),
                    role: None,
                })),
            }),
        );

        assert_eq!(state.route, Route::Home);
    }

    #[test]
    fn login_failure_keeps_form_with_message() {
        let mut state = AppState::new(None);
        navigate(&mut state, Route::Login);
        state.login.submitting = true;
        let id = start_task(&mut state, TaskKind::Login);

        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id,
                payload: TaskPayload::LoginDone(Err(ApiError::RequestRejected {
                    status: 401,
                    message: "Invalid credentials".to_string(),
                })),
            }),
        );

        assert_eq!(state.route, Route::Login);
        assert!(state.identity.is_none());
        assert!(!state.login.submitting);
        assert_eq!(state.login.notice.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn signup_success_routes_to_login() {
        let mut state = AppState::new(None);
        navigate(&mut state, Route::Signup);
        state.signup.submitting = true;
        let id = start_task(&mut state, TaskKind::Signup);

        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id,
                payload: TaskPayload::SignupDone(Ok(())),
            }),
        );

        assert_eq!(state.route, Route::Login);
        assert_eq!(
            state.login.notice.as_deref(),
            Some("User created Successfully. Please log in.")
        );
    }

    #[test]
    fn applying_adds_job_to_applications() {
        let mut state = AppState::new(Some(identity()));
        let ids = task_ids(&navigate(&mut state, Route::Board));
        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id: ids[0],
                payload: TaskPayload::OpenJobs(Ok(vec![job(7)])),
            }),
        );
        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id: ids[1],
                payload: TaskPayload::AppliedJobs(Ok(vec![])),
            }),
        );

        let apply = task_ids(&board::handle_key(
            &mut state,
            KeyEvent::from(KeyCode::Enter),
        ));
        assert_eq!(state.board.applying, Some(7));

        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id: apply[0],
                payload: TaskPayload::Applied {
                    job_id: 7,
                    result: Ok(atlas_types::MessageResponse {
                        message: "Applied Successfully".to_string(),
                    }),
                },
            }),
        );
        assert!(state.board.has_applied(7));
        assert_eq!(state.board.applying, None);
        assert_eq!(state.board.notice.as_deref(), Some("Applied Successfully"));
    }

    #[test]
    fn logout_failure_leaves_identity_in_place() {
        let mut state = AppState::new(Some(identity()));
        let id = start_task(&mut state, TaskKind::Logout);

        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id,
                payload: TaskPayload::LogoutDone(Err(ApiError::RequestRejected {
                    status: 500,
                    message: "boom".to_string(),
                })),
            }),
        );

        assert!(state.identity.is_some());
    }

    #[test]
    fn logout_rejection_drops_identity() {
        let mut state = AppState::new(Some(identity()));
        let id = start_task(&mut state, TaskKind::Logout);

        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id,
                payload: TaskPayload::LogoutDone(Err(ApiError::AuthorizationExpired)),
            }),
        );

        assert!(state.identity.is_none());
        assert_eq!(state.route, Route::Login);
    }

    #[test]
    fn logout_success_returns_to_the_login_form() {
        let mut state = AppState::new(Some(identity()));
        let id = start_task(&mut state, TaskKind::Logout);

        update(
            &mut state,
            UiEvent::Task(TaskDone {
                id,
                payload: TaskPayload::LogoutDone(Ok(MessageResponse::default())),
            }),
        );

        assert!(state.identity.is_none());
        assert_eq!(state.route, Route::Login);
    }
}
