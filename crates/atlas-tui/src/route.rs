//! Route table and access gating.
//!
//! Every screen in the app is a [`Route`]. Routes that display
//! account-scoped data require a stored session; the gate in
//! [`crate::update`] redirects to [`Route::Login`] when none exists.

/// Screens the user can navigate to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Landing screen with navigation hints.
    #[default]
    Home,
    /// Username/password form.
    Login,
    /// Account creation form.
    Signup,
    /// Open jobs plus the user's applications.
    Board,
    /// Job posting form plus the user's created jobs.
    CreateJob,
}

/// Whether a route requires a stored session before it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    SessionRequired,
}

impl Route {
    #[must_use]
    pub fn access(self) -> Access {
        match self {
            Self::Home | Self::Login | Self::Signup => Access::Public,
            Self::Board | Self::CreateJob => Access::SessionRequired,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Log in",
            Self::Signup => "Sign up",
            Self::Board => "Job board",
            Self::CreateJob => "Post a job",
        }
    }
}

/// Lifecycle of a gated view's initial data fetch.
///
/// A gated view starts in `Loading` and settles in exactly one of the
/// other phases. `ErrorNoSession` means the request was never sent
/// because no credential was stored; `ErrorExpired` means the backend
/// rejected the stored credential. Any other failure lands in `Failed`
/// with a message shown inside the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Ready,
    ErrorNoSession,
    ErrorExpired,
    Failed(String),
}

impl ViewPhase {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_scoped_routes_require_session() {
        assert_eq!(Route::Board.access(), Access::SessionRequired);
        assert_eq!(Route::CreateJob.access(), Access::SessionRequired);
        assert_eq!(Route::Home.access(), Access::Public);
        assert_eq!(Route::Login.access(), Access::Public);
        assert_eq!(Route::Signup.access(), Access::Public);
    }
}
