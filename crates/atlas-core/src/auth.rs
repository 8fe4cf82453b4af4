//! Session lifecycle: signup, login, logout, and forced expiry.
//!
//! This is the only module that writes the session store. Views and
//! the API client read it; every identity-changing transition funnels
//! through here so client and server session state cannot diverge
//! silently.

use tracing::info;

use atlas_types::{LoginRequest, MessageResponse, SignupRequest};

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::session::{Credential, Identity, Session, SessionStore, mask_token};

/// Exact success sentinel returned by `POST /auth/signup`.
///
/// External contract: the backend signals success through message
/// equality, not just the status code.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "User created Successfully";

/// Fallback shown when the backend rejects a signup without a message.
const SIGNUP_FALLBACK_MESSAGE: &str = "Something went wrong!";

/// Submits a signup request.
///
/// Success iff the response message equals [`SIGNUP_SUCCESS_MESSAGE`].
/// Signup never establishes a session; the user logs in separately.
pub async fn signup(client: &ApiClient, request: &SignupRequest) -> ApiResult<()> {
    let response = client.signup(request).await?;

    if response.message == SIGNUP_SUCCESS_MESSAGE {
        info!(username = %request.username, role = %request.role, "signup accepted");
        return Ok(());
    }

    let message = if response.message.is_empty() {
        SIGNUP_FALLBACK_MESSAGE.to_string()
    } else {
        response.message
    };
    Err(ApiError::RequestRejected {
        status: 200,
        message,
    })
}

/// Logs in and persists the returned session.
pub async fn login(
    client: &ApiClient,
    store: &SessionStore,
    request: &LoginRequest,
) -> ApiResult<Identity> {
    let response = client.login(request).await?;

    let session = Session {
        credential: Credential {
            access: response.access_token,
            refresh: response.refresh_token,
        },
        identity: Identity {
            username: response.username,
            role: response.role,
        },
    };
    store
        .set(&session)
        .map_err(|e| ApiError::Network(format!("failed to persist session: {e}")))?;

    info!(
        username = %session.identity.username,
        token = %mask_token(&session.credential.access),
        "session established"
    );
    Ok(session.identity)
}

/// Logs out against the backend.
///
/// Policy: a success response clears the store; any other rejection
/// leaves the store untouched so client state never silently diverges
/// from the server. The one override is a 401 — that is not a failed
/// logout but proof the session is already invalid server-side, so the
/// store is cleared anyway.
pub async fn logout(client: &ApiClient, store: &SessionStore) -> ApiResult<MessageResponse> {
    match client.logout().await {
        Ok(response) => {
            store
                .clear()
                .map_err(|e| ApiError::Network(format!("failed to clear session: {e}")))?;
            info!("session ended");
            Ok(response)
        }
        Err(err) => {
            note_auth_failure(store, &err);
            Err(err)
        }
    }
}

/// Reacts to an authorization failure from any authenticated call.
///
/// Clears the store when the error is `AuthorizationExpired`; returns
/// whether the session was invalidated. Callers then redirect to the
/// login view.
pub fn note_auth_failure(store: &SessionStore, err: &ApiError) -> bool {
    if !err.is_authorization_expired() {
        return false;
    }
    if let Err(e) = store.clear() {
        tracing::warn!("failed to clear expired session: {e:#}");
    }
    true
}
