//! Session lifecycle command handlers.

use anyhow::{Result, anyhow};
use atlas_core::api::{ApiClient, ApiError};
use atlas_core::auth::{self, SIGNUP_SUCCESS_MESSAGE};
use atlas_core::forms::{FieldError, LoginForm, SignupForm};
use atlas_core::session::SessionStore;
use atlas_types::Role;

pub async fn login(
    client: &ApiClient,
    store: &SessionStore,
    username: String,
    password: String,
) -> Result<()> {
    let form = LoginForm { username, password };
    let request = form.validate().map_err(invalid_input)?;

    let identity = auth::login(client, store, &request).await?;
    println!("Logged in as {}.", identity.username);
    Ok(())
}

pub async fn signup(
    client: &ApiClient,
    username: String,
    email: String,
    password: String,
    role: String,
) -> Result<()> {
    let role: Role = role.parse().map_err(|e: String| anyhow!(e))?;
    let form = SignupForm {
        username,
        email,
        password: password.clone(),
        confirm_password: password,
        role: Some(role),
    };
    let request = form.validate().map_err(invalid_input)?;

    auth::signup(client, &request).await?;
    println!("{SIGNUP_SUCCESS_MESSAGE}. Log in with `atlas login`.");
    Ok(())
}

pub async fn logout(client: &ApiClient, store: &SessionStore) -> Result<()> {
    match auth::logout(client, store).await {
        Ok(_) => {
            println!("Logged out.");
            Ok(())
        }
        // A rejected credential still ends the session locally.
        Err(ApiError::AuthorizationExpired) => {
            println!("Session already expired; cleared local session.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

pub fn whoami(store: &SessionStore) -> Result<()> {
    let Some(session) = store.get() else {
        anyhow::bail!("{}", ApiError::Unauthenticated);
    };
    match session.identity.role {
        Some(role) => println!("{} ({})", session.identity.username, role),
        None => println!("{}", session.identity.username),
    }
    Ok(())
}

fn invalid_input(errors: Vec<FieldError>) -> anyhow::Error {
    let details = errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");
    anyhow!("invalid input: {details}")
}
