//! Authenticated HTTP client for the AtlasList backend.
//!
//! One request path for every call: attach the bearer credential when
//! the endpoint requires auth, classify the outcome into `ApiError`,
//! and hand back the parsed JSON body. No retries — every call is
//! at-most-once.

use anyhow::{Context, Result};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use atlas_types::{
    ApplyRequest, Job, JobDraft, LoginRequest, LoginResponse, MessageResponse, SignupRequest,
};

use super::{ApiError, ApiResult};
use crate::config::Config;
use crate::session::SessionStore;

/// Whether an endpoint requires a stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Public,
    Bearer,
}

/// HTTP client bound to a backend base URL and a session store.
///
/// The store is read on every authenticated call; the client never
/// writes it. Session mutation belongs to the lifecycle layer.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    store: SessionStore,
}

impl ApiClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    /// Returns an error if the base URL is malformed or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &Config, store: SessionStore) -> Result<Self> {
        let base_url = config.effective_base_url()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url,
            http,
            store,
        })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Core request path shared by all endpoint wrappers.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
        auth: Auth,
    ) -> ApiResult<T> {
        // Resolve the credential before touching the network.
        let bearer = match auth {
            Auth::Public => None,
            Auth::Bearer => match self.store.get() {
                Some(session) => Some(session.credential.access),
                None => return Err(ApiError::Unauthenticated),
            },
        };

        debug!(%method, path, authenticated = bearer.is_some(), "backend request");

        let url = format!("{}{path}", self.base_url);
        let mut builder = self.http.request(method, &url);
        if let Some(token) = &bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();

        // 401 on a credentialed request means the stored session is no
        // longer valid. On public endpoints it is an ordinary rejection
        // (wrong password, say) and keeps the server's message.
        if status.as_u16() == 401 && bearer.is_some() {
            warn!(path, "backend rejected credential (401)");
            return Err(ApiError::AuthorizationExpired);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::rejected(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Network(format!("invalid response body: {e}")))
    }

    /// `POST /auth/signup`
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<MessageResponse> {
        self.request(Method::POST, "/auth/signup", Some(request), Auth::Public)
            .await
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.request(Method::POST, "/auth/login", Some(request), Auth::Public)
            .await
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> ApiResult<MessageResponse> {
        self.request::<MessageResponse>(Method::POST, "/auth/logout", None::<&()>, Auth::Bearer)
            .await
    }

    /// `GET /jobs/jobs` — open jobs visible to freelancers.
    pub async fn open_jobs(&self) -> ApiResult<Vec<Job>> {
        self.request(Method::GET, "/jobs/jobs", None::<&()>, Auth::Bearer)
            .await
    }

    /// `GET /jobs/created-jobs` — jobs created by the caller.
    pub async fn created_jobs(&self) -> ApiResult<Vec<Job>> {
        self.request(Method::GET, "/jobs/created-jobs", None::<&()>, Auth::Bearer)
            .await
    }

    /// `GET /jobs/applied-jobs` — jobs the caller has applied to.
    pub async fn applied_jobs(&self) -> ApiResult<Vec<Job>> {
        self.request(Method::GET, "/jobs/applied-jobs", None::<&()>, Auth::Bearer)
            .await
    }

    /// `POST /jobs/jobs` — create a job posting.
    pub async fn create_job(&self, draft: &JobDraft) -> ApiResult<Job> {
        self.request(Method::POST, "/jobs/jobs", Some(draft), Auth::Bearer)
            .await
    }

    /// `POST /jobs/apply` — apply to a job.
    pub async fn apply(&self, job_id: u64) -> ApiResult<MessageResponse> {
        let request = ApplyRequest { job_id };
        self.request(Method::POST, "/jobs/apply", Some(&request), Auth::Bearer)
            .await
    }
}
