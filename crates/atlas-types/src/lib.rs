//! Domain and wire types shared across atlas crates.
//!
//! Everything here mirrors the AtlasList backend's JSON contract.
//! Field names and enum spellings are external — do not rename them
//! without a backend change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role chosen at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Freelancer,
}

impl Role {
    /// Returns the wire identifier ("client" / "freelancer").
    pub fn id(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Freelancer => "freelancer",
        }
    }

    /// Returns the human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Client => "Client",
            Role::Freelancer => "Freelancer",
        }
    }

    pub fn all() -> &'static [Role] {
        &[Role::Client, Role::Freelancer]
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "client" => Ok(Role::Client),
            "freelancer" => Ok(Role::Freelancer),
            _ => Err(format!("Unknown role: {value}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Experience level attached to a job posting.
///
/// The wire spellings ("Entry Level", ...) are the backend's fixed
/// enumeration and double as the display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobLevel {
    #[serde(rename = "Entry Level")]
    EntryLevel,
    Intermediate,
    Senior,
    Expert,
}

impl JobLevel {
    pub fn label(&self) -> &'static str {
        match self {
            JobLevel::EntryLevel => "Entry Level",
            JobLevel::Intermediate => "Intermediate",
            JobLevel::Senior => "Senior",
            JobLevel::Expert => "Expert",
        }
    }

    /// Returns all levels in picker order.
    pub fn all() -> &'static [JobLevel] {
        &[
            JobLevel::EntryLevel,
            JobLevel::Intermediate,
            JobLevel::Senior,
            JobLevel::Expert,
        ]
    }
}

impl FromStr for JobLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "entry level" | "entry" | "entry-level" => Ok(JobLevel::EntryLevel),
            "intermediate" => Ok(JobLevel::Intermediate),
            "senior" => Ok(JobLevel::Senior),
            "expert" => Ok(JobLevel::Expert),
            _ => Err(format!(
                "Unknown job level: {value} (expected one of: Entry Level, Intermediate, Senior, Expert)"
            )),
        }
    }
}

impl fmt::Display for JobLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A job posting as returned by the backend.
///
/// Owned and validated server-side; this layer only renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Hourly rate in dollars.
    pub rate: f64,
    pub level: JobLevel,
    /// Username of the posting client.
    pub creator: String,
}

/// Body for `POST /jobs/jobs` (job creation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub rate: f64,
    pub level: JobLevel,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of a successful `POST /auth/login` response.
///
/// `role` is optional: older backends only return the token pair and
/// username. The tokens are opaque — never decoded client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Body for `POST /auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Body for `POST /jobs/apply`.
///
/// The applicant is derived server-side from the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyRequest {
    pub job_id: u64,
}

/// Generic `{message}` response used by signup, logout, and apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    /// Test: `JobLevel` serializes with the backend's exact spellings.
    #[test]
    fn test_job_level_wire_spelling() {
        let json = serde_json::to_string(&JobLevel::EntryLevel).unwrap();
        assert_eq!(json, r#""Entry Level""#);

        let parsed: JobLevel = serde_json::from_str(r#""Senior""#).unwrap();
        assert_eq!(parsed, JobLevel::Senior);
    }

    /// Test: `JobLevel` parsing accepts loose user input.
    #[test]
    fn test_job_level_from_str() {
        assert_eq!(JobLevel::from_str("entry level").unwrap(), JobLevel::EntryLevel);
        assert_eq!(JobLevel::from_str("Expert").unwrap(), JobLevel::Expert);
        assert!(JobLevel::from_str("guru").is_err());
    }

    /// Test: `Role` round-trips through its lowercase wire form.
    #[test]
    fn test_role_roundtrip() {
        let json = serde_json::to_string(&Role::Freelancer).unwrap();
        assert_eq!(json, r#""freelancer""#);
        let parsed: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Role::Freelancer);
    }

    /// Test: `LoginResponse` tolerates a missing role and refresh token.
    #[test]
    fn test_login_response_optional_fields() {
        let body = r#"{"access_token":"t1","username":"alice"}"#;
        let parsed: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.access_token, "t1");
        assert_eq!(parsed.username, "alice");
        assert!(parsed.refresh_token.is_none());
        assert!(parsed.role.is_none());
    }

    /// Test: `Job` deserializes the backend's listing shape.
    #[test]
    fn test_job_deserialization() {
        let body = r#"{
            "id": 7,
            "title": "Build a landing page",
            "description": "Responsive marketing page",
            "rate": 45.0,
            "level": "Intermediate",
            "creator": "bob"
        }"#;
        let job: Job = serde_json::from_str(body).unwrap();
        assert_eq!(job.id, 7);
        assert_eq!(job.level, JobLevel::Intermediate);
        assert_eq!(job.creator, "bob");
    }
}
