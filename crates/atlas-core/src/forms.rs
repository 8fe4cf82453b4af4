//! Local form validation.
//!
//! Constraints are enforced before any network call; a form that fails
//! validation never reaches the backend. Bounds mirror the backend's
//! column limits (username 25, email 80, password 8..=80).

use std::str::FromStr;

use atlas_types::{JobDraft, JobLevel, LoginRequest, Role, SignupRequest};

/// A single field-level validation failure, suitable for inline display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Signup form input, pre-validation.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<Role>,
}

impl SignupForm {
    pub const USERNAME_MAX: usize = 25;
    pub const EMAIL_MAX: usize = 80;
    pub const PASSWORD_MIN: usize = 8;
    pub const PASSWORD_MAX: usize = 80;

    /// Validates the form, returning the wire request or every field
    /// failure at once.
    pub fn validate(&self) -> Result<SignupRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let username = self.username.trim();
        if username.is_empty() || username.chars().count() > Self::USERNAME_MAX {
            errors.push(FieldError::new(
                "username",
                format!("Username is required (max {} characters)", Self::USERNAME_MAX),
            ));
        }

        let email = self.email.trim();
        if email.is_empty() || email.chars().count() > Self::EMAIL_MAX || !email.contains('@') {
            errors.push(FieldError::new(
                "email",
                format!("A valid email is required (max {} characters)", Self::EMAIL_MAX),
            ));
        }

        let password_len = self.password.chars().count();
        if password_len < Self::PASSWORD_MIN || password_len > Self::PASSWORD_MAX {
            errors.push(FieldError::new(
                "password",
                format!(
                    "Password must be {}-{} characters",
                    Self::PASSWORD_MIN,
                    Self::PASSWORD_MAX
                ),
            ));
        } else if self.confirm_password != self.password {
            errors.push(FieldError::new("confirm_password", "Passwords do not match"));
        }

        let Some(role) = self.role else {
            errors.push(FieldError::new("role", "Select a role"));
            return Err(errors);
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            role,
        })
    }
}

/// Login form input, pre-validation.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let username = self.username.trim();
        if username.is_empty() {
            errors.push(FieldError::new("username", "Username is required"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LoginRequest {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Job creation form input, pre-validation.
///
/// `rate` and `level` arrive as raw text from the UI and are parsed
/// here.
#[derive(Debug, Clone, Default)]
pub struct JobForm {
    pub title: String,
    pub description: String,
    pub rate: String,
    pub level: Option<JobLevel>,
}

impl JobForm {
    pub fn validate(&self) -> Result<JobDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new("title", "Job title is required"));
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.push(FieldError::new("description", "Job description is required"));
        }

        let rate = match f64::from_str(self.rate.trim()) {
            Ok(rate) if rate > 0.0 && rate.is_finite() => Some(rate),
            _ => {
                errors.push(FieldError::new("rate", "Rate must be a positive number"));
                None
            }
        };

        if self.level.is_none() {
            errors.push(FieldError::new("level", "Select a job level"));
        }

        match (rate, self.level) {
            (Some(rate), Some(level)) if errors.is_empty() => Ok(JobDraft {
                title: title.to_string(),
                description: description.to_string(),
                rate,
                level,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupForm {
        SignupForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret12".to_string(),
            confirm_password: "secret12".to_string(),
            role: Some(Role::Client),
        }
    }

    /// Test: a valid signup form produces the wire request.
    #[test]
    fn test_signup_valid() {
        let request = valid_signup().validate().unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.role, Role::Client);
    }

    /// Test: password bounds and confirmation mismatch are caught.
    #[test]
    fn test_signup_password_rules() {
        let mut form = valid_signup();
        form.password = "short".to_string();
        form.confirm_password = "short".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "password"));

        let mut form = valid_signup();
        form.confirm_password = "different1".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "confirm_password"));
    }

    /// Test: username and email length bounds.
    #[test]
    fn test_signup_length_bounds() {
        let mut form = valid_signup();
        form.username = "x".repeat(26);
        assert!(form.validate().is_err());

        let mut form = valid_signup();
        form.email = format!("{}@x.com", "y".repeat(80));
        assert!(form.validate().is_err());

        let mut form = valid_signup();
        form.email = "not-an-email".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "email"));
    }

    /// Test: several failures are reported together.
    #[test]
    fn test_signup_collects_all_errors() {
        let form = SignupForm {
            role: Some(Role::Client),
            ..SignupForm::default()
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"username"));
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"password"));
    }

    /// Test: login form requires both fields.
    #[test]
    fn test_login_required_fields() {
        let form = LoginForm::default();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);

        let form = LoginForm {
            username: "alice".to_string(),
            password: "secret12".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    /// Test: job form parses rate and rejects non-positive values.
    #[test]
    fn test_job_form_rate_parsing() {
        let form = JobForm {
            title: "Build a site".to_string(),
            description: "Marketing page".to_string(),
            rate: "45.5".to_string(),
            level: Some(JobLevel::Senior),
        };
        let draft = form.validate().unwrap();
        assert!((draft.rate - 45.5).abs() < f64::EPSILON);

        for bad in ["", "-3", "0", "abc"] {
            let mut form = form.clone();
            form.rate = bad.to_string();
            let errors = form.validate().unwrap_err();
            assert!(errors.iter().any(|e| e.field == "rate"), "rate {bad:?}");
        }
    }

    /// Test: missing job level is a field error.
    #[test]
    fn test_job_form_level_required() {
        let form = JobForm {
            title: "Build a site".to_string(),
            description: "Marketing page".to_string(),
            rate: "45".to_string(),
            level: None,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "level"));
    }
}
