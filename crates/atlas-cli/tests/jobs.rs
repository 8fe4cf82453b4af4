//! Job listing, posting, and application tests against a mock backend.


use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{can_bind_localhost, temp_atlas_home, write_session};
use predicates::prelude::*;
use wiremock::matchers::{bearer_token, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_job(id: u64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": "Build a thing",
        "rate": 85.5,
        "level": "Senior",
        "creator": "bob",
    })
}

#[tokio::test]
async fn jobs_list_renders_a_table() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_atlas_home();
    let server = MockServer::start().await;
    write_session(home.path(), "t1", "alice");

    Mock::given(method("GET"))
        .and(path("/jobs/jobs"))
        .and(bearer_token("t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            sample_job(1, "Rust backend"),
            sample_job(2, "TUI polish"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", home.path())
        .env("ATLAS_BASE_URL", server.uri())
        .args(["jobs", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust backend"))
        .stdout(predicate::str::contains("85.50"))
        .stdout(predicate::str::contains("Senior"));
}

#[tokio::test]
async fn jobs_create_posts_the_draft() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_atlas_home();
    let server = MockServer::start().await;
    write_session(home.path(), "t1", "carol");

    Mock::given(method("POST"))
        .and(path("/jobs/jobs"))
        .and(bearer_token("t1"))
        .and(body_json(serde_json::json!({
            "title": "Rust backend",
            "description": "Build a thing",
            "rate": 85.5,
            "level": "Senior",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_job(42, "Rust backend")))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", home.path())
        .env("ATLAS_BASE_URL", server.uri())
        .args([
            "jobs",
            "create",
            "--title",
            "Rust backend",
            "--description",
            "Build a thing",
            "--rate",
            "85.5",
            "--level",
            "senior",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Posted job #42"));
}

#[tokio::test]
async fn jobs_create_rejects_bad_rate_locally() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_atlas_home();
    let server = MockServer::start().await;
    write_session(home.path(), "t1", "carol");

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", home.path())
        .env("ATLAS_BASE_URL", server.uri())
        .args([
            "jobs",
            "create",
            "--title",
            "Rust backend",
            "--description",
            "Build a thing",
            "--rate",
            "not-a-number",
            "--level",
            "senior",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}

#[tokio::test]
async fn jobs_apply_sends_only_the_job_id() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_atlas_home();
    let server = MockServer::start().await;
    write_session(home.path(), "t1", "alice");

    Mock::given(method("POST"))
        .and(path("/jobs/apply"))
        .and(bearer_token("t1"))
        .and(body_json(serde_json::json!({"job_id": 7})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Application submitted",
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", home.path())
        .env("ATLAS_BASE_URL", server.uri())
        .args(["jobs", "apply", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Application submitted"));
}

#[tokio::test]
async fn jobs_apply_without_session_sends_nothing() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_atlas_home();
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", home.path())
        .env("ATLAS_BASE_URL", server.uri())
        .args(["jobs", "apply", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No access token found. Please log in.",
        ));
}

#[tokio::test]
async fn jobs_apply_rejection_surfaces_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_atlas_home();
    let server = MockServer::start().await;
    write_session(home.path(), "t1", "alice");

    Mock::given(method("POST"))
        .and(path("/jobs/apply"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "message": "Already applied",
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", home.path())
        .env("ATLAS_BASE_URL", server.uri())
        .args(["jobs", "apply", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already applied"));
}
