//! Job command handlers.

use anyhow::{Result, anyhow};
use atlas_core::api::{ApiClient, ApiError};
use atlas_core::auth;
use atlas_core::forms::JobForm;
use atlas_core::session::SessionStore;
use atlas_types::{Job, JobLevel};
use comfy_table::{ContentArrangement, Table};

pub async fn list(client: &ApiClient, store: &SessionStore) -> Result<()> {
    let jobs = run_authed(store, client.open_jobs()).await?;
    print_jobs(&jobs, "No open jobs right now.");
    Ok(())
}

pub async fn created(client: &ApiClient, store: &SessionStore) -> Result<()> {
    let jobs = run_authed(store, client.created_jobs()).await?;
    print_jobs(&jobs, "No jobs posted yet.");
    Ok(())
}

pub async fn applied(client: &ApiClient, store: &SessionStore) -> Result<()> {
    let jobs = run_authed(store, client.applied_jobs()).await?;
    print_jobs(&jobs, "No applications yet.");
    Ok(())
}

pub async fn create(
    client: &ApiClient,
    store: &SessionStore,
    title: String,
    description: String,
    rate: String,
    level: String,
) -> Result<()> {
    let level: JobLevel = level.parse().map_err(|e: String| anyhow!(e))?;
    let form = JobForm {
        title,
        description,
        rate,
        level: Some(level),
    };
    let draft = form.validate().map_err(|errors| {
        let details = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        anyhow!("invalid input: {details}")
    })?;

    let job = run_authed(store, client.create_job(&draft)).await?;
    println!("Posted job #{}: {}", job.id, job.title);
    Ok(())
}

pub async fn apply(client: &ApiClient, store: &SessionStore, job_id: u64) -> Result<()> {
    let response = run_authed(store, client.apply(job_id)).await?;
    if response.message.is_empty() {
        println!("Applied to job #{job_id}.");
    } else {
        println!("{}", response.message);
    }
    Ok(())
}

/// Awaits an authenticated request, dropping the stored session when the
/// backend rejects the credential.
async fn run_authed<T>(
    store: &SessionStore,
    fut: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    let result = fut.await;
    if let Err(err) = &result {
        auth::note_auth_failure(store, err);
    }
    result
}

fn print_jobs(jobs: &[Job], empty_message: &str) {
    if jobs.is_empty() {
        println!("{empty_message}");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["ID", "Title", "Rate ($/hr)", "Level", "Posted by"]);
    for job in jobs {
        table.add_row([
            job.id.to_string(),
            job.title.clone(),
            format!("{:.2}", job.rate),
            job.level.label().to_string(),
            job.creator.clone(),
        ]);
    }
    println!("{table}");
}
