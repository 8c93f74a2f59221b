//! Application execution logic.
//!
//! This module turns a validated configuration into one backend and runs
//! the batch (or the single attribute query) against it.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use elytron_ops::command::{Backend, BatchError, Command, Dispatcher};
use elytron_ops::config::{Query, Target, ValidatedConfig};
use elytron_ops::document::{DocumentTransformer, FileDocument};
use elytron_ops::elytron;
use elytron_ops::session::{
    Administration, HttpError, HttpManagementClient, ManagementSession, ReqwestClient,
    SessionError,
};

/// The production management client.
type LiveClient = HttpManagementClient<ReqwestClient>;

/// Upper bound for a single management request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Attributes whose values are never logged.
const REDACTED_ATTRIBUTES: &[&str] = &["credential-reference"];

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    ClientCreation(#[source] HttpError),

    /// A command of the batch failed.
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// The attribute query failed.
    #[error("Query failed: {0}")]
    Query(#[source] SessionError),
}

/// Executes the configured batch or query.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be created
/// - A command fails (the batch stops at that command)
/// - In dry-run mode against a document, a command has no offline form
/// - The query fails
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let dispatcher = Dispatcher::new(config.commands);

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - commands will be logged but not applied");
        return dry_run(&dispatcher, &config.target);
    }

    match config.target {
        Target::Live { url, headers } => {
            let client = LiveClient::new(
                ReqwestClient::with_timeout(REQUEST_TIMEOUT).map_err(RunError::ClientCreation)?,
                url,
            )
            .with_headers(headers)
            .with_reload_policy(config.reload);

            if let Some(query) = config.query {
                let value = run_query(&client, &query).await?;
                println!("{value}");
                return Ok(());
            }

            run_batch(&dispatcher, Backend::<_, FileDocument>::Live(&client)).await
        }
        Target::Offline { document } => {
            let document = FileDocument::new(document, Arc::new(elytron::offline_transforms()));
            run_batch(&dispatcher, Backend::<LiveClient, _>::Offline(&document)).await
        }
    }
}

/// Reads one attribute, returning its display form.
async fn run_query<S: ManagementSession>(session: &S, query: &Query) -> Result<String, RunError> {
    let value = session
        .query(&query.address, &query.attribute)
        .await
        .map_err(RunError::Query)?;
    Ok(value.to_string())
}

async fn run_batch<S, D>(
    dispatcher: &Dispatcher,
    backend: Backend<'_, S, D>,
) -> Result<(), RunError>
where
    S: ManagementSession + Administration,
    D: DocumentTransformer,
{
    if dispatcher.is_empty() {
        tracing::warn!("Batch contains no commands");
        return Ok(());
    }

    let kind = backend.kind();
    let applied = dispatcher.dispatch(backend).await?;
    tracing::info!(backend = kind, applied, "Batch complete");
    Ok(())
}

/// Logs every command without contacting a backend.
///
/// Against a document this still resolves each offline transform so a
/// live-only command is reported before anything is written.
fn dry_run(dispatcher: &Dispatcher, target: &Target) -> Result<(), RunError> {
    for command in dispatcher.commands() {
        tracing::info!("[dry-run] {}", describe(command.as_ref()));
    }

    if matches!(target, Target::Offline { .. }) {
        let transforms = dispatcher.offline_transforms()?;
        tracing::info!(transforms = transforms.len(), "[dry-run] Offline forms resolved");
    }

    Ok(())
}

/// One-line summary of a command for logging.
fn describe(command: &dyn Command) -> String {
    let attributes: Vec<String> = command
        .values()
        .iter()
        .map(|(name, value)| {
            if REDACTED_ATTRIBUTES.contains(&name) {
                format!("{name}=<redacted>")
            } else {
                format!("{name}={value}")
            }
        })
        .collect();
    let mode = if command.replace_existing() {
        "replace"
    } else {
        "create"
    };

    format!(
        "{} {} ({mode}) {{{}}}",
        command.kind(),
        command.address(),
        attributes.join(", ")
    )
}
