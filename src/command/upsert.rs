//! The upsert sequence shared by every command.

use crate::Address;
use crate::document::{DocumentTransformer, Transform};
use crate::session::{Administration, ManagementSession};

use super::{BackendError, Command, CommandError, Step};

fn failed(address: &Address, step: Step, source: impl Into<BackendError>) -> CommandError {
    CommandError::Failed {
        address: address.clone(),
        step,
        source: source.into(),
    }
}

/// Applies `command` to a live session.
///
/// With `replace_existing` the node is removed if present and the server is
/// reloaded if it reports a pending reload, all before the add. A duplicate
/// node without `replace_existing` fails the add and is surfaced unchanged.
///
/// # Errors
///
/// Returns [`CommandError::Failed`] naming the address and the failed step.
pub async fn apply_live<C, S, A>(command: &C, session: &S, admin: &A) -> Result<(), CommandError>
where
    C: Command + ?Sized,
    S: ManagementSession,
    A: Administration,
{
    let address = command.address();

    if command.replace_existing() {
        tracing::debug!(address = %address, step = %Step::Remove, "Removing existing resource");
        let removed = session
            .remove_if_exists(&address)
            .await
            .map_err(|e| failed(&address, Step::Remove, e))?;

        tracing::debug!(
            address = %address,
            step = %Step::Reload,
            removed,
            "Checking for pending reload"
        );
        let reloaded = admin
            .reload_if_required()
            .await
            .map_err(|e| failed(&address, Step::Reload, e))?;
        if reloaded {
            tracing::warn!(address = %address, "Server reloaded to commit pending changes");
        }
    }

    let values = command.values();
    tracing::debug!(
        address = %address,
        step = %Step::Add,
        attributes = values.len(),
        "Adding resource"
    );
    session
        .add(&address, &values)
        .await
        .map_err(|e| failed(&address, Step::Add, e))?;

    tracing::info!(kind = command.kind(), address = %address, "Applied command");
    Ok(())
}

/// Applies `command` to an offline document.
///
/// # Errors
///
/// Returns [`CommandError::Unsupported`] before touching the document if the
/// command has no offline representation, and [`CommandError::Failed`] if the
/// transform fails.
pub async fn apply_offline<C, D>(command: &C, document: &D) -> Result<(), CommandError>
where
    C: Command + ?Sized,
    D: DocumentTransformer,
{
    let address = command.address();
    let transform = command.offline().ok_or_else(|| CommandError::Unsupported {
        command: command.kind(),
        address: address.clone(),
    })?;

    apply_transform(command.kind(), &address, &transform, document).await
}

pub(super) async fn apply_transform<D: DocumentTransformer>(
    kind: &'static str,
    address: &Address,
    transform: &Transform,
    document: &D,
) -> Result<(), CommandError> {
    tracing::debug!(
        address = %address,
        transform = transform.id(),
        locator = %transform.locator(),
        "Applying document transform"
    );
    document
        .apply(transform)
        .await
        .map_err(|e| failed(address, Step::Add, e))?;

    tracing::info!(kind, address = %address, "Applied command");
    Ok(())
}
