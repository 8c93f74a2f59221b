//! Ordered batch execution.

use crate::document::{DocumentTransformer, Transform};
use crate::session::{Administration, ManagementSession};

use super::upsert::{apply_live, apply_transform};
use super::{BatchError, Command, CommandError};

/// The single backend a batch runs against.
///
/// A live backend provides both the structural session and the reload
/// collaborator.
#[derive(Debug)]
pub enum Backend<'a, S, D> {
    /// A running server.
    Live(&'a S),
    /// An offline configuration document.
    Offline(&'a D),
}

impl<S, D> Backend<'_, S, D> {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Live(_) => "live",
            Self::Offline(_) => "offline",
        }
    }
}

/// Applies a batch of commands strictly in order.
///
/// Later commands may depend on resources created by earlier ones, so the
/// batch is never reordered or parallelized. The first failure stops the
/// batch; commands already applied stay applied.
#[derive(Debug, Default)]
pub struct Dispatcher {
    commands: Vec<Box<dyn Command>>,
}

impl Dispatcher {
    /// Creates a dispatcher over `commands`.
    #[must_use]
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        Self { commands }
    }

    /// Appends a command to the batch.
    #[must_use]
    pub fn with(mut self, command: impl Command + 'static) -> Self {
        self.commands.push(Box::new(command));
        self
    }

    /// The commands in application order.
    #[must_use]
    pub fn commands(&self) -> &[Box<dyn Command>] {
        &self.commands
    }

    /// Number of commands in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolves the offline form of every command.
    ///
    /// # Errors
    ///
    /// Returns the first command without an offline representation.
    pub fn offline_transforms(&self) -> Result<Vec<Transform>, BatchError> {
        self.commands
            .iter()
            .enumerate()
            .map(|(index, command)| {
                command.offline().ok_or_else(|| BatchError {
                    index,
                    command: command.kind(),
                    source: CommandError::Unsupported {
                        command: command.kind(),
                        address: command.address(),
                    },
                })
            })
            .collect()
    }

    /// Runs the batch against `backend`, returning the number of commands applied.
    ///
    /// For an offline backend every command's transform is resolved before
    /// the document is touched, so a live-only command fails the batch up
    /// front.
    ///
    /// # Errors
    ///
    /// Returns the first failure together with its position in the batch.
    pub async fn dispatch<S, D>(&self, backend: Backend<'_, S, D>) -> Result<usize, BatchError>
    where
        S: ManagementSession + Administration,
        D: DocumentTransformer,
    {
        tracing::info!(backend = backend.kind(), commands = self.len(), "Applying batch");

        match backend {
            Backend::Live(session) => {
                for (index, command) in self.commands.iter().enumerate() {
                    apply_live(command.as_ref(), session, session)
                        .await
                        .map_err(|source| BatchError {
                            index,
                            command: command.kind(),
                            source,
                        })?;
                }
            }
            Backend::Offline(document) => {
                let transforms = self.offline_transforms()?;
                for (index, (command, transform)) in
                    self.commands.iter().zip(&transforms).enumerate()
                {
                    apply_transform(command.kind(), &command.address(), transform, document)
                        .await
                        .map_err(|source| BatchError {
                            index,
                            command: command.kind(),
                            source,
                        })?;
                }
            }
        }

        Ok(self.commands.len())
    }
}
