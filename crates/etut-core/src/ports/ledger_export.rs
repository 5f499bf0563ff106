use thiserror::Error;

use crate::domain::Session;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("nothing to export: the ledger is empty")]
    EmptyLedger,

    #[error("failed to render export: {message}")]
    Render { message: String },
}

/// A rendered, shareable snapshot of the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

/// Turns a ledger snapshot into a shareable artifact. Invoked only on user
/// request; completely decoupled from the timer's own transitions.
pub trait LedgerExporter: Send + Sync {
    fn export(&self, sessions: &[Session]) -> Result<ExportArtifact, ExportError>;

    fn format_name(&self) -> &'static str;
}
