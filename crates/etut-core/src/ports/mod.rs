mod ledger_export;

pub use ledger_export::{ExportArtifact, ExportError, LedgerExporter};
