use etut_core::{ExportArtifact, ExportError, LedgerExporter, Session};

/// Exporter double that always fails, for exercising error paths.
pub struct FailingExporter {
    error: ExportError,
}

impl FailingExporter {
    pub fn render_error() -> Self {
        Self {
            error: ExportError::Render {
                message: "renderer unavailable".to_string(),
            },
        }
    }

    pub fn empty_ledger() -> Self {
        Self {
            error: ExportError::EmptyLedger,
        }
    }

    pub fn with_error(error: ExportError) -> Self {
        Self { error }
    }
}

impl LedgerExporter for FailingExporter {
    fn export(&self, _sessions: &[Session]) -> Result<ExportArtifact, ExportError> {
        Err(self.error.clone())
    }

    fn format_name(&self) -> &'static str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_render_error() {
        let exporter = FailingExporter::render_error();

        let result = exporter.export(&[]);

        assert!(matches!(result, Err(ExportError::Render { .. })));
    }

    #[test]
    fn returns_empty_ledger_error() {
        let exporter = FailingExporter::empty_ledger();

        let result = exporter.export(&[]);

        assert_eq!(result, Err(ExportError::EmptyLedger));
    }

    #[test]
    fn returns_custom_error() {
        let exporter = FailingExporter::with_error(ExportError::Render {
            message: "disk full".to_string(),
        });

        match exporter.export(&[]) {
            Err(ExportError::Render { message }) => assert_eq!(message, "disk full"),
            other => panic!("expected Render error, got {other:?}"),
        }
    }
}
