use etut_core::{ExportArtifact, ExportError, LedgerExporter, Session};
use tracing::debug;

/// Renders the ledger snapshot as pretty-printed JSON.
#[derive(Debug, Default)]
pub struct JsonLedgerExporter;

impl JsonLedgerExporter {
    pub fn new() -> Self {
        Self
    }
}

impl LedgerExporter for JsonLedgerExporter {
    fn export(&self, sessions: &[Session]) -> Result<ExportArtifact, ExportError> {
        if sessions.is_empty() {
            return Err(ExportError::EmptyLedger);
        }

        let contents =
            serde_json::to_string_pretty(sessions).map_err(|error| ExportError::Render {
                message: error.to_string(),
            })?;

        debug!(session_count = sessions.len(), "ledger rendered as JSON");

        Ok(ExportArtifact {
            file_name: "etut-gecmis.json".to_string(),
            contents,
        })
    }

    fn format_name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use etut_core::SessionKind;

    #[test]
    fn empty_ledger_is_refused() {
        let exporter = JsonLedgerExporter::new();

        let result = exporter.export(&[]);

        assert_eq!(result, Err(ExportError::EmptyLedger));
    }

    #[test]
    fn artifact_parses_back_to_the_same_sessions() {
        let started_at = Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap();
        let mut session = Session::begin(1, SessionKind::Work, started_at);
        session.name = "Kimya".to_string();
        session.ended_at = Some(started_at + Duration::seconds(900));
        session.total_seconds = Some(900);

        let exporter = JsonLedgerExporter::new();
        let artifact = exporter.export(std::slice::from_ref(&session)).unwrap();

        assert_eq!(artifact.file_name, "etut-gecmis.json");

        let parsed: Vec<Session> = serde_json::from_str(&artifact.contents).unwrap();
        assert_eq!(parsed, vec![session]);
    }
}
