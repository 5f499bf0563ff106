use chrono::Local;
use etut_core::{ExportArtifact, ExportError, LedgerExporter, Session, SessionKind};
use tracing::debug;

/// Renders the ledger snapshot as a markdown table with a totals footer.
#[derive(Debug, Default)]
pub struct MarkdownLedgerExporter;

impl MarkdownLedgerExporter {
    pub fn new() -> Self {
        Self
    }
}

impl LedgerExporter for MarkdownLedgerExporter {
    fn export(&self, sessions: &[Session]) -> Result<ExportArtifact, ExportError> {
        if sessions.is_empty() {
            return Err(ExportError::EmptyLedger);
        }

        let mut lines = vec![
            "# Etut".to_string(),
            String::new(),
            "| # | Tür | Ad | Başlangıç | Süre | Tamamlandı |".to_string(),
            "|---|---|---|---|---|---|".to_string(),
        ];

        let mut work_minutes = 0;
        let mut break_minutes = 0;

        for session in sessions {
            let minutes = session.net_seconds() / 60;
            match session.kind {
                SessionKind::Work => work_minutes += minutes,
                SessionKind::Break => break_minutes += minutes,
            }

            let started = session
                .started_at
                .with_timezone(&Local)
                .format("%d.%m.%Y %H:%M");
            let completed = if session.completed { "✓" } else { "—" };

            lines.push(format!(
                "| {} | {} | {} | {} | {} dk | {} |",
                session.id,
                session.kind.default_name(),
                session.name,
                started,
                minutes,
                completed
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Toplam çalışma: **{} dk** — toplam mola: **{} dk**",
            work_minutes, break_minutes
        ));
        lines.push(String::new());

        debug!(session_count = sessions.len(), "ledger rendered as markdown");

        Ok(ExportArtifact {
            file_name: "etut-gecmis.md".to_string(),
            contents: lines.join("\n"),
        })
    }

    fn format_name(&self) -> &'static str {
        "markdown"
    }
}
