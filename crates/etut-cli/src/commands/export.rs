use std::path::PathBuf;

use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Context, Result};
use etut_adapters::{JsonLedgerExporter, MarkdownLedgerExporter};
use etut_core::{ExportArtifact, ExportError, LedgerExporter, Session};
use etut_protocol::{Request, Response};

pub async fn execute(format: String, output: Option<PathBuf>) -> Result<()> {
    let translator = super::translator();
    let client = DaemonClient::new();

    let exporter = exporter_for(&format)?;

    let sessions = match client.send(Request::GetLedger).await {
        Ok(Response::Ledger { sessions }) => sessions,
        Ok(Response::Error { message }) => bail!("{}", message),
        Ok(_) => bail!("{}", translator.get("error.unexpected_response")),
        Err(ClientError::DaemonNotRunning) => {
            super::exit_daemon_not_running(&translator);
        }
        Err(ClientError::Timeout) => bail!("{}", translator.get("error.daemon_timeout")),
        Err(error) => bail!("{}", error),
    };

    let artifact = match run_export(exporter.as_ref(), &sessions) {
        Ok(artifact) => artifact,
        Err(ExportError::EmptyLedger) => {
            println!("⚪ {}", translator.get("command.export_empty"));
            return Ok(());
        }
        Err(error) => bail!("{}", error),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &artifact.contents)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "📤 {}",
                translator.format("command.export_success", &[("path", &path.display().to_string())])
            );
        }
        None => {
            print!("{}", artifact.contents);
        }
    }

    Ok(())
}

fn exporter_for(format: &str) -> Result<Box<dyn LedgerExporter>> {
    match format.to_lowercase().as_str() {
        "markdown" | "md" => Ok(Box::new(MarkdownLedgerExporter::new())),
        "json" => Ok(Box::new(JsonLedgerExporter::new())),
        other => bail!("unknown export format: {other}. Available formats: markdown, json"),
    }
}

fn run_export(
    exporter: &dyn LedgerExporter,
    sessions: &[Session],
) -> Result<ExportArtifact, ExportError> {
    exporter.export(sessions)
}
