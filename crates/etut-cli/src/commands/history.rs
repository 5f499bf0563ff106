use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Result};
use chrono::Local;
use etut_protocol::{Request, Response, Session, SessionKind};

pub async fn execute() -> Result<()> {
    let translator = super::translator();
    let client = DaemonClient::new();

    match client.send(Request::GetLedger).await {
        Ok(Response::Ledger { sessions }) => {
            if sessions.is_empty() {
                println!("⚪ {}", translator.get("command.history_empty"));
                return Ok(());
            }

            for session in &sessions {
                println!("{}", format_entry(session));
            }
        }
        Ok(Response::Error { message }) => {
            bail!("{}", message);
        }
        Ok(_) => {
            bail!("{}", translator.get("error.unexpected_response"));
        }
        Err(ClientError::DaemonNotRunning) => {
            super::exit_daemon_not_running(&translator);
        }
        Err(ClientError::Timeout) => {
            bail!("{}", translator.get("error.daemon_timeout"));
        }
        Err(error) => {
            bail!("{}", error);
        }
    }

    Ok(())
}

fn format_entry(session: &Session) -> String {
    let symbol = match session.kind {
        SessionKind::Work => "📖",
        SessionKind::Break => "☕",
    };
    let started = session
        .started_at
        .with_timezone(&Local)
        .format("%d.%m.%Y %H:%M");
    let minutes = session.net_seconds() / 60;
    let completed_mark = if session.completed { " ✓" } else { "" };

    format!(
        "{:>4}  {}  {} {} — {} dk{}",
        session.id, started, symbol, session.name, minutes, completed_mark
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn entry_shows_name_minutes_and_completion() {
        let started_at = Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap();
        let mut session = Session::begin(7, SessionKind::Work, started_at);
        session.name = "Matematik".to_string();
        session.ended_at = Some(started_at + Duration::seconds(1800));
        session.total_seconds = Some(1800);
        session.completed = true;

        let line = format_entry(&session);

        assert!(line.contains("Matematik"));
        assert!(line.contains("30 dk"));
        assert!(line.ends_with('✓'));
    }

    #[test]
    fn manually_stopped_entry_has_no_completion_mark() {
        let started_at = Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap();
        let mut session = Session::begin(8, SessionKind::Break, started_at);
        session.ended_at = Some(started_at + Duration::seconds(120));
        session.total_seconds = Some(120);

        let line = format_entry(&session);

        assert!(line.contains("Mola"));
        assert!(!line.contains('✓'));
    }
}
