use crate::client::{ClientError, DaemonClient};
use anyhow::Result;
use etut_protocol::{Phase, Request, Response, SessionKind};
use serde::Serialize;

use super::format_duration;

#[derive(Serialize)]
struct StatusOutput {
    phase: Phase,
    session_name: Option<String>,
    session_kind: Option<SessionKind>,
    time_left_seconds: u64,
    time_left_formatted: String,
    work_duration_minutes: u64,
    break_duration_minutes: u64,
}

pub async fn execute(json: bool) -> Result<()> {
    let translator = super::translator();
    let client = DaemonClient::new();

    match client.send(Request::GetStatus).await {
        Ok(Response::Status {
            phase,
            time_left_seconds,
            session_name,
            session_kind,
            work_duration_minutes,
            break_duration_minutes,
        }) => {
            if json {
                print_json(
                    phase,
                    time_left_seconds,
                    session_name,
                    session_kind,
                    work_duration_minutes,
                    break_duration_minutes,
                )?;
            } else {
                print_formatted(&translator, phase, time_left_seconds, session_name);
            }
        }
        Ok(Response::Error { message }) => {
            if json {
                println!(r#"{{"error": "{}"}}"#, message);
            } else {
                eprintln!("{}", message);
            }
            std::process::exit(1);
        }
        Ok(_) => {
            if json {
                println!(r#"{{"error": "unexpected response"}}"#);
            } else {
                eprintln!("{}", translator.get("error.unexpected_response"));
            }
            std::process::exit(1);
        }
        Err(ClientError::DaemonNotRunning) => {
            if json {
                println!(r#"{{"error": "daemon not running"}}"#);
            } else {
                super::exit_daemon_not_running(&translator);
            }
        }
        Err(error) => {
            if json {
                println!(r#"{{"error": "{}"}}"#, error);
            } else {
                eprintln!("{}", error);
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_json(
    phase: Phase,
    time_left_seconds: u64,
    session_name: Option<String>,
    session_kind: Option<SessionKind>,
    work_duration_minutes: u64,
    break_duration_minutes: u64,
) -> Result<()> {
    let output = StatusOutput {
        phase,
        session_name,
        session_kind,
        time_left_seconds,
        time_left_formatted: format_duration(time_left_seconds),
        work_duration_minutes,
        break_duration_minutes,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_formatted(
    translator: &etut_core::Translator,
    phase: Phase,
    time_left_seconds: u64,
    session_name: Option<String>,
) {
    let (symbol, key) = match phase {
        Phase::Idle => ("⚪", "command.status_idle"),
        Phase::Working => ("🟢", "command.status_working"),
        Phase::Paused => ("⏸️ ", "command.status_paused"),
        Phase::Break => ("☕", "command.status_break"),
        Phase::Completed => ("🏁", "command.status_completed"),
    };
    println!("{} {}", symbol, translator.get(key));

    if let Some(name) = session_name {
        println!(
            "   {}",
            translator.format("command.status_session", &[("name", &name)])
        );
    }

    if !matches!(phase, Phase::Idle | Phase::Completed) {
        println!(
            "   {}",
            translator.format(
                "command.status_time_left",
                &[("time", &format_duration(time_left_seconds))],
            )
        );
    }
}
