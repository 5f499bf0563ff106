use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Result};
use etut_protocol::{Phase, Request, Response};

pub async fn execute() -> Result<()> {
    let translator = super::translator();
    let client = DaemonClient::new();

    match client.send(Request::Start).await {
        Ok(Response::Ok) => {}
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

    // Starting from idle begins a work session, starting after a completed
    // work session begins the break; show what actually happened.
    if let Ok(Response::Status {
        phase,
        time_left_seconds,
        ..
    }) = client.send(Request::GetStatus).await
    {
        match phase {
            Phase::Break => {
                println!("☕ {}", translator.get("command.status_break"));
            }
            _ => {
                println!("🚀 {}", translator.get("command.start_success"));
            }
        }
        println!(
            "   {}",
            translator.format(
                "command.start_duration",
                &[("minutes", &(time_left_seconds / 60).to_string())],
            )
        );
    } else {
        println!("🚀 {}", translator.get("command.start_success"));
    }

    Ok(())
}
