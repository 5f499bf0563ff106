use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Result};
use dialoguer::Input;
use etut_protocol::{Phase, Request, Response, SessionKind};

pub async fn execute(name: Option<String>) -> Result<()> {
    let translator = super::translator();
    let client = DaemonClient::new();

    let (phase, session_kind) = match client.send(Request::GetStatus).await {
        Ok(Response::Status {
            phase,
            session_kind,
            ..
        }) => (phase, session_kind),
        Ok(Response::Error { message }) => bail!("{}", message),
        Ok(_) => bail!("{}", translator.get("error.unexpected_response")),
        Err(ClientError::DaemonNotRunning) => {
            super::exit_daemon_not_running(&translator);
        }
        Err(ClientError::Timeout) => bail!("{}", translator.get("error.daemon_timeout")),
        Err(error) => bail!("{}", error),
    };

    if matches!(phase, Phase::Idle | Phase::Completed) {
        println!("⚪ {}", translator.get("command.no_session"));
        return Ok(());
    }

    // Only a work session takes a name; a blank answer keeps the default.
    let name = if session_kind == Some(SessionKind::Work) {
        match name {
            Some(name) => Some(name),
            None => prompt_name(&translator),
        }
    } else {
        None
    };

    match client.send(Request::Stop { name }).await {
        Ok(Response::Ok) => {
            println!("🛑 {}", translator.get("command.stop_success"));
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

fn prompt_name(translator: &etut_core::Translator) -> Option<String> {
    Input::<String>::new()
        .with_prompt(translator.get("command.stop_prompt_name"))
        .default(SessionKind::Work.default_name().to_string())
        .allow_empty(true)
        .interact_text()
        .ok()
}
