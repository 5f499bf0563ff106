use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Result};
use etut_protocol::{Request, Response};

pub async fn execute(work: Option<u64>, break_minutes: Option<u64>) -> Result<()> {
    let translator = super::translator();
    let client = DaemonClient::new();

    if work.is_none() && break_minutes.is_none() {
        return show_current(&client, &translator).await;
    }

    if let Some(minutes) = work {
        match client.send(Request::SetWorkDuration { minutes }).await {
            Ok(Response::DurationSet { minutes }) => {
                println!(
                    "⏱️  {}",
                    translator
                        .format("command.duration_work_set", &[("minutes", &minutes.to_string())])
                );
            }
            Ok(Response::Error { message }) => bail!("{}", message),
            Ok(_) => bail!("{}", translator.get("error.unexpected_response")),
            Err(ClientError::DaemonNotRunning) => {
                super::exit_daemon_not_running(&translator);
            }
            Err(ClientError::Timeout) => bail!("{}", translator.get("error.daemon_timeout")),
            Err(error) => bail!("{}", error),
        }
    }

    if let Some(minutes) = break_minutes {
        match client.send(Request::SetBreakDuration { minutes }).await {
            Ok(Response::DurationSet { minutes }) => {
                println!(
                    "⏱️  {}",
                    translator
                        .format("command.duration_break_set", &[("minutes", &minutes.to_string())])
                );
            }
            Ok(Response::Error { message }) => bail!("{}", message),
            Ok(_) => bail!("{}", translator.get("error.unexpected_response")),
            Err(ClientError::DaemonNotRunning) => {
                super::exit_daemon_not_running(&translator);
            }
            Err(ClientError::Timeout) => bail!("{}", translator.get("error.daemon_timeout")),
            Err(error) => bail!("{}", error),
        }
    }

    Ok(())
}

async fn show_current(client: &DaemonClient, translator: &etut_core::Translator) -> Result<()> {
    match client.send(Request::GetStatus).await {
        Ok(Response::Status {
            work_duration_minutes,
            break_duration_minutes,
            ..
        }) => {
            println!(
                "⏱️  {}",
                translator.format(
                    "command.duration_work_set",
                    &[("minutes", &work_duration_minutes.to_string())],
                )
            );
            println!(
                "⏱️  {}",
                translator.format(
                    "command.duration_break_set",
                    &[("minutes", &break_duration_minutes.to_string())],
                )
            );
            Ok(())
        }
        Ok(Response::Error { message }) => bail!("{}", message),
        Ok(_) => bail!("{}", translator.get("error.unexpected_response")),
        Err(ClientError::DaemonNotRunning) => {
            super::exit_daemon_not_running(translator);
        }
        Err(ClientError::Timeout) => bail!("{}", translator.get("error.daemon_timeout")),
        Err(error) => bail!("{}", error),
    }
}
