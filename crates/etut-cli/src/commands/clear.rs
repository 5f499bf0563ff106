use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Result};
use dialoguer::Confirm;
use etut_protocol::{Request, Response};

pub async fn execute(skip_confirmation: bool) -> Result<()> {
    let translator = super::translator();
    let client = DaemonClient::new();

    let count = match client.send(Request::GetLedger).await {
        Ok(Response::Ledger { sessions }) => sessions.len(),
        Ok(Response::Error { message }) => bail!("{}", message),
        Ok(_) => bail!("{}", translator.get("error.unexpected_response")),
        Err(ClientError::DaemonNotRunning) => {
            super::exit_daemon_not_running(&translator);
        }
        Err(ClientError::Timeout) => bail!("{}", translator.get("error.daemon_timeout")),
        Err(error) => bail!("{}", error),
    };

    if count == 0 {
        println!("⚪ {}", translator.get("command.clear_empty"));
        return Ok(());
    }

    if !skip_confirmation {
        let prompt = translator.format("command.clear_confirm", &[("count", &count.to_string())]);

        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", translator.get("command.clear_cancelled"));
            return Ok(());
        }
    }

    match client.send(Request::ClearLedger).await {
        Ok(Response::Ok) => {
            println!("🧹 {}", translator.get("command.clear_success"));
        }
        Ok(Response::Error { message }) => {
            bail!("{}", message);
        }
        Ok(_) => {
            bail!("{}", translator.get("error.unexpected_response"));
        }
        Err(error) => {
            bail!("{}", error);
        }
    }

    Ok(())
}
