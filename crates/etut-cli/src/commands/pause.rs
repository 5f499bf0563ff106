use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Result};
use etut_protocol::{Request, Response};

pub async fn execute() -> Result<()> {
    let translator = super::translator();
    let client = DaemonClient::new();

    match client.send(Request::Pause).await {
        Ok(Response::Ok) => {
            println!("⏸️  {}", translator.get("command.pause_success"));
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
