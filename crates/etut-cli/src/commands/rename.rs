use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Result};
use etut_protocol::{Request, Response, SessionId};

pub async fn execute(id: SessionId, name: String) -> Result<()> {
    let translator = super::translator();
    let client = DaemonClient::new();

    match client.send(Request::Rename { id, name }).await {
        Ok(Response::Ok) => {
            println!("✏️  {}", translator.get("command.rename_success"));
        }
        Ok(Response::Error { .. }) => {
            // Renaming a break session or an unknown id is a no-op, not a
            // failure.
            println!("⚪ {}", translator.get("command.rename_not_found"));
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
