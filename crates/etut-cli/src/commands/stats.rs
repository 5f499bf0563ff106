use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Result};
use etut_protocol::{Request, Response};

pub async fn execute() -> Result<()> {
    let translator = super::translator();
    let client = DaemonClient::new();

    match client.send(Request::GetStats).await {
        Ok(Response::Stats {
            total_work_seconds,
            total_break_seconds,
            work_session_count,
            break_session_count,
            today_work_minutes,
        }) => {
            println!("📊 {}", translator.get("command.stats_title"));
            println!(
                "   {}",
                translator.format(
                    "command.stats_total_work",
                    &[("minutes", &(total_work_seconds / 60).to_string())],
                )
            );
            println!(
                "   {}",
                translator.format(
                    "command.stats_total_break",
                    &[("minutes", &(total_break_seconds / 60).to_string())],
                )
            );
            println!(
                "   {}",
                translator.format(
                    "command.stats_work_count",
                    &[("count", &work_session_count.to_string())],
                )
            );
            println!(
                "   {}",
                translator.format(
                    "command.stats_break_count",
                    &[("count", &break_session_count.to_string())],
                )
            );
            println!(
                "   {}",
                translator.format(
                    "command.stats_today",
                    &[("minutes", &today_work_minutes.to_string())],
                )
            );
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
