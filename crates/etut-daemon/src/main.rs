mod actors;
mod server;

use actors::{NotifierActor, TimerActor};
use anyhow::Result;
use etut_core::{Config, Translator};
use server::Server;
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("etut_daemon=debug".parse()?))
        .init();

    info!("etut daemon starting");

    let config = Config::load().unwrap_or_else(|error| {
        warn!(%error, "failed to load config, using defaults");
        Config::default()
    });

    let (shutdown_sender, shutdown_receiver) = broadcast::channel::<()>(1);
    let sigint_shutdown_sender = shutdown_sender.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("SIGINT received, initiating shutdown");
        sigint_shutdown_sender.send(()).ok();
    });

    let (notifier_actor, notifier_handle) = NotifierActor::new(
        config.notifications.urgency.clone(),
        config.notifications.sound_enabled,
        Translator::new(config.general.language),
    );
    tokio::spawn(notifier_actor.run());

    let (timer_actor, timer_handle) = TimerActor::new(Some(notifier_handle), config.timer.clone());
    tokio::spawn(timer_actor.run());

    let server = Server::new(timer_handle)?;
    server.run(shutdown_receiver).await?;

    info!("etut daemon stopped");
    std::process::exit(0);
}
