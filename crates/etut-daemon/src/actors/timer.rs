use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use etut_core::{
    Notice, Phase, Session, SessionId, SessionKind, StatsSnapshot, StudyTimer, TimerConfig,
};

use super::NotifierHandle;

pub enum TimerMessage {
    Start,
    Pause,
    Resume,
    Stop {
        name: Option<String>,
    },
    Rename {
        id: SessionId,
        name: String,
        reply: oneshot::Sender<bool>,
    },
    Clear,
    SetWorkDuration {
        minutes: u64,
        reply: oneshot::Sender<u64>,
    },
    SetBreakDuration {
        minutes: u64,
        reply: oneshot::Sender<u64>,
    },
    GetStatus {
        reply: oneshot::Sender<TimerStatus>,
    },
    GetLedger {
        reply: oneshot::Sender<Vec<Session>>,
    },
    GetStats {
        reply: oneshot::Sender<StatsSnapshot>,
    },
}

#[derive(Debug, Clone)]
pub struct TimerStatus {
    pub phase: Phase,
    pub time_left: u64,
    pub session_name: Option<String>,
    pub session_kind: Option<SessionKind>,
    pub work_duration_minutes: u64,
    pub break_duration_minutes: u64,
}

/// Owns the study timer. The one-second interval below is the subsystem's
/// only clock; commands and ticks are serialized through the same select
/// loop, so no two mutations ever interleave.
pub struct TimerActor {
    receiver: mpsc::Receiver<TimerMessage>,
    timer: StudyTimer,
    notifier: Option<NotifierHandle>,
}

#[derive(Clone)]
pub struct TimerHandle {
    sender: mpsc::Sender<TimerMessage>,
}

impl TimerHandle {
    pub async fn start(&self) -> Result<(), mpsc::error::SendError<TimerMessage>> {
        self.sender.send(TimerMessage::Start).await
    }

    pub async fn pause(&self) -> Result<(), mpsc::error::SendError<TimerMessage>> {
        self.sender.send(TimerMessage::Pause).await
    }

    pub async fn resume(&self) -> Result<(), mpsc::error::SendError<TimerMessage>> {
        self.sender.send(TimerMessage::Resume).await
    }

    pub async fn stop(
        &self,
        name: Option<String>,
    ) -> Result<(), mpsc::error::SendError<TimerMessage>> {
        self.sender.send(TimerMessage::Stop { name }).await
    }

    pub async fn clear(&self) -> Result<(), mpsc::error::SendError<TimerMessage>> {
        self.sender.send(TimerMessage::Clear).await
    }

    pub async fn rename(&self, id: SessionId, name: String) -> Option<bool> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(TimerMessage::Rename {
                id,
                name,
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }

    pub async fn set_work_duration(&self, minutes: u64) -> Option<u64> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(TimerMessage::SetWorkDuration {
                minutes,
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }

    pub async fn set_break_duration(&self, minutes: u64) -> Option<u64> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(TimerMessage::SetBreakDuration {
                minutes,
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }

    pub async fn get_status(&self) -> Option<TimerStatus> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(TimerMessage::GetStatus {
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }

    pub async fn get_ledger(&self) -> Option<Vec<Session>> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(TimerMessage::GetLedger {
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }

    pub async fn get_stats(&self) -> Option<StatsSnapshot> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(TimerMessage::GetStats {
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }
}

impl TimerActor {
    pub fn new(notifier: Option<NotifierHandle>, config: TimerConfig) -> (Self, TimerHandle) {
        let (sender, receiver) = mpsc::channel(32);

        let actor = Self {
            receiver,
            timer: StudyTimer::new(config),
            notifier,
        };

        let handle = TimerHandle { sender };

        (actor, handle)
    }

    pub async fn run(mut self) {
        let mut tick_interval = tokio::time::interval(Duration::from_secs(1));

        loop {
            tokio::select! {
                Some(message) = self.receiver.recv() => {
                    self.handle_message(message);
                }
                _ = tick_interval.tick() => {
                    // The clock only advances the countdown while a session
                    // is actually running.
                    if self.timer.is_running() {
                        let notices = self.timer.tick(Utc::now());
                        self.dispatch(notices);
                    }
                }
                else => break,
            }
        }

        debug!("timer actor stopped");
    }

    fn handle_message(&mut self, message: TimerMessage) {
        match message {
            TimerMessage::Start => {
                let notices = self.timer.start(Utc::now());
                info!(phase = %self.timer.phase(), "start command handled");
                self.dispatch(notices);
            }
            TimerMessage::Pause => {
                let notices = self.timer.pause(Utc::now());
                info!(phase = %self.timer.phase(), "pause command handled");
                self.dispatch(notices);
            }
            TimerMessage::Resume => {
                let notices = self.timer.resume(Utc::now());
                info!(phase = %self.timer.phase(), "resume command handled");
                self.dispatch(notices);
            }
            TimerMessage::Stop { name } => {
                let notices = self.timer.stop(name, Utc::now());
                info!(phase = %self.timer.phase(), "stop command handled");
                self.dispatch(notices);
            }
            TimerMessage::Rename { id, name, reply } => {
                let renamed = self.timer.rename_session(id, &name);
                debug!(id, renamed, "rename command handled");
                let _ = reply.send(renamed);
            }
            TimerMessage::Clear => {
                self.timer.clear_ledger();
                info!("ledger cleared");
            }
            TimerMessage::SetWorkDuration { minutes, reply } => {
                let applied = self.timer.set_work_duration(minutes);
                info!(requested = minutes, applied, "work duration updated");
                let _ = reply.send(applied);
            }
            TimerMessage::SetBreakDuration { minutes, reply } => {
                let applied = self.timer.set_break_duration(minutes);
                info!(requested = minutes, applied, "break duration updated");
                let _ = reply.send(applied);
            }
            TimerMessage::GetStatus { reply } => {
                let _ = reply.send(self.current_status());
            }
            TimerMessage::GetLedger { reply } => {
                let _ = reply.send(self.timer.ledger().sessions().to_vec());
            }
            TimerMessage::GetStats { reply } => {
                let _ = reply.send(self.timer.stats(Utc::now()));
            }
        }
    }

    fn dispatch(&self, notices: Vec<Notice>) {
        if let Some(ref notifier) = self.notifier {
            for notice in notices {
                notifier.notify(notice);
            }
        }
    }

    fn current_status(&self) -> TimerStatus {
        let session = self.timer.current_session();
        TimerStatus {
            phase: self.timer.phase(),
            time_left: self.timer.time_left(),
            session_name: session.map(|s| s.name.clone()),
            session_kind: session.map(|s| s.kind),
            work_duration_minutes: self.timer.config().work_duration_minutes,
            break_duration_minutes: self.timer.config().break_duration_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_actor() -> (TimerActor, TimerHandle) {
        TimerActor::new(None, TimerConfig::default())
    }

    #[tokio::test]
    async fn start_and_get_status() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());

        handle.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let status = handle.get_status().await.unwrap();
        assert_eq!(status.phase, Phase::Working);
        assert!(status.time_left >= 1798);
        assert_eq!(status.session_kind, Some(SessionKind::Work));
        assert_eq!(status.session_name.as_deref(), Some("Çalışma"));
    }

    #[tokio::test]
    async fn pause_and_resume() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());

        handle.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        handle.pause().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let status = handle.get_status().await.unwrap();
        assert_eq!(status.phase, Phase::Paused);

        handle.resume().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let status = handle.get_status().await.unwrap();
        assert_eq!(status.phase, Phase::Working);
    }

    #[tokio::test]
    async fn stop_chains_into_break() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());

        handle.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        handle.stop(Some("Matematik".to_string())).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let status = handle.get_status().await.unwrap();
        assert_eq!(status.phase, Phase::Break);
        assert_eq!(status.session_kind, Some(SessionKind::Break));
        assert!(status.time_left >= 298);

        let ledger = handle.get_ledger().await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].name, "Matematik");
    }

    #[tokio::test]
    async fn rename_finalized_session() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());

        handle.start().await.unwrap();
        handle.stop(None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let ledger = handle.get_ledger().await.unwrap();
        let id = ledger[0].id;

        let renamed = handle.rename(id, "Kimya".to_string()).await.unwrap();
        assert!(renamed);

        let ledger = handle.get_ledger().await.unwrap();
        assert_eq!(ledger[0].name, "Kimya");
    }

    #[tokio::test]
    async fn clear_resets_everything() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());

        handle.start().await.unwrap();
        handle.stop(None).await.unwrap();
        handle.clear().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let status = handle.get_status().await.unwrap();
        assert_eq!(status.phase, Phase::Idle);

        let ledger = handle.get_ledger().await.unwrap();
        assert!(ledger.is_empty());

        let stats = handle.get_stats().await.unwrap();
        assert_eq!(stats.today_work_minutes, 0);
    }

    #[tokio::test]
    async fn set_durations_reply_with_clamped_values() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());

        assert_eq!(handle.set_work_duration(200).await, Some(120));
        assert_eq!(handle.set_break_duration(0).await, Some(1));

        let status = handle.get_status().await.unwrap();
        assert_eq!(status.work_duration_minutes, 120);
        assert_eq!(status.break_duration_minutes, 1);
    }
}
