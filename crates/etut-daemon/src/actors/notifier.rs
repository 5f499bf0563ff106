use etut_core::{Notice, NotificationUrgency, Translator};
use notify_rust::{Notification, Urgency};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub enum NotifierMessage {
    Notice(Notice),
}

#[derive(Clone)]
pub struct NotifierHandle {
    sender: mpsc::Sender<NotifierMessage>,
}

impl NotifierHandle {
    /// Fire-and-forget: delivery failure never reaches the caller.
    pub fn notify(&self, notice: Notice) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            if let Err(error) = sender.send(NotifierMessage::Notice(notice)).await {
                error!(%error, "failed to enqueue notification message");
            }
        });
    }
}

pub struct NotifierActor {
    receiver: mpsc::Receiver<NotifierMessage>,
    urgency: Urgency,
    sound_enabled: bool,
    translator: Translator,
}

impl NotifierActor {
    pub fn new(
        urgency: NotificationUrgency,
        sound_enabled: bool,
        translator: Translator,
    ) -> (Self, NotifierHandle) {
        let (sender, receiver) = mpsc::channel(32);

        let urgency = match urgency {
            NotificationUrgency::Low => Urgency::Low,
            NotificationUrgency::Normal => Urgency::Normal,
            NotificationUrgency::Critical => Urgency::Critical,
        };

        let actor = Self {
            receiver,
            urgency,
            sound_enabled,
            translator,
        };

        let handle = NotifierHandle { sender };

        (actor, handle)
    }

    pub async fn run(mut self) {
        info!("notifier actor started");

        while let Some(message) = self.receiver.recv().await {
            match message {
                NotifierMessage::Notice(notice) => {
                    let (title, body) = self.render(&notice);
                    self.show(&title, &body);
                }
            }
        }

        debug!("notifier actor stopped");
    }

    fn render(&self, notice: &Notice) -> (String, String) {
        match notice {
            Notice::WorkCompleted { name, minutes } => (
                self.translator.get("notification.work_completed_title"),
                self.translator.format(
                    "notification.work_completed_body",
                    &[("name", name), ("minutes", &minutes.to_string())],
                ),
            ),
            Notice::BreakStarted { minutes } => (
                self.translator.get("notification.break_started_title"),
                self.translator.format(
                    "notification.break_started_body",
                    &[("minutes", &minutes.to_string())],
                ),
            ),
            Notice::BreakCompleted => (
                self.translator.get("notification.break_completed_title"),
                self.translator.get("notification.break_completed_body"),
            ),
        }
    }

    fn show(&self, title: &str, body: &str) {
        match self.build_notification(title, body).show() {
            Ok(_) => {
                debug!(title, "notification sent");
            }
            Err(error) => {
                warn!(%error, title, "failed to show notification");
            }
        }
    }

    fn build_notification(&self, summary: &str, body: &str) -> Notification {
        let mut notification = Notification::new();
        notification
            .summary(summary)
            .body(body)
            .urgency(self.urgency)
            .appname("Etut");

        if self.sound_enabled {
            notification.sound_name("message-new-instant");
        }

        notification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etut_core::Language;

    #[tokio::test]
    async fn handle_can_send_notices() {
        let (actor, handle) = NotifierActor::new(
            NotificationUrgency::Normal,
            false,
            Translator::new(Language::Tr),
        );

        let actor_task = tokio::spawn(async move {
            tokio::time::timeout(std::time::Duration::from_millis(100), actor.run()).await
        });

        handle.notify(Notice::WorkCompleted {
            name: "Matematik".to_string(),
            minutes: 30,
        });
        handle.notify(Notice::BreakStarted { minutes: 5 });
        handle.notify(Notice::BreakCompleted);

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        drop(handle);

        let _ = actor_task.await;
    }

    #[test]
    fn notices_render_in_configured_language() {
        let (actor, _handle) = NotifierActor::new(
            NotificationUrgency::Normal,
            false,
            Translator::new(Language::En),
        );

        let (title, body) = actor.render(&Notice::BreakStarted { minutes: 5 });

        assert_eq!(title, "Etut — Break");
        assert_eq!(body, "A 5 minute break has started");
    }

    #[test]
    fn work_completed_interpolates_name_and_minutes() {
        let (actor, _handle) = NotifierActor::new(
            NotificationUrgency::Normal,
            false,
            Translator::new(Language::Tr),
        );

        let (_, body) = actor.render(&Notice::WorkCompleted {
            name: "Fizik".to_string(),
            minutes: 25,
        });

        assert_eq!(body, "Fizik: 25 dakika odaklandın. Mola zamanı!");
    }
}
