use chrono::{DateTime, Utc};

use crate::config::TimerConfig;
use crate::domain::{stats, Ledger, Session, SessionId, SessionKind, StatsSnapshot};

use super::machine::{step, Effect, Machine, Notice, Phase, TimerEvent};

/// The interval-timer subsystem: exclusive owner of the timer configuration,
/// the running state machine and the session ledger. Commands mutate it
/// synchronously and return the notices the host should deliver; queries are
/// read-only views.
#[derive(Debug)]
pub struct StudyTimer {
    config: TimerConfig,
    machine: Machine,
    ledger: Ledger,
}

impl StudyTimer {
    pub fn new(config: TimerConfig) -> Self {
        let config = config.clamped();
        Self {
            machine: Machine::new(&config),
            config,
            ledger: Ledger::new(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, now: DateTime<Utc>) -> Vec<Notice> {
        self.apply(TimerEvent::Start, now)
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Vec<Notice> {
        self.apply(TimerEvent::Pause, now)
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> Vec<Notice> {
        self.apply(TimerEvent::Resume, now)
    }

    pub fn stop(&mut self, name: Option<String>, now: DateTime<Utc>) -> Vec<Notice> {
        self.apply(TimerEvent::Stop { name }, now)
    }

    /// One second elapsed on the clock.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Notice> {
        self.apply(TimerEvent::Tick, now)
    }

    /// Renames the live work session if it matches, otherwise the ledger
    /// entry. Break sessions and unknown ids are untouched.
    pub fn rename_session(&mut self, id: SessionId, name: &str) -> bool {
        if let Some(session) = self.machine.current_session_mut() {
            if session.id == id {
                if session.kind != SessionKind::Work {
                    return false;
                }
                session.name = SessionKind::Work.normalize_name(Some(name));
                return true;
            }
        }
        self.ledger.rename(id, name)
    }

    /// Empties the ledger and drops any in-progress session without
    /// finalizing it; the machine returns to idle. Idempotent.
    pub fn clear_ledger(&mut self) {
        self.ledger.clear();
        self.machine.reset(&self.config);
    }

    /// Applies the clamped work duration and returns it. An idle countdown
    /// re-reads the new value immediately.
    pub fn set_work_duration(&mut self, minutes: u64) -> u64 {
        self.config.work_duration_minutes = TimerConfig::clamp_work_minutes(minutes);
        if self.machine.phase() == Phase::Idle {
            self.machine.reset(&self.config);
        }
        self.config.work_duration_minutes
    }

    /// Applies the clamped break duration and returns it.
    pub fn set_break_duration(&mut self, minutes: u64) -> u64 {
        self.config.break_duration_minutes = TimerConfig::clamp_break_minutes(minutes);
        self.config.break_duration_minutes
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Whether the clock should be ticking: only in working or break.
    pub fn is_running(&self) -> bool {
        matches!(self.machine.phase(), Phase::Working | Phase::Break)
    }

    pub fn time_left(&self) -> u64 {
        self.machine.time_left()
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.machine.current_session()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn stats(&self, now: DateTime<Utc>) -> StatsSnapshot {
        stats::snapshot(&self.ledger, self.machine.current_session(), now)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply(&mut self, event: TimerEvent, now: DateTime<Utc>) -> Vec<Notice> {
        let machine = std::mem::take(&mut self.machine);
        let (machine, effects) = step(machine, event, &self.config, now);
        self.machine = machine;

        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::Append(session) => self.ledger.append(session),
                Effect::Notify(notice) => notices.push(notice),
            }
        }
        notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap()
    }

    fn timer() -> StudyTimer {
        StudyTimer::new(TimerConfig::default())
    }

    fn tick_for(timer: &mut StudyTimer, count: u64, from: DateTime<Utc>) -> Vec<Notice> {
        let mut notices = Vec::new();
        for i in 1..=count {
            notices.extend(timer.tick(from + Duration::seconds(i as i64)));
        }
        notices
    }

    #[test]
    fn completed_work_session_lands_in_the_ledger() {
        let mut timer = timer();
        timer.start(t0());
        let notices = tick_for(&mut timer, 1800, t0());

        assert_eq!(timer.phase(), Phase::Completed);
        assert_eq!(timer.ledger().len(), 1);
        assert!(timer.ledger().sessions()[0].completed);
        assert!(matches!(notices[..], [Notice::WorkCompleted { .. }]));
    }

    #[test]
    fn stop_appends_named_work_session_and_starts_break() {
        let mut timer = timer();
        timer.start(t0());
        tick_for(&mut timer, 200, t0());

        let notices = timer.stop(
            Some("Matematik".to_string()),
            t0() + Duration::seconds(200),
        );

        assert!(notices.is_empty());
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.time_left(), 300);

        let entry = &timer.ledger().sessions()[0];
        assert_eq!(entry.name, "Matematik");
        assert_eq!(entry.total_seconds, Some(200));
        assert!(!entry.completed);
    }

    #[test]
    fn stop_without_session_changes_nothing() {
        let mut timer = timer();
        timer.stop(None, t0());

        assert_eq!(timer.phase(), Phase::Idle);
        assert!(timer.ledger().is_empty());
    }

    #[test]
    fn rename_live_work_session() {
        let mut timer = timer();
        timer.start(t0());
        let id = timer.current_session().unwrap().id;

        assert!(timer.rename_session(id, "Tarih"));
        assert_eq!(timer.current_session().unwrap().name, "Tarih");
    }

    #[test]
    fn rename_live_break_session_is_refused() {
        let mut timer = timer();
        timer.start(t0());
        timer.stop(None, t0() + Duration::seconds(60));
        let id = timer.current_session().unwrap().id;

        assert!(!timer.rename_session(id, "Kahve"));
        assert_eq!(timer.current_session().unwrap().name, "Mola");
    }

    #[test]
    fn rename_finalized_entry_goes_through_the_ledger() {
        let mut timer = timer();
        timer.start(t0());
        timer.stop(None, t0() + Duration::seconds(60));
        let finished_id = timer.ledger().sessions()[0].id;

        assert!(timer.rename_session(finished_id, "Fizik"));
        assert_eq!(timer.ledger().sessions()[0].name, "Fizik");
    }

    #[test]
    fn clear_ledger_drops_history_and_current_session() {
        let mut timer = timer();
        timer.start(t0());
        timer.stop(None, t0() + Duration::seconds(120));
        assert_eq!(timer.ledger().len(), 1);
        assert!(timer.current_session().is_some());

        timer.clear_ledger();

        assert_eq!(timer.phase(), Phase::Idle);
        assert!(timer.ledger().is_empty());
        assert!(timer.current_session().is_none());
        assert_eq!(timer.time_left(), 1800);

        let snapshot = timer.stats(t0() + Duration::seconds(200));
        assert_eq!(snapshot.today_work_minutes, 0);
        assert_eq!(snapshot.work_session_count, 0);
    }

    #[test]
    fn stats_combine_ledger_and_in_progress_session() {
        let mut timer = timer();
        timer.start(t0());
        timer.stop(None, t0() + Duration::seconds(600));

        // Finish the break so a fresh work session can start.
        timer.stop(None, t0() + Duration::seconds(660));
        timer.start(t0() + Duration::seconds(700));

        let snapshot = timer.stats(t0() + Duration::seconds(700 + 300));

        assert_eq!(snapshot.work_session_count, 1);
        assert_eq!(snapshot.break_session_count, 1);
        assert_eq!(snapshot.total_work_seconds, 600);
        assert_eq!(snapshot.total_break_seconds, 60);
        // 10 finalized minutes + 5 in-progress minutes.
        assert_eq!(snapshot.today_work_minutes, 15);
    }

    #[test]
    fn set_work_duration_resets_idle_countdown() {
        let mut timer = timer();
        assert_eq!(timer.set_work_duration(45), 45);
        assert_eq!(timer.time_left(), 45 * 60);
    }

    #[test]
    fn set_work_duration_leaves_running_countdown_alone() {
        let mut timer = timer();
        timer.start(t0());
        tick_for(&mut timer, 10, t0());

        timer.set_work_duration(45);

        assert_eq!(timer.time_left(), 1790);
        // The next idle reset picks the new duration up.
        timer.stop(None, t0() + Duration::seconds(20));
        timer.stop(None, t0() + Duration::seconds(30));
        assert_eq!(timer.time_left(), 45 * 60);
    }

    #[test]
    fn set_break_duration_applies_to_next_break() {
        let mut timer = timer();
        assert_eq!(timer.set_break_duration(10), 10);

        timer.start(t0());
        timer.stop(None, t0() + Duration::seconds(60));

        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.time_left(), 600);
    }

    #[test]
    fn durations_are_clamped_and_stepped() {
        let mut timer = timer();
        assert_eq!(timer.set_work_duration(200), 120);
        assert_eq!(timer.set_work_duration(2), 5);
        assert_eq!(timer.set_work_duration(32), 30);
        assert_eq!(timer.set_break_duration(45), 30);
        assert_eq!(timer.set_break_duration(0), 1);
    }
}
