//! The work/break timer state machine.
//!
//! All transition logic lives in the single pure function [`step`]: given the
//! current machine value, an event and a wall-clock `now`, it returns the
//! next machine value together with the side effects the host must apply.
//! Invalid (state, event) pairs are no-ops, never errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TimerConfig;
use crate::domain::{pause, Session, SessionId, SessionKind};

/// Discriminant of [`TimerState`], shipped over the wire and shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Working,
    Paused,
    Break,
    Completed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Working => "working",
            Phase::Paused => "paused",
            Phase::Break => "break",
            Phase::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Machine state with its payload. `Paused` resumes to working or break
/// according to the held session's kind; `Completed` holds nothing because
/// the finished work session already lives in the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerState {
    Idle,
    Working { session: Session },
    Paused { session: Session },
    Break { session: Session },
    Completed,
}

impl TimerState {
    pub fn phase(&self) -> Phase {
        match self {
            TimerState::Idle => Phase::Idle,
            TimerState::Working { .. } => Phase::Working,
            TimerState::Paused { .. } => Phase::Paused,
            TimerState::Break { .. } => Phase::Break,
            TimerState::Completed => Phase::Completed,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            TimerState::Working { session }
            | TimerState::Paused { session }
            | TimerState::Break { session } => Some(session),
            TimerState::Idle | TimerState::Completed => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            TimerState::Working { session }
            | TimerState::Paused { session }
            | TimerState::Break { session } => Some(session),
            TimerState::Idle | TimerState::Completed => None,
        }
    }
}

/// User commands plus the one-second clock tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    Start,
    Pause,
    Resume,
    Stop { name: Option<String> },
    Tick,
}

/// Semantic notification; the host renders it to (title, body) text.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    WorkCompleted { name: String, minutes: i64 },
    BreakStarted { minutes: u64 },
    BreakCompleted,
}

/// Side effects produced by a transition, applied by the machine's owner.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Append(Session),
    Notify(Notice),
}

/// Timer state, countdown and session-id source folded into one value so the
/// whole machine can be stepped as data.
#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    state: TimerState,
    time_left: u64,
    next_session_id: SessionId,
}

impl Machine {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            state: TimerState::Idle,
            time_left: config.work_duration_minutes * 60,
            next_session_id: 1,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Remaining seconds of the current countdown.
    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.state.session()
    }

    pub(crate) fn current_session_mut(&mut self) -> Option<&mut Session> {
        self.state.session_mut()
    }

    /// Back to idle with the countdown re-read from the work duration. The
    /// session-id source keeps counting so ids stay unique within the run.
    pub(crate) fn reset(&mut self, config: &TimerConfig) {
        self.state = TimerState::Idle;
        self.time_left = config.work_duration_minutes * 60;
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self {
            state: TimerState::Idle,
            time_left: 0,
            next_session_id: 1,
        }
    }
}

/// The transition function. Covers the whole transition table; every pair it
/// does not name falls through unchanged.
pub fn step(
    machine: Machine,
    event: TimerEvent,
    config: &TimerConfig,
    now: DateTime<Utc>,
) -> (Machine, Vec<Effect>) {
    let Machine {
        state,
        time_left,
        mut next_session_id,
    } = machine;
    let mut effects = Vec::new();

    let (state, time_left) = match (state, event) {
        (TimerState::Idle, TimerEvent::Start) => {
            let session = Session::begin(take_id(&mut next_session_id), SessionKind::Work, now);
            (
                TimerState::Working { session },
                config.work_duration_minutes * 60,
            )
        }

        (TimerState::Completed, TimerEvent::Start) => {
            let session = Session::begin(take_id(&mut next_session_id), SessionKind::Break, now);
            effects.push(Effect::Notify(Notice::BreakStarted {
                minutes: config.break_duration_minutes,
            }));
            (
                TimerState::Break { session },
                config.break_duration_minutes * 60,
            )
        }

        (TimerState::Working { session }, TimerEvent::Pause)
        | (TimerState::Break { session }, TimerEvent::Pause) => (
            TimerState::Paused {
                session: pause::pause(session, now),
            },
            time_left,
        ),

        (TimerState::Paused { session }, TimerEvent::Resume) => {
            let session = pause::resume(session, now);
            let state = match session.kind {
                SessionKind::Work => TimerState::Working { session },
                SessionKind::Break => TimerState::Break { session },
            };
            (state, time_left)
        }

        (TimerState::Working { session }, TimerEvent::Stop { name })
        | (TimerState::Paused { session }, TimerEvent::Stop { name }) => match session.kind {
            // Stopping work never returns to idle: a fresh break starts
            // immediately.
            SessionKind::Work => {
                let mut finished = pause::finalize(session, now, false);
                finished.name = SessionKind::Work.normalize_name(name.as_deref());
                effects.push(Effect::Append(finished));

                let session =
                    Session::begin(take_id(&mut next_session_id), SessionKind::Break, now);
                (
                    TimerState::Break { session },
                    config.break_duration_minutes * 60,
                )
            }
            SessionKind::Break => {
                let finished = pause::finalize(session, now, false);
                effects.push(Effect::Append(finished));
                (TimerState::Idle, config.work_duration_minutes * 60)
            }
        },

        (TimerState::Break { session }, TimerEvent::Stop { .. }) => {
            let finished = pause::finalize(session, now, false);
            effects.push(Effect::Append(finished));
            (TimerState::Idle, config.work_duration_minutes * 60)
        }

        (TimerState::Working { session }, TimerEvent::Tick) => {
            let remaining = time_left.saturating_sub(1);
            if remaining == 0 {
                let finished = pause::finalize(session, now, true);
                let notice = Notice::WorkCompleted {
                    name: finished.name.clone(),
                    minutes: finished.net_seconds() / 60,
                };
                effects.push(Effect::Append(finished));
                effects.push(Effect::Notify(notice));
                (TimerState::Completed, 0)
            } else {
                (TimerState::Working { session }, remaining)
            }
        }

        (TimerState::Break { session }, TimerEvent::Tick) => {
            let remaining = time_left.saturating_sub(1);
            if remaining == 0 {
                let finished = pause::finalize(session, now, true);
                effects.push(Effect::Append(finished));
                effects.push(Effect::Notify(Notice::BreakCompleted));
                (TimerState::Idle, config.work_duration_minutes * 60)
            } else {
                (TimerState::Break { session }, remaining)
            }
        }

        // Everything else: pause while idle, resume while running, stop with
        // no session, ticks outside working/break, double start.
        (state, _) => (state, time_left),
    };

    (
        Machine {
            state,
            time_left,
            next_session_id,
        },
        effects,
    )
}

fn take_id(next: &mut SessionId) -> SessionId {
    let id = *next;
    *next += 1;
    id
}
