//! Etut core library
//!
//! Contains the work/break interval timer domain: sessions, pause accounting,
//! the timer state machine, the session ledger and its derived statistics.
//! This crate has no knowledge of infrastructure concerns.

pub mod config;
pub mod domain;
pub mod engine;
pub mod i18n;
pub mod ports;

pub use config::{Config, ConfigError, GeneralConfig, NotificationConfig, NotificationUrgency, TimerConfig};
pub use domain::{Ledger, Session, SessionId, SessionKind, StatsSnapshot};
pub use engine::{Machine, Notice, Phase, StudyTimer, TimerEvent, TimerState};
pub use i18n::{Language, Translator};
pub use ports::{ExportArtifact, ExportError, LedgerExporter};
