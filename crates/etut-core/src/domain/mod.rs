mod ledger;
pub mod pause;
mod session;
mod session_kind;
pub mod stats;

pub use ledger::Ledger;
pub use session::{Session, SessionId};
pub use session_kind::SessionKind;
pub use stats::StatsSnapshot;
