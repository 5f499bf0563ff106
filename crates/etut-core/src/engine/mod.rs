mod machine;
mod timer;

pub use machine::{step, Effect, Machine, Notice, Phase, TimerEvent, TimerState};
pub use timer::StudyTimer;
