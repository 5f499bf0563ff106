mod clear;
mod duration;
mod export;
mod history;
mod lang;
mod pause;
mod rename;
mod resume;
mod start;
mod stats;
mod status;
mod stop;

pub use clear::execute as clear;
pub use duration::execute as duration;
pub use export::execute as export;
pub use history::execute as history;
pub use lang::execute as lang;
pub use pause::execute as pause;
pub use rename::execute as rename;
pub use resume::execute as resume;
pub use start::execute as start;
pub use stats::execute as stats;
pub use status::execute as status;
pub use stop::execute as stop;

use etut_core::{Config, Translator};

pub(crate) fn translator() -> Translator {
    Config::load()
        .map(|config| Translator::new(config.general.language))
        .unwrap_or_default()
}

/// Shared exit path for a missing daemon: print the hint, exit non-zero.
pub(crate) fn exit_daemon_not_running(translator: &Translator) -> ! {
    eprintln!("⚫ {}", translator.get("error.daemon_not_running"));
    eprintln!("   {}", translator.get("error.daemon_hint"));
    std::process::exit(1);
}

pub(crate) fn format_duration(seconds: u64) -> String {
    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;

    if minutes > 0 {
        format!("{} dk {} sn", minutes, remaining_seconds)
    } else {
        format!("{} sn", remaining_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_shows_minutes_and_seconds() {
        assert_eq!(format_duration(90), "1 dk 30 sn");
        assert_eq!(format_duration(1800), "30 dk 0 sn");
    }

    #[test]
    fn format_duration_shows_only_seconds_under_a_minute() {
        assert_eq!(format_duration(45), "45 sn");
        assert_eq!(format_duration(0), "0 sn");
    }
}
