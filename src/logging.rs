use chrono::Local;
use log::LevelFilter;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn level_from_env() -> LevelFilter {
    let value = std::env::var("IBAN_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    parse_level(value.as_deref())
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

// stdout carries command output, so every log line goes to stderr.
pub fn init_logging(level: LevelFilter) -> Result<(), String> {
    let mut outcome = Ok(());
    INIT.call_once(|| {
        outcome = fern::Dispatch::new()
            .level(level)
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} | {:<5} | {}",
                    Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    message
                ))
            })
            .chain(std::io::stderr())
            .apply()
            .map_err(|err| err.to_string());
    });
    outcome
}
