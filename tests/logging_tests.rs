use goecharger::config::LoggingConfig;
use goecharger::logging::{LogContext, get_logger_with_context, init_logging, min_level, parse_log_level};
use tracing::Level;

#[test]
fn parse_level_accepts_common_spellings() {
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("WARNING").unwrap(), Level::WARN);
    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn min_level_picks_more_verbose() {
    assert_eq!(min_level(Level::INFO, Level::TRACE), Level::TRACE);
    assert_eq!(min_level(Level::ERROR, Level::WARN), Level::WARN);
}

#[test]
fn init_rejects_unknown_level_once() {
    // First call wins; later calls report the stored outcome
    let cfg = LoggingConfig {
        level: "nonsense".to_string(),
        ..LoggingConfig::default()
    };
    let first = init_logging(&cfg);
    let second = init_logging(&LoggingConfig::default());
    assert!(first.is_err());
    assert!(second.is_err());
}

#[test]
fn logger_with_host_context_does_not_panic() {
    let logger = get_logger_with_context(
        LogContext::new("client")
            .with_host("http://charger")
            .with_field("parameter", "amp".to_string()),
    );
    logger.info("status read");
    logger.child("verify").error("verification failed");
}
