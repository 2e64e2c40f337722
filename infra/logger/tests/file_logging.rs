use dskit_logger::{LevelFilter, Logger, LoggerError};
use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

// Each integration test binary gets its own process, so only one test here
// may install the global subscriber successfully.
#[test]
#[serial]
fn file_logging_creates_log_file_and_second_init_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("dskit-file-logging")
        .console(false)
        .path(&log_dir)
        .level(LevelFilter::INFO)
        .init()?;

    assert!(logger.guard().is_some(), "file logging should own a writer guard");
    tracing::info!(component = "ds-button", "hello from integration test");

    let err = Logger::builder().name("dskit-second").init().expect_err("second init should fail");
    assert!(matches!(err, LoggerError::Subscriber { .. }));

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("hello from integration test"));
    Ok(())
}
