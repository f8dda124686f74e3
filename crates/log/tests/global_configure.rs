//! Process-wide activation through `LogConfigurator::configure`
//!
//! The global dispatcher can be installed once per process, so every test
//! here shares it and runs under `TEST_LOCK`.

use std::sync::{LazyLock, Mutex};

use lumen_log::{Level, LogConfigurator, debug, global_handle, info};
use pretty_assertions::assert_eq;

// Serialization lock for tests using global state
static TEST_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

fn lines(configurator: &LogConfigurator) -> Vec<String> {
    configurator
        .read_active_log()
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_configure_twice_does_not_duplicate() -> anyhow::Result<()> {
    let _guard = TEST_LOCK.lock().unwrap();
    let dir = tempfile::tempdir()?;
    let configurator = LogConfigurator::new(dir.path(), "Acme");

    configurator.configure()?;
    configurator.configure()?;
    info!("configured twice");
    debug!("below the root level");

    let written = lines(&configurator);
    assert_eq!(written.len(), 1, "{written:?}");
    assert!(written[0].starts_with("[INFO] "));
    assert!(written[0].ends_with("global_configure: configured twice"));

    let handle = global_handle().unwrap();
    assert_eq!(handle.current_level(), Level::Info);
    assert_eq!(handle.appender_names()?, vec!["console", "file"]);
    Ok(())
}

#[test]
fn test_reconfigure_switches_directory() -> anyhow::Result<()> {
    let _guard = TEST_LOCK.lock().unwrap();
    let first = tempfile::tempdir()?;
    let second = tempfile::tempdir()?;
    let before = LogConfigurator::new(first.path(), "Acme");
    let after = LogConfigurator::new(second.path(), "Acme");

    before.configure()?;
    info!("to the first directory");
    after.configure()?;
    info!("to the second directory");

    assert_eq!(lines(&before).len(), 1);
    let moved = lines(&after);
    assert_eq!(moved.len(), 1);
    assert!(moved[0].ends_with("to the second directory"));
    Ok(())
}
