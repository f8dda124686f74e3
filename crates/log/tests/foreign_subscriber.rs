//! Activation when another subscriber already owns the global default

use lumen_log::{LogConfigurator, LogError};

#[test]
fn test_foreign_global_subscriber_is_reported() -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(tracing::subscriber::NoSubscriber::default())?;

    let dir = tempfile::tempdir()?;
    let result = LogConfigurator::new(dir.path(), "Acme").configure();
    assert!(matches!(result, Err(LogError::AlreadyInitialized)));
    assert!(lumen_log::global_handle().is_none());
    Ok(())
}
