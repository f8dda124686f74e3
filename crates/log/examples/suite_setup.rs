use anyhow::Result;
use lumen_log::prelude::*;
use lumen_log::SuiteInfo;

#[derive(Debug, thiserror::Error)]
#[error("project index is stale")]
struct StaleIndex(#[source] std::io::Error);

fn main() -> Result<()> {
    let suite = SuiteInfo::new("Orature");
    let configurator = match LogConfigurator::for_suite(&suite) {
        Ok(configurator) => configurator,
        Err(_) => LogConfigurator::new(std::env::temp_dir().join("orature-logs"), &suite),
    };
    configurator.configure()?;

    info!(directory = %configurator.directory().as_path().display(), "Logging ready");
    debug!("Not written: root level is INFO");
    log_error!(
        StaleIndex(std::io::Error::other("checksum mismatch")),
        "Rebuilding project index"
    );

    if let Some(contents) = configurator.read_active_log() {
        println!("--- {} ---", configurator.active_log_path().display());
        print!("{contents}");
    }
    Ok(())
}
