//! Reload logic for replacing the active configuration

use parking_lot::Mutex;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, Registry, layer::Layered, reload};

use crate::config::Level;
use crate::core::{LogError, LogResult};
use crate::layer::appender::AppenderLayer;

/// Root filter, swappable in place
pub(crate) type FilterLayer = reload::Layer<EnvFilter, Registry>;
/// Registry with the root filter applied
pub(crate) type FilteredRegistry = Layered<FilterLayer, Registry>;
/// Appender fan-out, swappable in place
pub(crate) type AppenderReloadLayer = reload::Layer<AppenderLayer, FilteredRegistry>;

/// Handle for swapping the root filter and the appenders of a live dispatcher
#[derive(Clone)]
pub struct ReloadHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    appenders: reload::Handle<AppenderLayer, FilteredRegistry>,
    current_level: Arc<Mutex<Level>>,
}

impl std::fmt::Debug for ReloadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadHandle")
            .field("current_level", &*self.current_level.lock())
            .finish_non_exhaustive()
    }
}

impl ReloadHandle {
    /// Replace appenders first, then the filter, so no event reaches the
    /// old sinks under the new level
    pub(crate) fn reload(
        &self,
        level: Level,
        filter: EnvFilter,
        appenders: AppenderLayer,
    ) -> LogResult<()> {
        self.appenders
            .reload(appenders)
            .map_err(|e| LogError::Reload(format!("appenders: {e}")))?;
        self.filter
            .reload(filter)
            .map_err(|e| LogError::Reload(format!("filter: {e}")))?;
        *self.current_level.lock() = level;
        Ok(())
    }

    /// Root level currently in effect
    pub fn current_level(&self) -> Level {
        *self.current_level.lock()
    }

    /// Names of the appenders currently attached, in dispatch order
    pub fn appender_names(&self) -> LogResult<Vec<String>> {
        self.appenders
            .with_current(|layer| {
                layer
                    .appender_names()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .map_err(|e| LogError::Reload(format!("appenders: {e}")))
    }
}

/// Wrap the filter and the appenders in reloadable layers
pub(super) fn create_layers(
    level: Level,
    filter: EnvFilter,
    appenders: AppenderLayer,
) -> (FilterLayer, AppenderReloadLayer, ReloadHandle) {
    let (filter_layer, filter) = reload::Layer::new(filter);
    let (appender_layer, appenders) = reload::Layer::new(appenders);
    let handle = ReloadHandle {
        filter,
        appenders,
        current_level: Arc::new(Mutex::new(level)),
    };
    (filter_layer, appender_layer, handle)
}
