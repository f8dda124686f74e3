//! Logging state builder
//!
//! This module is organized into:
//! - `reload`: swappable filter and appender layers
//!
//! A [`Logging`] value is an explicit, process-scoped logging state. It can
//! be used scoped via [`Logging::scope`] or installed globally through
//! [`initialize_logging`](crate::initialize_logging).

mod reload;

// Re-export public types
pub use reload::ReloadHandle;

// Standard library
use std::sync::Arc;

// External dependencies
use tracing::Dispatch;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{MakeWriter, writer::BoxMakeWriter},
    layer::SubscriberExt,
};

// Internal crates
use crate::config::LogConfig;
use crate::core::{LogError, LogResult};
use crate::layer::appender::AppenderLayer;
use crate::layout::{Layout, SharedTimer};
use crate::writer::{self, ConsoleFactory};

/// Replacements for process resources, kept across [`Logging::replace`]
#[derive(Clone, Default)]
pub struct RuntimeOverrides {
    /// Writer used by console appenders instead of stdout / stderr
    pub console: Option<ConsoleFactory>,
    /// Timestamp source used by the layout instead of the UTC clock
    pub timer: Option<SharedTimer>,
}

impl std::fmt::Debug for RuntimeOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeOverrides")
            .field("console", &self.console.is_some())
            .field("timer", &self.timer.is_some())
            .finish()
    }
}

/// Live logging state: a dispatcher plus the handle that reconfigures it
pub struct Logging {
    dispatch: Dispatch,
    handle: ReloadHandle,
    overrides: RuntimeOverrides,
}

impl std::fmt::Debug for Logging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logging")
            .field("handle", &self.handle)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl Logging {
    /// Build logging state from a configuration
    ///
    /// # Errors
    ///
    /// Returns error if the configuration violates an invariant or the root
    /// level cannot be turned into a filter. No file is opened here.
    pub fn new(config: LogConfig) -> LogResult<Self> {
        Self::with_overrides(config, RuntimeOverrides::default())
    }

    /// Build logging state whose console appenders write into `writer`
    pub fn with_console_writer<W>(config: LogConfig, writer: W) -> LogResult<Self>
    where
        W: for<'a> MakeWriter<'a> + Clone + Send + Sync + 'static,
    {
        let console: ConsoleFactory = Arc::new(move || BoxMakeWriter::new(writer.clone()));
        Self::with_overrides(
            config,
            RuntimeOverrides {
                console: Some(console),
                timer: None,
            },
        )
    }

    /// Build logging state with explicit overrides
    pub fn with_overrides(config: LogConfig, overrides: RuntimeOverrides) -> LogResult<Self> {
        let (filter, appenders) = assemble(&config, &overrides)?;
        let (filter_layer, appender_layer, handle) =
            reload::create_layers(config.root.level, filter, appenders);

        let subscriber = Registry::default()
            .with(filter_layer)
            .with(appender_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            handle,
            overrides,
        })
    }

    /// Replace filter and appenders in place; producers keep their dispatcher
    ///
    /// The previous appenders are dropped, which flushes and closes their files.
    pub fn replace(&self, config: LogConfig) -> LogResult<()> {
        let (filter, appenders) = assemble(&config, &self.overrides)?;
        self.handle.reload(config.root.level, filter, appenders)
    }

    /// Run `f` with this state as the thread's default dispatcher
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// The underlying dispatcher
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Handle for inspecting and swapping the active configuration
    pub fn handle(&self) -> &ReloadHandle {
        &self.handle
    }
}

impl LogConfig {
    /// Validate and turn this configuration into logging state
    pub fn build(self) -> LogResult<Logging> {
        Logging::new(self)
    }
}

fn assemble(
    config: &LogConfig,
    overrides: &RuntimeOverrides,
) -> LogResult<(EnvFilter, AppenderLayer)> {
    config.validate()?;

    let level = config.root.level.as_str();
    let filter = EnvFilter::try_new(level).map_err(|e| LogError::Filter {
        filter: level.to_string(),
        reason: e.to_string(),
    })?;

    let pattern = config.layout.compile()?;
    let layout = match &overrides.timer {
        Some(timer) => Layout::with_timer(pattern, Arc::clone(timer)),
        None => Layout::new(pattern),
    };

    let sinks = config
        .attached_appenders()
        .map(|spec| writer::make_sink(spec, overrides.console.as_ref()))
        .collect();

    Ok((filter, AppenderLayer::new(layout, sinks)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppenderSpec, ConsoleSpec, Level, LayoutSpec, RootLoggerSpec};

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = LogConfig {
            layout: LayoutSpec::default(),
            appenders: vec![],
            root: RootLoggerSpec::new(Level::Info, ["console"]),
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn test_only_referenced_appenders_attach() {
        let mut config = LogConfig::test();
        config
            .appenders
            .push(AppenderSpec::console("spare", ConsoleSpec::default()));

        let logging = Logging::with_console_writer(config, std::io::sink).unwrap();
        assert_eq!(logging.handle().appender_names().unwrap(), vec!["console"]);
        assert_eq!(logging.handle().current_level(), Level::Trace);
    }

    #[test]
    fn test_replace_swaps_level_and_appenders() {
        let logging = Logging::with_console_writer(LogConfig::test(), std::io::sink).unwrap();

        let mut next = LogConfig::test();
        next.root.level = Level::Warn;
        next.appenders[0].name = "stdout".into();
        next.root.appender_refs = vec!["stdout".into()];
        logging.replace(next).unwrap();

        assert_eq!(logging.handle().current_level(), Level::Warn);
        assert_eq!(logging.handle().appender_names().unwrap(), vec!["stdout"]);
    }

    #[test]
    fn test_replace_keeps_previous_on_error() {
        let logging = Logging::with_console_writer(LogConfig::test(), std::io::sink).unwrap();

        let mut broken = LogConfig::test();
        broken.layout = LayoutSpec::new("%nope");
        assert!(logging.replace(broken).is_err());
        assert_eq!(logging.handle().current_level(), Level::Trace);
    }
}
