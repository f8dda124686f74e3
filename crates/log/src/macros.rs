//! Convenience macros for structured logging

/// Log an error with its `source()` chain and return it
///
/// The error is recorded in the `error` field, which `%ex` in the layout
/// renders below the message, one cause per line.
///
/// ```rust,ignore
/// let err = lumen_log::log_error!(load().unwrap_err(), "loading settings failed");
/// ```
#[macro_export]
macro_rules! log_error {
    ($err:expr) => {{
        let e = $err;
        $crate::error!(error = &e as &(dyn ::std::error::Error + 'static));
        e
    }};
    ($err:expr, $($arg:tt)*) => {{
        let e = $err;
        $crate::error!(error = &e as &(dyn ::std::error::Error + 'static), $($arg)*);
        e
    }};
}
