//! Subscriber layers

pub mod appender;
