//! # inlay-utils
//!
//! Process-wide setup for drivers that run the inlay pass.

use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

fn env_filter() -> EnvFilter {
    EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy()
}

/// Initializes a tracing Subscriber for logging.
///
/// The [`ErrorLayer`] lets errors raised by the pass capture the spans they were raised in, so
/// their traces show which file and which call was being processed.
///
/// # Panics
///
/// If a global subscriber is already set. Use [`try_subscriber`] when that can happen, e.g. in
/// tests.
pub fn subscriber() {
    tracing_subscriber::Registry::default()
        .with(env_filter())
        .with(ErrorLayer::default())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init()
}

/// Like [`subscriber`], but reports an already installed subscriber instead of panicking, and
/// writes through the test harness so that output is captured per test.
pub fn try_subscriber() -> Result<(), TryInitError> {
    tracing_subscriber::Registry::default()
        .with(env_filter())
        .with(ErrorLayer::default())
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
}
