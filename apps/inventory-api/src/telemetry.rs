//! Tracing and error-report setup

use crate::config::Environment;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre before any fallible work in main().
///
/// Safe to call multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize the tracing subscriber.
///
/// Production gets JSON output for log aggregation; development gets a
/// pretty printer. `RUST_LOG` overrides the default filter either way.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new("info,sea_orm=warn")
        } else {
            EnvFilter::new("debug")
        }
    });

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(false).pretty())
            .with(filter)
            .try_init()
    };

    // Already-initialized is fine, common in tests
    if result.is_ok() {
        tracing::info!("tracing initialized, environment: {:?}", environment);
    }
}
