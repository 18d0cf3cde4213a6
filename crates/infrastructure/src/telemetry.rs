//! Tracing setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a stdout tracing subscriber filtered by `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset or invalid. Calls after the
/// first, or after another subscriber was installed, are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_does_not_panic() {
        init_tracing();
        init_tracing();
    }
}
