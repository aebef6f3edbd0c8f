//! Logging setup utilities for the gomoku server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Logging is enabled for the server library, this shared crate and the binary.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "gomoku-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use gomoku_shared::logger::setup_logger;
///
/// setup_logger("gomoku-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "gomoku_server={level},{shared}={level},{bin}={level},tower_http={level}",
        level = default_log_level,
        shared = env!("CARGO_PKG_NAME").replace('-', "_"),
        bin = binary_name.replace('-', "_"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_all_targets() {
        // テスト項目: デフォルトのフィルタにサーバ・共有クレート・バイナリが含まれる
        // given (前提条件):
        let binary_name = "gomoku-server";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果): ハイフンはアンダースコアに置換される
        assert!(filter.contains("gomoku_server=info"));
        assert!(filter.contains("gomoku_shared=info"));
        assert!(filter.contains("tower_http=info"));
        assert!(!filter.contains('-'));
    }
}
