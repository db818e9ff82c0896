//! Test logging shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Driver crates stay quiet unless a directive names them.
const DEFAULT_DIRECTIVES: &str = "warn,sqlx=error,sea_orm=error";

fn filter_directives(test_log: Option<String>, rust_log: Option<String>) -> String {
    test_log
        .or(rust_log)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

/// Install a test-writer subscriber once per process.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then warn-only. Safe to
/// call from every test binary's ctor.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let directives = filter_directives(
            std::env::var("TEST_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
        );

        fmt()
            .with_env_filter(EnvFilter::new(directives))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
