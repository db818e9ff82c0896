//! Unit-test logging hook.
//!
//! Integration tests call `backend_test_support::logging::init` directly;
//! unit tests go through here so both share one subscriber setup.
//! Level: `TEST_LOG`, then `RUST_LOG`, then `warn`.

pub fn init() {
    backend_test_support::logging::init();
}
