//! `SKIP_TEST_CLUSTER` policy shared by every embedded PostgreSQL suite.

/// Whether `SKIP_TEST_CLUSTER` is "1", "true" or "yes" (any case).
fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a cluster that could not be brought up.
///
/// With `SKIP_TEST_CLUSTER` set this prints a skip marker and yields `None`;
/// otherwise it panics so CI never passes without a database.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
