//! Process-wide embedded PostgreSQL cluster.
//!
//! `pg-embed-setup-unpriv` keeps the shared cluster alive for the lifetime
//! of the test binary. The first bootstrap downloads binaries, so transient
//! failures are retried before the suite gives up.

use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Start (or reuse) the cluster shared by every test in this binary.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!(
                    "pg-embed: bootstrap attempt {attempt}/{SHARED_CLUSTER_RETRIES} failed, \
                     retrying in {SHARED_CLUSTER_RETRY_DELAY:?}: {error:?}"
                );
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}
