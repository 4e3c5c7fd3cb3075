//! Embedded PostgreSQL helpers for the Diesel adapter suites.
//!
//! Integration tests compile as separate crates, so the cluster bootstrap,
//! template provisioning and skip policy live here and are pulled in with
//! `mod pg_support;`.

mod cluster_skip;
mod embedded_postgres;
mod pg_embed;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::provision_template_database;
pub use pg_embed::shared_cluster;

/// Render a `postgres` error with its SQLSTATE and detail when present.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`,
/// which hides the reason a seed statement failed.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}
