//! # Observability & Tracing
//!
//! Structured logging for every collection and client.
//!
//! The subscriber uses a compact format without the module prefix (`with_target(false)`); each
//! actor log line carries an `entity_type` field naming its collection instead. Levels come from
//! the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup and shutdown with the final document count
//! - **Document Writes**: Create, Update and Action at `info`, with payloads at `debug`
//! - **Queries**: the full query at `debug`, the match count, and rejected queries at `warn`
//! - **Indexes**: every declaration, and whether it already existed
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run --bin create-indexes
//! ```
//!
//! With `RUST_LOG=info` a publish looks like:
//!
//! ```text
//! INFO Created entity_type="clinics" id=6f1c... size=1
//! INFO publish_clinic: Sending publish to actor
//! INFO Action ok entity_type="clinics" id=6f1c...
//! ```

/// Installs the global subscriber. Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
