//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the directory's background tasks.
//!
//! ## The DirectorySystem Pattern
//!
//! [`DirectorySystem`] creates everything first and wires it second:
//!
//! 1. **Creation** - the clinic store actor and the identity provider
//! 2. **Start** - the store's run loop and the auth holder in their own Tokio tasks
//! 3. **Indexes** - the composite indexes are declared on the running store
//! 4. **Wiring** - the clinic client receives the store client, the auth state and the feed
//!
//! Observable state is passed to the client explicitly; there are no process-wide
//! singletons.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the senders** - the clinic client and the identity provider
//! 2. **Tasks detect closure** - `recv()` / `changed()` report the closed channel
//! 3. **Await completion** - both task handles are awaited
//!
//! Logging is set up separately with
//! [`resource_store::tracing::setup_tracing`]; see that module for the `RUST_LOG` options.

pub mod directory_system;

pub use directory_system::*;
