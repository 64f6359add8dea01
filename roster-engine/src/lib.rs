//! # roster-engine
//!
//! The membership reconciliation engine: keeps a GitHub team and an
//! append-only spreadsheet ledger converged with the membership of a chat
//! channel, for every configured channel↔team mapping.
//!
//! - [`Engine`] — clients + configuration, entry points for the batch
//!   [`Engine::reconcile`] pass and the incremental [`Engine::handle_event`]
//!   path
//! - [`members`] — the ledger business rules (idempotent join, anonymous
//!   join, close-out guard, username backfill)
//! - [`failure`] — structured per-user failure records, rendered to text
//!   only at the logging boundary

pub mod engine;
pub mod error;
pub mod events;
pub mod failure;
pub mod members;
pub mod reconcile;

pub use engine::Engine;
pub use error::{EventError, SyncError};
pub use failure::{FailureCause, UserFailure};
pub use reconcile::MappingOutcome;
