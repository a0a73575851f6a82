//! Core types and service wiring for the RecyVision recycling assistant.

/// In-memory catalog of the current recycling-center snapshot.
pub mod catalog;
/// Two-backend classification dispatch with graceful degradation.
pub mod dispatch;
/// Append-only scan-event log and its file-backed store.
pub mod events;
/// Per-category handling guidance for classified items.
pub mod instructions;
/// Domain models shared by all adapters.
pub mod model;
/// Normalization of raw provider features into domain records.
pub mod normalize;
/// Traits describing the provider interfaces and their errors.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;

pub use catalog::*;
pub use dispatch::*;
pub use events::*;
pub use instructions::*;
pub use model::*;
pub use normalize::*;
pub use ports::*;
pub use service::*;
