//! # Tagforge Core
//!
//! Turns user intents into tag records and drives scan and write operations
//! against an injected tag capability.
//!
//! * **[`composer`]** + **[`registry`]**: intent to record, no I/O.
//! * **[`session`]**: the scan/write state machine and its cancellation rules.
//! * **[`decoder`]**: raw records reported by a reader to displayable values.
//! * **[`hardware`]** / **[`generation`]**: adapters for the ports in `tagforge-common`.
//! * **[`prefill`]**: text generation as a source for text intents.

pub mod composer;
pub mod decoder;
pub mod generation;
pub mod hardware;
pub mod prefill;
pub mod registry;
pub mod session;

pub use session::TagSession;
