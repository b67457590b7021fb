//! # Tagforge Common
//!
//! Shared vocabulary for the workspace: the tag data model, the error taxonomy,
//! runtime configuration and the outbound ports that the core drives.
//!
//! * **[`tag`]**: intents, records, platforms and session states. Pure data.
//! * **[`error`]**: typed failures for every boundary.
//! * **[`hardware`]** / **[`generation`]**: traits implemented by adapters in `tagforge-core`.

pub mod config;
pub mod error;
pub mod generation;
pub mod hardware;
pub mod tag;
pub mod token;
