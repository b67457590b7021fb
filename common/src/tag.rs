//! # Tag Data Model
//!
//! Everything that flows between the composer, the session and the decoder.

pub mod intent;
pub mod platform;
pub mod record;
pub mod state;
