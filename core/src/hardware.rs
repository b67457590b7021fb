//! # Tag Hardware Adapters
//!
//! Concrete [`TagCapability`] implementations and the factory that picks one
//! from the runtime [`Config`].

use std::sync::Arc;

use tagforge_common::config::Config;
use tagforge_common::error::SessionError;
use tagforge_common::hardware::TagCapability;

use crate::session::TagSession;

mod file_tag;
mod unsupported;

pub use file_tag::FileTag;
pub use unsupported::Unsupported;

pub fn capability_from_config(cfg: &Config) -> Arc<dyn TagCapability> {
    match &cfg.tag {
        Some(path) => Arc::new(
            FileTag::new(path.clone(), cfg.capacity).with_poll_interval(cfg.poll_interval),
        ),
        None => Arc::new(Unsupported),
    }
}

/// Opens a session on the hardware described by `cfg`.
pub fn open_session(cfg: &Config) -> Result<TagSession, SessionError> {
    TagSession::open(capability_from_config(cfg), cfg.secure_context)
}
