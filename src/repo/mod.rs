//! Upstream repository access: clone management, tag resolution, and the
//! sync marker that gates regeneration.
//!
//! # Modules
//!
//! - [`sync`]: git clone / tag enumeration / hard checkout
//! - [`marker`]: last-synced-version marker file and the sync decision
//! - [`error`]: sync errors

pub mod error;
pub mod marker;
pub mod sync;
