//! Release tag parsing and latest-version selection
//!
//! # Modules
//!
//! - [`tag`]: Calendar-version tag parser and total order
//! - [`error`]: Tag parsing errors

pub mod error;
pub mod tag;
