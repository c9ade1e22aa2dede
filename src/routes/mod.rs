//! Routes Module
//!
//! Router assembly. Handlers live next to the features they serve; this
//! module only decides which paths exist and which of them the access guard
//! wraps.

/// Router assembly
pub mod router;

pub use router::create_router;
