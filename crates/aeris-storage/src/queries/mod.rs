//! Typed query modules.

pub mod readings;
pub mod stats;
