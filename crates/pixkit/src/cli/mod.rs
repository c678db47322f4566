//! Command implementations.

pub mod config;
pub mod id;
pub mod image;
