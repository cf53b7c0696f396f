//! Core domain types and utilities for the brushnote platform.
//!
//! This crate provides the foundational ID types and the error handling
//! base shared by the rest of the brushnote writing platform.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::UserId;
