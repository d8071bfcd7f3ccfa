//! Atlas API service library.
//!
//! The binary in `main.rs` wires these modules to the real archive
//! client; integration tests drive the same router with a mock archive.

pub mod handlers;
pub mod persist;
pub mod state;
pub mod store;
