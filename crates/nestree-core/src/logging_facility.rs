//! Structured logging facility for nestree
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! The history store owns the operation boundary: it emits exactly one
//! start and one end (or end_error) event per store call. Engine functions
//! below it log only at debug level.
//!
//! # Usage
//!
//! ```rust
//! use nestree_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
