//! Collaborator contracts module.
//!
//! This module provides access to the traits the router talks through and the
//! in-process event bus.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "core")]
//! use wayfinder::core::emitter::{Emitter, EventBus};
//! # #[cfg(feature = "core")]
//! use wayfinder::core::view::{View, ViewFactory};
//! ```

#[cfg(feature = "core")]
pub use wayfinder_core::*;
