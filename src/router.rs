//! Routing engine module.
//!
//! This module provides access to the route table, the path matcher, the
//! navigation state machine and the history backends.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "router")]
//! use wayfinder::router::table::RouteTable;
//! # #[cfg(feature = "router")]
//! use wayfinder::router::{NavigateOptions, Router};
//! ```

#[cfg(feature = "router")]
pub use wayfinder_router::*;
