//! Wayfinder Core - collaborator contracts for the Wayfinder SPA framework
//!
//! The routing engine in `wayfinder-router` talks to the rest of the
//! application exclusively through the traits defined here:
//!
//! - [`view`]: [`View`], [`NavigationGuard`], [`ViewFactory`], [`RenderTarget`]
//!   and the closure-backed [`ViewRegistry`]
//! - [`emitter`]: the [`Emitter`] publish/subscribe contract and the in-process
//!   [`EventBus`]
//! - [`error`]: [`ViewError`] and [`EmitterError`]
//!
//! All contracts are `Send + Sync` and async methods go through `async_trait`,
//! so the same implementations run on a native multi-threaded executor and on
//! the browser's single-threaded one.

#![warn(missing_docs)]

pub mod emitter;
pub mod error;
pub mod view;

pub use emitter::{Emitter, EventBus, EventHandler, SubscriberId};
pub use error::{EmitterError, ViewError, ViewResult};
pub use view::{
	NavigationGuard, RenderTarget, View, ViewFactory, ViewOptions, ViewRef, ViewRegistry,
};
