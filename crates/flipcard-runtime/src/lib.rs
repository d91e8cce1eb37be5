#![forbid(unsafe_code)]

//! Flip card runtime.
//!
//! # Key Components
//!
//! - [`FlipHost`] - owns a card, its focus scope and a virtual-time task queue
//! - [`HostConfig`] - host tunables, loadable from TOML/JSON with feature `config`
//! - [`ConfigError`] - configuration loading failures
//!
//! # Role
//! `flipcard-widgets` only describes what should happen and hands deferred
//! work to a [`Scheduler`](flipcard_core::Scheduler). This crate is the loop
//! that actually runs that work, one task per turn, and turns focus movement
//! into the focus events the card reacts to.

pub mod config;
pub mod host;

pub use config::{ConfigError, DEFAULT_MAX_TURNS, HostConfig};
pub use host::FlipHost;
