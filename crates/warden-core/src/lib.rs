//! Warden Core - Foundation types for the Warden change-gating system.
//!
//! This crate provides:
//! - The [`Intent`] type: a declared unit of work with an owned scope of
//!   file patterns it may modify
//! - Identifier newtypes ([`IntentId`], [`TurnId`]) and [`Timestamp`]
//! - The [`IntentRegistry`] trait: the seam to the external intent registry,
//!   which remains the source of truth for intent lifecycles
//!
//! Warden never creates, updates, or retires intents. It reads them through
//! the registry seam and caches at most one per gate session.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod intent;
pub mod registry;
pub mod types;

pub use intent::Intent;
pub use registry::{IntentRegistry, RegistrySnapshot};
pub use types::{IntentId, Timestamp, TurnId};
