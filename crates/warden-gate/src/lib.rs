//! Warden Gate - Binds a work session to an intent and gates mutations.
//!
//! The gate answers two questions for every change an agent proposes:
//!
//! 1. Does it fall inside the active intent's owned scope?
//! 2. If not, has a human explicitly authorized it?
//!
//! Scope checks delegate to `warden-scope`; escalations delegate to
//! `warden-approval`. Session state lives in a [`GateContext`] value the
//! caller creates and threads through every call; there is no ambient
//! active intent, so one gate serves any number of concurrent sessions.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use warden_approval::ApprovalWorkflow;
//! use warden_core::{Intent, IntentId, RegistrySnapshot};
//! use warden_gate::{GateContext, IntentGate, ToolKind};
//!
//! let registry = RegistrySnapshot::from_intents([
//!     Intent::new("auth", "Auth refactor").with_scope(["src/auth/"]),
//! ]);
//! let gate = IntentGate::new(
//!     Arc::new(registry),
//!     Arc::new(ApprovalWorkflow::in_memory()),
//! );
//!
//! let mut ctx = GateContext::new();
//! assert!(!gate.gatekeep(&ctx, ToolKind::FileWrite).is_allowed());
//!
//! gate.select_intent(&mut ctx, &IntentId::from("auth")).unwrap();
//! assert!(gate.gatekeep(&ctx, ToolKind::FileWrite).is_allowed());
//! assert!(gate.is_path_in_scope(&ctx, "src/auth/mod.rs"));
//! assert!(!gate.is_path_in_scope(&ctx, "README.md"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod context;
/// Error types for gate operations.
pub mod error;
pub mod gate;
pub mod tool;

pub use context::{GateContext, IntentContext};
pub use error::{GateError, GateResult};
pub use gate::{ApprovalVerdict, IntentGate};
pub use tool::{GateVerdict, ToolKind};
