//! Convenience re-exports for downstream crates.
//!
//! ```
//! use warden_core::prelude::*;
//!
//! let intent = Intent::new("i-1", "example").with_scope(["src/"]);
//! let registry = RegistrySnapshot::from_intents([intent]);
//! assert!(registry.get_intent(&IntentId::from("i-1")).is_some());
//! ```

pub use crate::intent::Intent;
pub use crate::registry::{IntentRegistry, RegistrySnapshot};
pub use crate::types::{IntentId, Timestamp, TurnId};
