//! Convenience re-exports.

pub use crate::context::{GateContext, IntentContext};
pub use crate::error::{GateError, GateResult};
pub use crate::gate::{ApprovalVerdict, IntentGate};
pub use crate::tool::{GateVerdict, ToolKind};
