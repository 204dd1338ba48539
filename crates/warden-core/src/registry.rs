//! The seam to the external intent registry.

use std::collections::HashMap;
use std::fmt;

use crate::intent::Intent;
use crate::types::IntentId;

/// Read-only view of the external intent registry.
///
/// The registry owns intent lifecycles; Warden only ever looks intents up.
/// Implementations must be thread-safe.
pub trait IntentRegistry: Send + Sync {
    /// Look up an intent by id.
    ///
    /// Returns `None` if the registry has no intent with that id.
    fn get_intent(&self, id: &IntentId) -> Option<Intent>;

    /// List all intents known to the registry.
    fn list_intents(&self) -> Vec<Intent>;
}

/// An in-memory snapshot of the registry's intents.
///
/// Callers load intents from wherever the registry lives (a file, a service)
/// and hand Warden a snapshot. Lookups are by id; iteration order of
/// [`list_intents`](IntentRegistry::list_intents) is unspecified.
#[derive(Default)]
pub struct RegistrySnapshot {
    intents: HashMap<IntentId, Intent>,
}

impl RegistrySnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a collection of intents.
    pub fn from_intents(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            intents: intents.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }

    /// Insert or replace an intent in the snapshot.
    pub fn insert(&mut self, intent: Intent) {
        self.intents.insert(intent.id.clone(), intent);
    }

    /// The number of intents in the snapshot.
    #[must_use]
    pub fn count(&self) -> usize {
        self.intents.len()
    }
}

impl IntentRegistry for RegistrySnapshot {
    fn get_intent(&self, id: &IntentId) -> Option<Intent> {
        self.intents.get(id).cloned()
    }

    fn list_intents(&self) -> Vec<Intent> {
        self.intents.values().cloned().collect()
    }
}

impl fmt::Debug for RegistrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySnapshot")
            .field("count", &self.count())
            .finish()
    }
}
