use std::collections::HashSet;
use std::sync::Mutex;

use uuid::Uuid;

/// Idempotency ledger of payments that have reached a terminal, persisted
/// state. An identifier is inserted only after its dispatch record has
/// been durably persisted; presence means "do not reprocess".
#[derive(Debug, Default)]
pub struct CompletionLedger {
	completed: Mutex<HashSet<Uuid>>,
}

impl CompletionLedger {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_completed(&self, correlation_id: &Uuid) -> bool {
		self.completed.lock().unwrap().contains(correlation_id)
	}

	pub fn mark_completed(&self, correlation_id: Uuid) {
		self.completed.lock().unwrap().insert(correlation_id);
	}

	pub fn len(&self) -> usize {
		self.completed.lock().unwrap().len()
	}

	pub fn is_empty(&self) -> bool {
		self.completed.lock().unwrap().is_empty()
	}
}
