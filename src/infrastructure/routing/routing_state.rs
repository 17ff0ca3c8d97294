use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::domain::health::{HealthSnapshot, RoutingVerdict};
use crate::domain::payment::ProcessorKind;

/// Shared, lock-guarded routing verdict. The health monitor is the single
/// writer; dispatchers read it and park on the wait-gate while both
/// processors are failing. Cloning shares the same underlying verdict.
#[derive(Clone, Default)]
pub struct RoutingState {
	verdict: Arc<Mutex<RoutingVerdict>>,
	changed: Arc<Notify>,
}

impl RoutingState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Folds one probe cycle's snapshots into the verdict and wakes every
	/// waiter so parked dispatch attempts re-check the wait flag.
	pub fn apply(
		&self,
		default: Option<&HealthSnapshot>,
		fallback: Option<&HealthSnapshot>,
	) {
		let mut verdict = self.verdict.lock().unwrap();
		verdict.observe(default, fallback);
		drop(verdict);

		self.changed.notify_waiters();
	}

	pub fn current(&self) -> RoutingVerdict {
		*self.verdict.lock().unwrap()
	}

	/// Waits until the wait flag is clear, then returns the processor the
	/// verdict selects at that moment. The lock is never held across an
	/// await.
	pub async fn select_processor(&self) -> ProcessorKind {
		loop {
			let notified = self.changed.notified();

			let verdict = self.current();
			if !verdict.wait {
				return if verdict.send_to_fallback {
					ProcessorKind::Fallback
				} else {
					ProcessorKind::Default
				};
			}

			notified.await;
		}
	}
}
