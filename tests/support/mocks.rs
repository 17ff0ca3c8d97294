use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use payment_relay::domain::dispatcher::{DispatchError, PaymentDispatcher};
use payment_relay::domain::payment::{DispatchRecord, ProcessorKind};
use payment_relay::domain::repository::PaymentRepository;
use time::OffsetDateTime;

/// Scriptable dispatcher: fails the first `fail_first` calls with a
/// transport error, then keeps answering with the configured processor.
pub struct MockDispatcher {
	processor:  ProcessorKind,
	fail_first: usize,
	calls:      AtomicUsize,
}

impl MockDispatcher {
	pub fn new(processor: ProcessorKind) -> Self {
		Self {
			processor,
			fail_first: 0,
			calls: AtomicUsize::new(0),
		}
	}

	pub fn failing_first(processor: ProcessorKind, fail_first: usize) -> Self {
		Self {
			processor,
			fail_first,
			calls: AtomicUsize::new(0),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl PaymentDispatcher for MockDispatcher {
	async fn dispatch(
		&self,
		_record: &DispatchRecord,
	) -> Result<ProcessorKind, DispatchError> {
		let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
		if attempt < self.fail_first {
			return Err(DispatchError::Unreachable {
				message: "connection refused".to_string(),
			});
		}
		Ok(self.processor)
	}
}

/// In-memory repository double. Stores saved records (so summaries can be
/// asserted) and can fail the first `fail_first` saves.
#[derive(Default)]
pub struct MockRepository {
	fail_first: usize,
	saves:      AtomicUsize,
	saved:      Mutex<Vec<(DispatchRecord, ProcessorKind)>>,
}

impl MockRepository {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn failing_first(fail_first: usize) -> Self {
		Self {
			fail_first,
			..Self::default()
		}
	}

	pub fn saved(&self) -> Vec<(DispatchRecord, ProcessorKind)> {
		self.saved.lock().unwrap().clone()
	}
}

#[async_trait]
impl PaymentRepository for MockRepository {
	async fn save(
		&self,
		record: &DispatchRecord,
		processor: ProcessorKind,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let attempt = self.saves.fetch_add(1, Ordering::SeqCst);
		if attempt < self.fail_first {
			return Err(Box::new(std::io::Error::other("storage unavailable")));
		}

		let mut saved = self.saved.lock().unwrap();
		// Upsert keyed by correlation id, last write wins.
		saved.retain(|(existing, _)| {
			existing.correlation_id != record.correlation_id
		});
		saved.push((record.clone(), processor));
		Ok(())
	}

	async fn get_summary(
		&self,
		processor: ProcessorKind,
		from: Option<OffsetDateTime>,
		to: Option<OffsetDateTime>,
	) -> Result<(usize, f64), Box<dyn std::error::Error + Send>> {
		let saved = self.saved.lock().unwrap();
		let matching = saved.iter().filter(|(record, saved_processor)| {
			*saved_processor == processor &&
				from.is_none_or(|from| record.requested_at >= from) &&
				to.is_none_or(|to| record.requested_at <= to)
		});

		let mut total_requests = 0;
		let mut total_amount = 0.0;
		for (record, _) in matching {
			total_requests += 1;
			total_amount += record.amount;
		}

		Ok((total_requests, total_amount))
	}

	async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.saved.lock().unwrap().clear();
		Ok(())
	}
}
