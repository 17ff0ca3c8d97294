use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use derive_more::derive::{Display, Error};
use tokio::sync::Notify;

use crate::domain::payment::Payment;
use crate::domain::queue::Queue;

#[derive(Debug, Display, Error)]
pub enum QueueError {
	#[display("queue is closed")]
	Closed,
}

struct QueueState {
	items:  VecDeque<Payment>,
	closed: bool,
}

struct Inner {
	state:    Mutex<QueueState>,
	capacity: usize,
	/// Signaled after a push or on close; wakes blocked consumers.
	pushed:   Notify,
	/// Signaled after a pop or on close; wakes blocked producers.
	popped:   Notify,
}

/// Bounded FIFO intake buffer shared between the HTTP intake handlers
/// (producers) and the dispatch workers (consumers). The capacity bound is
/// the system's admission-control valve: `push` blocks while the queue is
/// full.
#[derive(Clone)]
pub struct InMemoryPaymentQueue {
	inner: Arc<Inner>,
}

impl InMemoryPaymentQueue {
	pub fn new(capacity: usize) -> Self {
		Self {
			inner: Arc::new(Inner {
				state:    Mutex::new(QueueState {
					items:  VecDeque::new(),
					closed: false,
				}),
				capacity: capacity.max(1),
				pushed:   Notify::new(),
				popped:   Notify::new(),
			}),
		}
	}

	/// Closes the producer side. Blocked consumers wake and drain whatever
	/// is left, then observe end-of-queue.
	pub fn close(&self) {
		self.inner.state.lock().unwrap().closed = true;
		self.inner.pushed.notify_waiters();
		self.inner.popped.notify_waiters();
	}

	pub fn len(&self) -> usize {
		self.inner.state.lock().unwrap().items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.state.lock().unwrap().items.is_empty()
	}
}

#[async_trait]
impl Queue<Payment> for InMemoryPaymentQueue {
	async fn pop(
		&self,
	) -> Result<Option<Payment>, Box<dyn std::error::Error + Send>> {
		loop {
			// The waiter must be registered before the lock is released;
			// `Notified` only registers on first poll, so `enable` it here
			// or a push/close landing in between is missed.
			let notified = self.inner.pushed.notified();
			tokio::pin!(notified);

			{
				let mut state = self.inner.state.lock().unwrap();
				if let Some(payment) = state.items.pop_front() {
					self.inner.popped.notify_one();
					return Ok(Some(payment));
				}
				if state.closed {
					return Ok(None);
				}
				notified.as_mut().enable();
			}

			notified.await;
		}
	}

	async fn push(
		&self,
		payment: Payment,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		loop {
			let notified = self.inner.popped.notified();
			tokio::pin!(notified);

			{
				let mut state = self.inner.state.lock().unwrap();
				if state.closed {
					return Err(Box::new(QueueError::Closed)
						as Box<dyn std::error::Error + Send>);
				}
				if state.items.len() < self.inner.capacity {
					state.items.push_back(payment);
					self.inner.pushed.notify_one();
					return Ok(());
				}
				notified.as_mut().enable();
			}

			notified.await;
		}
	}
}
