use std::time::Duration;

use log::{error, warn};
use tokio::time::sleep;

use crate::domain::dispatcher::PaymentDispatcher;
use crate::domain::payment::Payment;
use crate::domain::queue::Queue;
use crate::domain::repository::PaymentRepository;
use crate::use_cases::process_payment::{ProcessOutcome, ProcessPaymentUseCase};

/// One dispatch worker. The pool runs N identical copies of this loop,
/// all draining the same intake queue. The loop ends when the queue is
/// closed and drained.
pub async fn payment_dispatch_worker<Q, D, R>(
	queue: Q,
	process_payment_use_case: ProcessPaymentUseCase<D, R>,
) where
	Q: Queue<Payment> + Clone,
	D: PaymentDispatcher,
	R: PaymentRepository,
{
	loop {
		let mut payment = match queue.pop().await {
			Ok(Some(payment)) => payment,
			Ok(None) => break,
			Err(e) => {
				error!("Failed to pop from payments queue: {e}");
				sleep(Duration::from_secs(1)).await;
				continue;
			}
		};

		match process_payment_use_case.execute(&mut payment).await {
			ProcessOutcome::Completed | ProcessOutcome::AlreadyCompleted => {}
			ProcessOutcome::Retry(reason) => {
				warn!(
					"Payment {} hit a transient {reason:?} failure. \
					 Re-queueing.",
					payment.correlation_id
				);
				if let Err(e) = queue.push(payment).await {
					error!("Failed to re-queue payment: {e}");
				}
			}
		}
	}
}
