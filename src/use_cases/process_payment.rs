use std::sync::Arc;

use log::{debug, error, info};

use crate::domain::dispatcher::PaymentDispatcher;
use crate::domain::ledger::CompletionLedger;
use crate::domain::payment::{Payment, ProcessorKind, RetryReason};
use crate::domain::repository::PaymentRepository;

/// Result of one processing attempt. Requeueing on a retryable outcome is
/// an explicit action at the worker call site, which keeps the retry
/// policy swappable without touching this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
	Completed,
	AlreadyCompleted,
	Retry(RetryReason),
}

/// The per-payment core of the dispatch workers: idempotency check,
/// outbound send, persistence, completion bookkeeping.
pub struct ProcessPaymentUseCase<D: PaymentDispatcher, R: PaymentRepository> {
	dispatcher:   Arc<D>,
	payment_repo: Arc<R>,
	ledger:       Arc<CompletionLedger>,
}

impl<D: PaymentDispatcher, R: PaymentRepository> Clone
	for ProcessPaymentUseCase<D, R>
{
	fn clone(&self) -> Self {
		Self {
			dispatcher:   Arc::clone(&self.dispatcher),
			payment_repo: Arc::clone(&self.payment_repo),
			ledger:       Arc::clone(&self.ledger),
		}
	}
}

impl<D: PaymentDispatcher, R: PaymentRepository> ProcessPaymentUseCase<D, R> {
	pub fn new(
		dispatcher: Arc<D>,
		payment_repo: Arc<R>,
		ledger: Arc<CompletionLedger>,
	) -> Self {
		Self {
			dispatcher,
			payment_repo,
			ledger,
		}
	}

	/// Runs one attempt. The payment's retry marker distinguishes "needs
	/// resend" from "already sent, needs only a persistence retry"; a
	/// persist-failed payment is never sent again, so a retried
	/// persistence failure cannot double-charge.
	pub async fn execute(&self, payment: &mut Payment) -> ProcessOutcome {
		if self.ledger.is_completed(&payment.correlation_id) {
			debug!(
				"Payment {} already completed. Skipping it.",
				payment.correlation_id
			);
			return ProcessOutcome::AlreadyCompleted;
		}

		// Fresh timestamp on every attempt; the persisted record reflects
		// the attempt that actually went through.
		let record = payment.to_dispatch_record();

		if payment.retry != Some(RetryReason::Persist) {
			match self.dispatcher.dispatch(&record).await {
				Ok(processor) => {
					payment.processed_by = Some(processor);
					payment.retry = None;
				}
				Err(e) => {
					error!(
						"Failed to send payment {}: {e}",
						payment.correlation_id
					);
					payment.retry = Some(RetryReason::Send);
					return ProcessOutcome::Retry(RetryReason::Send);
				}
			}
		}

		// Unreachable unless a send succeeded on this or a prior attempt.
		let processor = payment.processed_by.unwrap_or(ProcessorKind::Default);

		if let Err(e) = self.payment_repo.save(&record, processor).await {
			error!(
				"Failed to persist payment {}: {e}",
				payment.correlation_id
			);
			payment.retry = Some(RetryReason::Persist);
			return ProcessOutcome::Retry(RetryReason::Persist);
		}

		self.ledger.mark_completed(payment.correlation_id);
		info!(
			"Payment {} completed via {} processor",
			payment.correlation_id,
			processor.as_str()
		);

		ProcessOutcome::Completed
	}
}
