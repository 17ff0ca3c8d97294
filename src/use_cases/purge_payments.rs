use crate::domain::repository::PaymentRepository;

/// Drops every persisted dispatch record, resetting the summary to zero.
/// The completion ledger is untouched: a purged payment stays completed.
#[derive(Clone)]
pub struct PurgePaymentsUseCase<R: PaymentRepository> {
	payment_repo: R,
}

impl<R: PaymentRepository> PurgePaymentsUseCase<R> {
	pub fn new(payment_repo: R) -> Self {
		Self { payment_repo }
	}

	pub async fn execute(&self) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.payment_repo.clear().await
	}
}
