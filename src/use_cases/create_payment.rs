use crate::domain::payment::Payment;
use crate::domain::queue::Queue;
use crate::use_cases::dto::CreatePaymentCommand;

/// Intake boundary: turns a validated request into a queued payment. The
/// queue's capacity bound is what pushes back on the caller under load.
#[derive(Clone)]
pub struct CreatePaymentUseCase<Q: Queue<Payment>> {
	payment_queue: Q,
}

impl<Q: Queue<Payment>> CreatePaymentUseCase<Q> {
	pub fn new(payment_queue: Q) -> Self {
		Self { payment_queue }
	}

	pub async fn execute(
		&self,
		command: CreatePaymentCommand,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let payment = Payment::new(command.correlation_id, command.amount);

		self.payment_queue.push(payment).await
	}
}
