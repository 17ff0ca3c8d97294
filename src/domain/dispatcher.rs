use async_trait::async_trait;
use derive_more::derive::{Display, Error};

use crate::domain::payment::{DispatchRecord, ProcessorKind};

/// A transient outbound send failure. The dispatcher performs no retry
/// itself; the caller owns the retry policy.
#[derive(Debug, Display, Error)]
pub enum DispatchError {
	#[display("processor returned status {status}")]
	Rejected { status: u16 },
	#[display("failed to reach processor: {message}")]
	Unreachable { message: String },
}

#[async_trait]
pub trait PaymentDispatcher: Send + Sync + 'static {
	/// Issues exactly one outbound send of the record to the processor the
	/// current routing verdict selects, blocking first while the verdict's
	/// wait flag is set. Reports which processor was used.
	async fn dispatch(
		&self,
		record: &DispatchRecord,
	) -> Result<ProcessorKind, DispatchError>;
}
