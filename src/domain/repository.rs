use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::payment::{DispatchRecord, ProcessorKind};

#[async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
	/// Persists the record under the processor that handled it. Upsert
	/// keyed by correlation id; last write wins on conflict.
	async fn save(
		&self,
		record: &DispatchRecord,
		processor: ProcessorKind,
	) -> Result<(), Box<dyn std::error::Error + Send>>;

	/// Count and amount total for one processor bucket, filtered by an
	/// optional inclusive `requested_at` range. Zero-filled when no
	/// records match.
	async fn get_summary(
		&self,
		processor: ProcessorKind,
		from: Option<OffsetDateTime>,
		to: Option<OffsetDateTime>,
	) -> Result<(usize, f64), Box<dyn std::error::Error + Send>>;

	async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send>>;
}

/// Lets callers share one repository behind an `Arc`.
#[async_trait]
impl<R: PaymentRepository> PaymentRepository for std::sync::Arc<R> {
	async fn save(
		&self,
		record: &DispatchRecord,
		processor: ProcessorKind,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		(**self).save(record, processor).await
	}

	async fn get_summary(
		&self,
		processor: ProcessorKind,
		from: Option<OffsetDateTime>,
		to: Option<OffsetDateTime>,
	) -> Result<(usize, f64), Box<dyn std::error::Error + Send>> {
		(**self).get_summary(processor, from, to).await
	}

	async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send>> {
		(**self).clear().await
	}
}
