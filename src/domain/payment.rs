use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Which downstream processor handled (or should handle) a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorKind {
	Default,
	Fallback,
}

impl ProcessorKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ProcessorKind::Default => "default",
			ProcessorKind::Fallback => "fallback",
		}
	}

	pub fn is_default(&self) -> bool {
		matches!(self, ProcessorKind::Default)
	}
}

/// Why a processing attempt must be retried.
///
/// `Persist` means the send already succeeded and only the bookkeeping is
/// outstanding; a retry with this marker must not send again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
	Send,
	Persist,
}

/// A payment circulating through the intake queue. Mutated only by the
/// worker that currently owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
	pub correlation_id: Uuid,
	pub amount:         f64,
	pub processed_by:   Option<ProcessorKind>,
	pub retry:          Option<RetryReason>,
}

impl Payment {
	pub fn new(correlation_id: Uuid, amount: f64) -> Self {
		Self {
			correlation_id,
			amount,
			processed_by: None,
			retry: None,
		}
	}

	/// Derives the outbound record for one processing attempt. The
	/// timestamp is assigned here, fresh on every call, so a retried
	/// payment lands in the time bucket of its successful attempt.
	pub fn to_dispatch_record(&self) -> DispatchRecord {
		DispatchRecord {
			correlation_id: self.correlation_id,
			amount:         self.amount,
			requested_at:   OffsetDateTime::now_utc(),
		}
	}
}

/// The outbound, timestamped representation of a payment as the downstream
/// processors expect it: `{correlationId, amount, requestedAt}`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DispatchRecord {
	#[serde(rename = "correlationId")]
	pub correlation_id: Uuid,
	pub amount:         f64,
	#[serde(rename = "requestedAt", with = "iso_millis")]
	pub requested_at:   OffsetDateTime,
}

/// ISO-8601 UTC instants with exactly millisecond precision, e.g.
/// `2025-07-15T12:34:56.000Z`.
pub mod iso_millis {
	use serde::{Deserialize, Deserializer, Serializer};
	use time::format_description::BorrowedFormatItem;
	use time::macros::format_description;
	use time::{OffsetDateTime, PrimitiveDateTime};

	const FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
		"[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
	);

	pub fn format(instant: &OffsetDateTime) -> Result<String, time::error::Format> {
		instant.format(&FORMAT)
	}

	pub fn serialize<S>(
		instant: &OffsetDateTime,
		serializer: S,
	) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let formatted = format(instant).map_err(serde::ser::Error::custom)?;
		serializer.serialize_str(&formatted)
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		PrimitiveDateTime::parse(&raw, &FORMAT)
			.map(PrimitiveDateTime::assume_utc)
			.map_err(serde::de::Error::custom)
	}
}
