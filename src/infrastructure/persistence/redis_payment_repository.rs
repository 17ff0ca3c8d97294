use async_trait::async_trait;
use redis::{Client, Script};
use time::OffsetDateTime;

use crate::domain::payment::{DispatchRecord, ProcessorKind};
use crate::domain::repository::PaymentRepository;
use crate::infrastructure::config::redis::{
	PAYMENT_KEY_PREFIX, PAYMENTS_INDEX_KEY,
};

/// Redis-backed payment store: one hash per payment plus a sorted-set
/// index scored by request timestamp. Re-saving a correlation id rewrites
/// the hash and re-scores the index entry, which gives the upsert
/// last-write-wins semantics the summary relies on.
#[derive(Clone)]
pub struct RedisPaymentRepository {
	client: Client,
}

impl RedisPaymentRepository {
	pub fn new(client: Client) -> Self {
		Self { client }
	}

	fn unix_millis(instant: OffsetDateTime) -> i64 {
		(instant.unix_timestamp_nanos() / 1_000_000) as i64
	}
}

#[async_trait]
impl PaymentRepository for RedisPaymentRepository {
	async fn save(
		&self,
		record: &DispatchRecord,
		processor: ProcessorKind,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut con = self
			.client
			.get_multiplexed_async_connection()
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;

		let payment_id = record.correlation_id.to_string();
		let payment_key = format!("{PAYMENT_KEY_PREFIX}{payment_id}");
		let requested_at = Self::unix_millis(record.requested_at);

		redis::pipe()
			.atomic()
			.hset_multiple(&payment_key, &[
				("amount", record.amount.to_string()),
				("processor", processor.as_str().to_string()),
				("requested_at", requested_at.to_string()),
			])
			.ignore()
			.zadd(PAYMENTS_INDEX_KEY, payment_id, requested_at)
			.ignore()
			.query_async::<()>(&mut con)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;

		Ok(())
	}

	async fn get_summary(
		&self,
		processor: ProcessorKind,
		from: Option<OffsetDateTime>,
		to: Option<OffsetDateTime>,
	) -> Result<(usize, f64), Box<dyn std::error::Error + Send>> {
		let mut con = self
			.client
			.get_multiplexed_async_connection()
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;

		let from = from
			.map(|instant| Self::unix_millis(instant).to_string())
			.unwrap_or_else(|| "-inf".to_string());
		let to = to
			.map(|instant| Self::unix_millis(instant).to_string())
			.unwrap_or_else(|| "+inf".to_string());

		let script = Script::new(
			r#"
            local ids = redis.call("ZRANGEBYSCORE", KEYS[1], ARGV[1], ARGV[2])
            local total_requests = 0
            local total_amount = 0.0

            for _, id in ipairs(ids) do
                local data = redis.call("HMGET", ARGV[4] .. id, "amount", "processor")
                if data[1] and data[2] == ARGV[3] then
                    total_requests = total_requests + 1
                    total_amount = total_amount + tonumber(data[1])
                end
            end

            return {tostring(total_requests), tostring(total_amount)}
        "#,
		);

		let (total_requests, total_amount): (String, String) = script
			.key(PAYMENTS_INDEX_KEY)
			.arg(from)
			.arg(to)
			.arg(processor.as_str())
			.arg(PAYMENT_KEY_PREFIX)
			.invoke_async(&mut con)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;

		Ok((
			total_requests.parse().unwrap_or_default(),
			total_amount.parse().unwrap_or_default(),
		))
	}

	async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut con = self
			.client
			.get_multiplexed_async_connection()
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;

		let script = Script::new(
			r#"
            local ids = redis.call("ZRANGE", KEYS[1], 0, -1)
            for _, id in ipairs(ids) do
                redis.call("DEL", ARGV[1] .. id)
            end
            redis.call("DEL", KEYS[1])
            return redis.status_reply("OK")
        "#,
		);

		let _: () = script
			.key(PAYMENTS_INDEX_KEY)
			.arg(PAYMENT_KEY_PREFIX)
			.invoke_async(&mut con)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)?;

		Ok(())
	}
}
