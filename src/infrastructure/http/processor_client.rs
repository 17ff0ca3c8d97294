use async_trait::async_trait;
use derive_more::derive::{Display, Error};
use log::debug;
use reqwest::Client;

use crate::domain::dispatcher::{DispatchError, PaymentDispatcher};
use crate::domain::payment::{DispatchRecord, ProcessorKind};
use crate::infrastructure::routing::routing_state::RoutingState;

#[derive(Debug, Display, Error)]
pub enum ProcessorClientError {
	#[display("processor base urls cannot be empty")]
	EmptyBaseUrl,
}

/// Outbound client for both downstream processors. Which one receives a
/// given record is decided per send by the shared routing verdict.
#[derive(Clone)]
pub struct ProcessorClient {
	http_client:  Client,
	routing:      RoutingState,
	default_url:  String,
	fallback_url: String,
}

impl ProcessorClient {
	pub fn new(
		http_client: Client,
		routing: RoutingState,
		default_url: String,
		fallback_url: String,
	) -> Result<Self, ProcessorClientError> {
		if default_url.is_empty() || fallback_url.is_empty() {
			return Err(ProcessorClientError::EmptyBaseUrl);
		}

		Ok(Self {
			http_client,
			routing,
			default_url: default_url.trim_end_matches('/').to_string(),
			fallback_url: fallback_url.trim_end_matches('/').to_string(),
		})
	}

	fn base_url(&self, processor: ProcessorKind) -> &str {
		match processor {
			ProcessorKind::Default => &self.default_url,
			ProcessorKind::Fallback => &self.fallback_url,
		}
	}
}

#[async_trait]
impl PaymentDispatcher for ProcessorClient {
	async fn dispatch(
		&self,
		record: &DispatchRecord,
	) -> Result<ProcessorKind, DispatchError> {
		// Backpressure valve: while both processors are failing no send is
		// attempted at all.
		let processor = self.routing.select_processor().await;

		debug!(
			"Sending payment {} to {} processor",
			record.correlation_id,
			processor.as_str()
		);

		let response = self
			.http_client
			.post(format!("{}/payments", self.base_url(processor)))
			.json(record)
			.send()
			.await
			.map_err(|e| DispatchError::Unreachable {
				message: e.to_string(),
			})?;

		if !response.status().is_success() {
			return Err(DispatchError::Rejected {
				status: response.status().as_u16(),
			});
		}

		Ok(processor)
	}
}
