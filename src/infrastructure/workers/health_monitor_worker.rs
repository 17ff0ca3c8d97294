use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::domain::health::HealthSnapshot;
use crate::infrastructure::routing::routing_state::RoutingState;

/// Probe cadence. The processors rate-limit their health endpoints to one
/// call per five seconds, so the cycle sits just above that.
pub const PROBE_INTERVAL: Duration = Duration::from_millis(5200);

/// Periodically probes both processors and folds the results into the
/// shared routing verdict. Cycles never overlap; both probes of a cycle
/// run concurrently and the verdict is updated once both have finished.
///
/// The worker stops at the next cycle boundary after the shutdown channel
/// fires; an in-flight cycle is allowed to finish.
pub async fn health_monitor_worker(
	routing: RoutingState,
	http_client: Client,
	default_url: String,
	fallback_url: String,
	mut shutdown: watch::Receiver<bool>,
) {
	let mut interval = tokio::time::interval(PROBE_INTERVAL);
	interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

	loop {
		tokio::select! {
			_ = interval.tick() => {
				let (default, fallback) = tokio::join!(
					probe(&http_client, &default_url),
					probe(&http_client, &fallback_url),
				);

				routing.apply(default.as_ref(), fallback.as_ref());

				debug!(
					"Probe cycle done (default: {default:?}, fallback: \
					 {fallback:?}); verdict now {:?}",
					routing.current()
				);
			}
			_ = shutdown.changed() => {
				debug!("Health monitor stopping");
				break;
			}
		}
	}
}

/// Fetches one processor's health snapshot. Any failure (transport error,
/// non-success status, unparsable body) yields `None`, which the verdict
/// treats as no information rather than as a failing processor.
pub async fn probe(http_client: &Client, base_url: &str) -> Option<HealthSnapshot> {
	let health_url = format!(
		"{}/payments/service-health",
		base_url.trim_end_matches('/')
	);

	let response = match http_client.get(&health_url).send().await {
		Ok(response) => response,
		Err(e) => {
			warn!("Health probe of {base_url} failed: {e}");
			return None;
		}
	};

	if !response.status().is_success() {
		warn!(
			"Health probe of {base_url} returned status {}",
			response.status()
		);
		return None;
	}

	match response.json::<HealthSnapshot>().await {
		Ok(snapshot) => Some(snapshot),
		Err(e) => {
			warn!("Health probe of {base_url} returned an unreadable body: {e}");
			None
		}
	}
}
