use serde::{Deserialize, Serialize};

/// One processor's answer to `GET /payments/service-health`.
///
/// A probe that errors, times out or returns a non-success status yields no
/// snapshot at all ("unknown"), which is deliberately distinct from a
/// snapshot with `failing: true`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HealthSnapshot {
	pub failing:           bool,
	#[serde(rename = "minResponseTime")]
	pub min_response_time: u64,
}

/// The shared routing decision: whether to send to the fallback processor
/// and whether to pause sending entirely.
///
/// `wait` set means no dispatch may be attempted until a later probe cycle
/// clears it; `send_to_fallback` is only meaningful while `wait` is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingVerdict {
	pub send_to_fallback: bool,
	pub wait:             bool,
}

/// How much slower the default processor may be before routing prefers the
/// fallback. The default processor carries lower per-transaction cost, so
/// it wins anything short of this ratio.
const FALLBACK_RESPONSE_TIME_RATIO: f64 = 2.0;

impl RoutingVerdict {
	/// Folds one probe cycle's pair of optional snapshots into the verdict.
	///
	/// An absent snapshot carries no information: with exactly one side
	/// unknown the previous decision stands. Both sides unknown resets to
	/// default routing and unblocks.
	pub fn observe(
		&mut self,
		default: Option<&HealthSnapshot>,
		fallback: Option<&HealthSnapshot>,
	) {
		let (default, fallback) = match (default, fallback) {
			(None, None) => {
				self.send_to_fallback = false;
				self.wait = false;
				return;
			}
			(None, Some(_)) | (Some(_), None) => return,
			(Some(default), Some(fallback)) => (default, fallback),
		};

		if default.failing && fallback.failing {
			self.wait = true;
			self.send_to_fallback = false;
			return;
		}

		if !default.failing {
			self.wait = false;
			if fallback.min_response_time > 0 {
				let ratio = default.min_response_time as f64 /
					fallback.min_response_time as f64;
				self.send_to_fallback = ratio >= FALLBACK_RESPONSE_TIME_RATIO;
			}
			// A zero fallback baseline makes the comparison meaningless;
			// the previous decision stands, as with an unknown snapshot.
			return;
		}

		// Default failing, fallback not.
		self.send_to_fallback = true;
		self.wait = false;
	}
}
