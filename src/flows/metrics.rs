// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::obs::FlowKind;

/// Snapshot of the counters kept for one credential flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowCounts {
	/// Attempts entered, including option-parsing failures.
	pub attempts: u64,
	/// Attempts that produced a token.
	pub granted: u64,
	/// Attempts that were refused.
	pub refused: u64,
}

#[derive(Debug, Default)]
struct Counters {
	attempts: AtomicU64,
	granted: AtomicU64,
	refused: AtomicU64,
}
impl Counters {
	fn snapshot(&self) -> FlowCounts {
		FlowCounts {
			attempts: self.attempts.load(Ordering::Relaxed),
			granted: self.granted.load(Ordering::Relaxed),
			refused: self.refused.load(Ordering::Relaxed),
		}
	}
}

/// Thread-safe authentication counters, split by credential flow.
#[derive(Debug, Default)]
pub struct FlowMetrics {
	access_token: Counters,
	id_token: Counters,
}
impl FlowMetrics {
	/// Returns the counters recorded for `kind`.
	pub fn flow(&self, kind: FlowKind) -> FlowCounts {
		self.counters(kind).snapshot()
	}

	/// Returns the total number of authentication attempts.
	pub fn attempts(&self) -> u64 {
		self.flow(FlowKind::AccessToken).attempts + self.flow(FlowKind::IdToken).attempts
	}

	/// Returns the number of attempts that produced a token.
	pub fn granted(&self) -> u64 {
		self.flow(FlowKind::AccessToken).granted + self.flow(FlowKind::IdToken).granted
	}

	/// Returns the number of attempts that were refused.
	pub fn refused(&self) -> u64 {
		self.flow(FlowKind::AccessToken).refused + self.flow(FlowKind::IdToken).refused
	}

	pub(crate) fn record_attempt(&self, kind: FlowKind) {
		self.counters(kind).attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_granted(&self, kind: FlowKind) {
		self.counters(kind).granted.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refused(&self, kind: FlowKind) {
		self.counters(kind).refused.fetch_add(1, Ordering::Relaxed);
	}

	fn counters(&self, kind: FlowKind) -> &Counters {
		match kind {
			FlowKind::AccessToken => &self.access_token,
			FlowKind::IdToken => &self.id_token,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn counters_are_kept_per_flow() {
		let metrics = FlowMetrics::default();

		metrics.record_attempt(FlowKind::AccessToken);
		metrics.record_granted(FlowKind::AccessToken);
		metrics.record_attempt(FlowKind::IdToken);
		metrics.record_refused(FlowKind::IdToken);
		metrics.record_attempt(FlowKind::IdToken);

		assert_eq!(
			metrics.flow(FlowKind::AccessToken),
			FlowCounts { attempts: 1, granted: 1, refused: 0 }
		);
		assert_eq!(metrics.flow(FlowKind::IdToken), FlowCounts { attempts: 2, granted: 0, refused: 1 });
		assert_eq!((metrics.attempts(), metrics.granted(), metrics.refused()), (3, 1, 1));
	}
}
