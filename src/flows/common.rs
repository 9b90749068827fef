//! Shared flow plumbing: instrumentation and folding errors into refusals.

// self
use crate::{
	_prelude::*,
	auth::Authentication,
	flows::FlowMetrics,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Runs `flow` inside its span and settles the outcome into an [`Authentication`].
///
/// `Ok` values are passed through; any [`Error`] becomes a `refused` result whose
/// message is the error's display text.
pub(crate) async fn settle<Fut>(
	kind: FlowKind,
	stage: &'static str,
	metrics: &FlowMetrics,
	flow: Fut,
) -> Authentication
where
	Fut: Future<Output = Result<Authentication>>,
{
	let span = FlowSpan::new(kind, stage);

	obs::record_flow_outcome(kind, FlowOutcome::Attempt);
	metrics.record_attempt(kind);

	match span.instrument(flow).await {
		Ok(authentication) => {
			obs::record_flow_outcome(kind, FlowOutcome::Success);
			metrics.record_granted(kind);

			authentication
		},
		Err(err) => {
			obs::record_flow_outcome(kind, FlowOutcome::Failure);
			metrics.record_refused(kind);

			refuse(kind, &err)
		},
	}
}

/// Converts an error into a `refused` result and logs it.
fn refuse(kind: FlowKind, err: &Error) -> Authentication {
	obs::record_refusal(kind, err);

	Authentication::refused(err.to_string())
}
