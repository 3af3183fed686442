use thiserror::Error;

use crate::body_set::BodyId;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PhysicsError {
	#[error("timestep {0} is not a positive finite number")]
	InvalidTimestep(f32),
	#[error("mass {0} is not positive (use infinity to pin a body)")]
	InvalidMass(f32),
	#[error("constraint joins two pinned endpoints")]
	PinnedPair,
	#[error("no body with id {0:?}")]
	UnknownBody(BodyId),
	#[error("source {0:?} is also a constraint target")]
	SourceIsTarget(BodyId),
	#[error("constraint has no anchor and no source body")]
	MissingAnchor,
}
