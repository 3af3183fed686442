pub mod distance;
pub mod snap;

use std::any::Any;
use std::f32::consts::PI;
use std::fmt;

use dyn_clone::DynClone;

use math::V3;

use crate::body_set::{BodyId, BodySet};
use crate::error::PhysicsError;

pub trait Constraint: DynClone + Send + Sync + fmt::Debug {
	// dt must be positive and finite, the world checks before calling
	fn apply(
		&mut self,
		targets: &[BodyId],
		source: Option<BodyId>,
		bodies: &mut BodySet,
		dt: f32,
	) -> Result<(), PhysicsError>;

	fn references_body(&self, _id: BodyId) -> bool {
		false
	}

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;
}

dyn_clone::clone_trait_object!(Constraint);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
	Point(V3),
	Body(BodyId),
}

impl Anchor {
	// body anchors track the body but never receive impulses
	pub fn resolve(&self, bodies: &BodySet) -> Result<V3, PhysicsError> {
		match *self {
			Anchor::Point(p) => Ok(p),
			Anchor::Body(id) => bodies
				.get(id)
				.map(|b| b.position)
				.ok_or(PhysicsError::UnknownBody(id)),
		}
	}

	pub fn references(&self, id: BodyId) -> bool {
		matches!(*self, Anchor::Body(b) if b == id)
	}
}

impl From<V3> for Anchor {
	fn from(p: V3) -> Self {
		Anchor::Point(p)
	}
}

impl From<[f32; 3]> for Anchor {
	fn from(p: [f32; 3]) -> Self {
		Anchor::Point(V3::from(p))
	}
}

impl From<BodyId> for Anchor {
	fn from(id: BodyId) -> Self {
		Anchor::Body(id)
	}
}

// period 0 degenerates to the rigid pair gamma 0, beta 1
pub(crate) fn soft_coefficients(
	period: f32,
	damping_ratio: f32,
	eff_mass: f32,
	dt: f32,
) -> (f32, f32) {
	if period <= 0f32 {
		return (0f32, 1f32);
	}
	let c = 4f32 * eff_mass * PI * damping_ratio / period;
	let k = 4f32 * eff_mass * PI * PI / (period * period);
	let gamma = 1f32 / (c + dt * k);
	let beta = dt * k / (c + dt * k);
	(gamma, beta)
}

pub(crate) fn check_source(
	targets: &[BodyId],
	source: Option<BodyId>,
) -> Result<(), PhysicsError> {
	if let Some(id) = source {
		if targets.contains(&id) {
			return Err(PhysicsError::SourceIsTarget(id));
		}
	}
	Ok(())
}
