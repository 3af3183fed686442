use std::any::Any;

use tracing::warn;

use math::{V3, VecExt};

use crate::body_set::{BodyId, BodySet};
use crate::constraint::{check_source, soft_coefficients, Anchor, Constraint};
use crate::error::PhysicsError;

// keeps each target a fixed distance from an anchor or a source body,
// going slack inside min_length
#[derive(Clone, Debug, Default)]
pub struct DistanceConstraint {
	anchor: Option<Anchor>,
	length: f32,
	min_length: f32,
	period: f32,
	damping_ratio: f32,
}

impl DistanceConstraint {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_length(mut self, length: f32) -> Self {
		self.length = length;
		self
	}

	// slack band around the rest length, the rope effect
	pub fn with_min_length(mut self, min_length: f32) -> Self {
		self.min_length = min_length.max(0f32);
		self
	}

	// period 0 keeps the constraint rigid
	pub fn with_period(mut self, period: f32) -> Self {
		self.period = period.max(0f32);
		self
	}

	pub fn with_damping_ratio(mut self, damping_ratio: f32) -> Self {
		self.damping_ratio = damping_ratio.max(0f32);
		self
	}

	pub fn with_anchor(mut self, anchor: impl Into<Anchor>) -> Self {
		self.anchor = Some(anchor.into());
		self
	}

	pub fn set_anchor(&mut self, anchor: impl Into<Anchor>) {
		self.anchor = Some(anchor.into());
	}

	pub fn build(self) -> Box<dyn Constraint> {
		Box::new(self)
	}
}

impl Constraint for DistanceConstraint {
	fn apply(
		&mut self,
		targets: &[BodyId],
		source: Option<BodyId>,
		bodies: &mut BodySet,
		dt: f32,
	) -> Result<(), PhysicsError> {
		check_source(targets, source)?;
		for &target in targets {
			let body = bodies
				.get(target)
				.ok_or(PhysicsError::UnknownBody(target))?;
			let p1 = body.position;
			let v1 = body.velocity;
			let w1 = body.inverse_mass();

			// endpoint state is re-read every pass so later targets
			// see the impulses applied for earlier ones
			let (p2, v2, w2) = match source {
				Some(id) => {
					let src =
						bodies.get(id).ok_or(PhysicsError::UnknownBody(id))?;
					(src.position, src.velocity, src.inverse_mass())
				}
				None => {
					let anchor =
						self.anchor.ok_or(PhysicsError::MissingAnchor)?;
					(anchor.resolve(bodies)?, V3::zeros(), 0f32)
				}
			};

			let diff_p = p1 - p2;
			let n = diff_p.unit_or_x();
			let dist = diff_p.norm() - self.length;

			// rope slack
			if dist.abs() < self.min_length {
				continue;
			}
			if !dist.is_finite() {
				warn!("skipping target {:?}, separation {}", target, dist);
				continue;
			}
			if w1 + w2 == 0f32 {
				return Err(PhysicsError::PinnedPair);
			}

			let diff_v = v1 - v2;
			let eff_mass = 1f32 / (w1 + w2);
			let (gamma, beta) =
				soft_coefficients(self.period, self.damping_ratio, eff_mass, dt);
			let anti_drift = beta / dt * dist;
			let lambda =
				-(n.dot(&diff_v) + anti_drift) / (gamma + dt / eff_mass);
			let impulse = n * (dt * lambda);

			bodies
				.get_mut(target)
				.ok_or(PhysicsError::UnknownBody(target))?
				.apply_impulse(impulse);
			if let Some(id) = source {
				bodies
					.get_mut(id)
					.ok_or(PhysicsError::UnknownBody(id))?
					.apply_impulse(-impulse);
			}
		}
		Ok(())
	}

	fn references_body(&self, id: BodyId) -> bool {
		matches!(self.anchor, Some(a) if a.references(id))
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
