use tracing::debug;

use math::V3;

use crate::body::Body;
use crate::body_set::{BodyId, BodySet};
use crate::constraint::Constraint;
use crate::error::PhysicsError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintId(usize);

#[derive(Clone, Debug)]
struct Attachment {
	id: ConstraintId,
	constraint: Box<dyn Constraint>,
	targets: Vec<BodyId>,
	source: Option<BodyId>,
}

#[derive(Clone, Debug)]
pub struct World {
	bodies: BodySet,
	attachments: Vec<Attachment>,
	gravity: V3,
	iterations: usize,
	next_constraint: usize,
}

impl Default for World {
	fn default() -> Self {
		Self {
			bodies: BodySet::new(),
			attachments: Vec::new(),
			gravity: V3::zeros(),
			iterations: 1,
			next_constraint: 0,
		}
	}
}

impl World {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_gravity(mut self, gravity: V3) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_iterations(mut self, iterations: usize) -> Self {
		self.iterations = iterations.max(1);
		self
	}

	pub fn set_gravity(&mut self, gravity: V3) {
		self.gravity = gravity;
	}

	pub fn add_body(&mut self, body: Body) -> BodyId {
		let id = self.bodies.insert(body);
		debug!("add body {:?}", id);
		id
	}

	// dependent attachments go with the body
	pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
		let body = self.bodies.remove(id)?;
		let before = self.attachments.len();
		self.attachments.retain(|a| {
			a.source != Some(id)
				&& !a.targets.contains(&id)
				&& !a.constraint.references_body(id)
		});
		debug!(
			"remove body {:?}, pruned {} attachments",
			id,
			before - self.attachments.len()
		);
		Some(body)
	}

	pub fn body(&self, id: BodyId) -> Option<&Body> {
		self.bodies.get(id)
	}

	pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
		self.bodies.get_mut(id)
	}

	pub fn bodies(&self) -> &BodySet {
		&self.bodies
	}

	pub fn attach(
		&mut self,
		constraint: Box<dyn Constraint>,
		targets: Vec<BodyId>,
		source: Option<BodyId>,
	) -> Result<ConstraintId, PhysicsError> {
		for &t in targets.iter() {
			if !self.bodies.contains(t) {
				return Err(PhysicsError::UnknownBody(t));
			}
		}
		if let Some(s) = source {
			if !self.bodies.contains(s) {
				return Err(PhysicsError::UnknownBody(s));
			}
			if targets.contains(&s) {
				return Err(PhysicsError::SourceIsTarget(s));
			}
		}
		let id = ConstraintId(self.next_constraint);
		self.next_constraint += 1;
		self.attachments.push(Attachment {
			id,
			constraint,
			targets,
			source,
		});
		debug!("attach constraint {:?}", id);
		Ok(id)
	}

	// keeps the remaining attachments in registration order
	pub fn detach(&mut self, id: ConstraintId) -> Option<Box<dyn Constraint>> {
		let idx = self.attachments.iter().position(|a| a.id == id)?;
		let att = self.attachments.remove(idx);
		debug!("detach constraint {:?}", id);
		Some(att.constraint)
	}

	pub fn constraint<C: Constraint + 'static>(
		&self,
		id: ConstraintId,
	) -> Option<&C> {
		self.attachments
			.iter()
			.find(|a| a.id == id)
			.and_then(|a| a.constraint.as_any().downcast_ref::<C>())
	}

	pub fn constraint_mut<C: Constraint + 'static>(
		&mut self,
		id: ConstraintId,
	) -> Option<&mut C> {
		self.attachments
			.iter_mut()
			.find(|a| a.id == id)
			.and_then(|a| a.constraint.as_any_mut().downcast_mut::<C>())
	}

	pub fn step(&mut self, dt: f32) -> Result<(), PhysicsError> {
		if !dt.is_finite() || dt <= 0f32 {
			return Err(PhysicsError::InvalidTimestep(dt));
		}
		if self.gravity != V3::zeros() {
			for (_, body) in self.bodies.iter_mut() {
				if !body.is_pinned() {
					body.velocity += self.gravity * dt;
				}
			}
		}
		// velocities settle before any position moves
		for _ in 0..self.iterations {
			for att in self.attachments.iter_mut() {
				att.constraint.apply(
					&att.targets,
					att.source,
					&mut self.bodies,
					dt,
				)?;
			}
		}
		for (_, body) in self.bodies.iter_mut() {
			body.position += body.velocity * dt;
		}
		Ok(())
	}

	pub fn kinetic_energy(&self) -> f32 {
		self.bodies.iter().map(|(_, b)| b.kinetic_energy()).sum()
	}
}
