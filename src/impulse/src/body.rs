use math::V3;

use crate::error::PhysicsError;

#[derive(Clone, Copy, Debug)]
pub struct Body {
	pub position: V3,
	pub velocity: V3,
	mass: f32,
	inverse_mass: f32,
}

fn checked_inverse(mass: f32) -> Result<f32, PhysicsError> {
	if mass.is_nan() || mass <= 0f32 {
		return Err(PhysicsError::InvalidMass(mass));
	}
	if mass.is_infinite() {
		Ok(0f32)
	} else {
		Ok(1f32 / mass)
	}
}

impl Body {
	pub fn new(position: V3, mass: f32) -> Result<Self, PhysicsError> {
		let inverse_mass = checked_inverse(mass)?;
		Ok(Self {
			position,
			velocity: V3::zeros(),
			mass,
			inverse_mass,
		})
	}

	// infinite mass, never displaced by impulses
	pub fn pinned(position: V3) -> Self {
		Self {
			position,
			velocity: V3::zeros(),
			mass: f32::INFINITY,
			inverse_mass: 0f32,
		}
	}

	pub fn with_velocity(mut self, velocity: V3) -> Self {
		self.velocity = velocity;
		self
	}

	pub fn mass(&self) -> f32 {
		self.mass
	}

	pub fn inverse_mass(&self) -> f32 {
		self.inverse_mass
	}

	pub fn is_pinned(&self) -> bool {
		self.inverse_mass == 0f32
	}

	pub fn set_mass(&mut self, mass: f32) -> Result<(), PhysicsError> {
		self.inverse_mass = checked_inverse(mass)?;
		self.mass = mass;
		Ok(())
	}

	pub fn apply_impulse(&mut self, impulse: V3) {
		self.velocity += impulse * self.inverse_mass;
	}

	pub fn kinetic_energy(&self) -> f32 {
		if self.is_pinned() {
			return 0f32;
		}
		0.5 * self.mass * self.velocity.norm_squared()
	}
}
