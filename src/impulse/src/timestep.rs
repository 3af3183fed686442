use tracing::warn;

use math::EPS;

// turns variable frame deltas into whole fixed steps, the caller
// supplies elapsed seconds and runs world.step once per returned step
#[derive(Clone, Copy, Debug)]
pub struct FixedTimestep {
	dt: f32,
	accumulator: f32,
	max_steps: u32,
}

impl Default for FixedTimestep {
	fn default() -> Self {
		Self::new(1. / 60.)
	}
}

impl FixedTimestep {
	pub fn new(dt: f32) -> Self {
		Self {
			// dt must stay positive, advance divides by it
			dt: dt.max(EPS),
			accumulator: 0f32,
			max_steps: 8,
		}
	}

	pub fn with_max_steps(mut self, max_steps: u32) -> Self {
		self.max_steps = max_steps.max(1);
		self
	}

	pub fn dt(&self) -> f32 {
		self.dt
	}

	pub fn advance(&mut self, elapsed: f32) -> u32 {
		if !elapsed.is_finite() || elapsed < 0f32 {
			warn!("ignoring elapsed time {}", elapsed);
			return 0;
		}
		self.accumulator += elapsed;
		// prevent runaway catch-up after a stall
		let cap = self.dt * self.max_steps as f32;
		if self.accumulator > cap {
			warn!("clamping accumulated time {}", self.accumulator);
			self.accumulator = cap;
		}
		let steps = (self.accumulator / self.dt) as u32;
		self.accumulator -= steps as f32 * self.dt;
		steps
	}

	// fraction of a step left over, for render interpolation
	pub fn alpha(&self) -> f32 {
		self.accumulator / self.dt
	}

	pub fn reset(&mut self) {
		self.accumulator = 0f32;
	}
}
