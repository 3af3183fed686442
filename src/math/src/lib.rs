pub type V3 = nalgebra::Vector3<f32>;

pub const EPS: f32 = 1e-6;

pub trait VecExt {
	fn unit_or_x(&self) -> V3;
}

impl VecExt for V3 {
	// zero-length input resolves to the x axis
	fn unit_or_x(&self) -> V3 {
		self.try_normalize(EPS).unwrap_or_else(V3::x)
	}
}
