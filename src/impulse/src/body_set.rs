use crate::body::Body;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(pub(crate) usize);

// slot arena, removed slots stay as tombstones so ids are never reused
#[derive(Clone, Debug, Default)]
pub struct BodySet {
	slots: Vec<Option<Body>>,
}

impl BodySet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, body: Body) -> BodyId {
		self.slots.push(Some(body));
		BodyId(self.slots.len() - 1)
	}

	pub fn get(&self, id: BodyId) -> Option<&Body> {
		self.slots.get(id.0)?.as_ref()
	}

	pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
		self.slots.get_mut(id.0)?.as_mut()
	}

	pub fn remove(&mut self, id: BodyId) -> Option<Body> {
		self.slots.get_mut(id.0)?.take()
	}

	pub fn contains(&self, id: BodyId) -> bool {
		self.get(id).is_some()
	}

	pub fn len(&self) -> usize {
		self.slots.iter().filter(|s| s.is_some()).count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
		self.slots
			.iter()
			.enumerate()
			.filter_map(|(i, s)| s.as_ref().map(|b| (BodyId(i), b)))
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut Body)> {
		self.slots
			.iter_mut()
			.enumerate()
			.filter_map(|(i, s)| s.as_mut().map(|b| (BodyId(i), b)))
	}
}
