use approx::assert_relative_eq;

use impulse::body::Body;
use impulse::constraint::distance::DistanceConstraint;
use impulse::error::PhysicsError;
use impulse::world::World;
use impulse::V3;

const DT: f32 = 1. / 60.;

#[test]
fn rigid_limit_corrects_in_one_step() {
	let mut world = World::new();
	let id = world.add_body(Body::new(V3::new(2., 0., 0.), 1.).unwrap());
	world
		.attach(
			DistanceConstraint::new()
				.with_length(1.)
				.with_anchor(V3::zeros())
				.build(),
			vec![id],
			None,
		)
		.unwrap();
	world.step(DT).unwrap();
	let body = world.body(id).unwrap();
	// beta 1 turns the whole overstretch into closing velocity
	assert_relative_eq!(body.velocity[0], -1. / DT, epsilon = 1e-3);
	assert_relative_eq!(body.position.norm(), 1., epsilon = 1e-4);
}

#[test]
fn newtons_third_law_conserves_momentum() {
	let mut world = World::new();
	let a = world.add_body(Body::new(V3::new(2., 0., 0.), 1.).unwrap());
	let b = world.add_body(Body::new(V3::zeros(), 2.).unwrap());
	world
		.attach(
			DistanceConstraint::new().with_length(1.).build(),
			vec![a],
			Some(b),
		)
		.unwrap();
	world.step(DT).unwrap();
	let va = world.body(a).unwrap().velocity;
	let vb = world.body(b).unwrap().velocity;
	// started at rest, internal impulses cancel pairwise
	assert_relative_eq!((va + vb * 2.).norm(), 0., epsilon = 1e-4);
	assert!(va[0] < 0f32);
	assert!(vb[0] > 0f32);
}

#[test]
fn momentum_conserved_across_shared_source() {
	let mut world = World::new();
	let a = world.add_body(Body::new(V3::new(2., 0., 0.), 1.).unwrap());
	let b = world.add_body(Body::new(V3::new(0., 3., 0.), 1.).unwrap());
	let s = world.add_body(Body::new(V3::zeros(), 4.).unwrap());
	world
		.attach(
			DistanceConstraint::new().with_length(1.).build(),
			vec![a, b],
			Some(s),
		)
		.unwrap();
	world.step(DT).unwrap();
	let momentum = world.body(a).unwrap().velocity
		+ world.body(b).unwrap().velocity
		+ world.body(s).unwrap().velocity * 4.;
	assert_relative_eq!(momentum.norm(), 0., epsilon = 1e-3);
}

#[test]
fn doubling_both_masses_keeps_velocity_change() {
	let run = |mass: f32| {
		let mut world = World::new();
		let a = world.add_body(Body::new(V3::new(2., 0., 0.), mass).unwrap());
		let b = world.add_body(Body::new(V3::zeros(), mass).unwrap());
		world
			.attach(
				DistanceConstraint::new().with_length(1.).build(),
				vec![a],
				Some(b),
			)
			.unwrap();
		world.step(DT).unwrap();
		(
			world.body(a).unwrap().velocity,
			world.body(b).unwrap().velocity,
		)
	};
	let (a1, b1) = run(1.);
	let (a2, b2) = run(2.);
	// impulse doubles with effective mass, delta v stays put
	assert_relative_eq!(a1[0], a2[0], epsilon = 1e-5);
	assert_relative_eq!(b1[0], b2[0], epsilon = 1e-5);
}

#[test]
fn anchor_shapes_give_identical_results() {
	let run = |world: &mut World, con: DistanceConstraint| {
		let id = world.add_body(Body::new(V3::new(2., 1., 0.), 1.).unwrap());
		world.attach(con.with_length(1.).build(), vec![id], None).unwrap();
		world.step(DT).unwrap();
		world.body(id).unwrap().position
	};
	let mut w1 = World::new();
	let p1 = run(&mut w1, DistanceConstraint::new().with_anchor([0f32, 1., 0.]));
	let mut w2 = World::new();
	let p2 = run(
		&mut w2,
		DistanceConstraint::new().with_anchor(V3::new(0., 1., 0.)),
	);
	let mut w3 = World::new();
	let pin = w3.add_body(Body::pinned(V3::new(0., 1., 0.)));
	let p3 = run(&mut w3, DistanceConstraint::new().with_anchor(pin));
	assert_eq!(p1, p2);
	assert_eq!(p1, p3);
}

#[test]
fn rope_stays_slack_inside_min_length() {
	let mut world = World::new();
	let id = world.add_body(
		Body::new(V3::new(1.2, 0., 0.), 1.)
			.unwrap()
			.with_velocity(V3::new(0.5, 0., 0.)),
	);
	world
		.attach(
			DistanceConstraint::new()
				.with_length(1.)
				.with_min_length(0.5)
				.with_anchor(V3::zeros())
				.build(),
			vec![id],
			None,
		)
		.unwrap();
	world.step(DT).unwrap();
	let body = world.body(id).unwrap();
	assert_eq!(body.velocity, V3::new(0.5, 0., 0.));
	assert_relative_eq!(body.position[0], 1.2 + 0.5 * DT, epsilon = 1e-6);
}

#[test]
fn rope_catches_once_taut() {
	let mut world = World::new();
	let id = world.add_body(
		Body::new(V3::new(1.2, 0., 0.), 1.)
			.unwrap()
			.with_velocity(V3::new(20., 0., 0.)),
	);
	world
		.attach(
			DistanceConstraint::new()
				.with_length(1.)
				.with_min_length(0.5)
				.with_anchor(V3::zeros())
				.build(),
			vec![id],
			None,
		)
		.unwrap();
	// flies through the slack band, then the rope snaps taut
	let mut caught = false;
	for _ in 0..30 {
		world.step(DT).unwrap();
		if world.body(id).unwrap().velocity[0] < 1. {
			caught = true;
			break;
		}
	}
	assert!(caught);
}

#[test]
fn soft_distance_settles_at_length() {
	let mut world = World::new();
	let id = world.add_body(Body::new(V3::new(2.5, 0., 0.), 1.).unwrap());
	world
		.attach(
			DistanceConstraint::new()
				.with_length(1.)
				.with_period(0.5)
				.with_damping_ratio(1.)
				.with_anchor(V3::zeros())
				.build(),
			vec![id],
			None,
		)
		.unwrap();
	for _ in 0..300 {
		world.step(DT).unwrap();
	}
	let body = world.body(id).unwrap();
	assert_relative_eq!(body.position.norm(), 1., epsilon = 0.05);
	assert!(body.velocity.norm() < 0.05);
}

#[test]
fn attach_then_remove_source_detaches() {
	let mut world = World::new();
	let a = world.add_body(Body::new(V3::new(2., 0., 0.), 1.).unwrap());
	let s = world.add_body(Body::new(V3::zeros(), 1.).unwrap());
	let cid = world
		.attach(
			DistanceConstraint::new().with_length(1.).build(),
			vec![a],
			Some(s),
		)
		.unwrap();
	world.remove_body(s);
	assert!(world.constraint::<DistanceConstraint>(cid).is_none());
	world.step(DT).unwrap();
	// target keeps coasting, nothing pulls it any more
	assert_eq!(world.body(a).unwrap().velocity, V3::zeros());
}

#[test]
fn pinned_pair_surfaces_from_step() {
	let mut world = World::new();
	let a = world.add_body(Body::pinned(V3::new(2., 0., 0.)));
	let b = world.add_body(Body::pinned(V3::zeros()));
	world
		.attach(
			DistanceConstraint::new().with_length(1.).build(),
			vec![a],
			Some(b),
		)
		.unwrap();
	assert_eq!(world.step(DT), Err(PhysicsError::PinnedPair));
}

#[test]
fn nan_position_skips_only_that_target() {
	let mut world = World::new();
	let poisoned = world.add_body(Body::new(V3::new(2., 0., 0.), 1.).unwrap());
	let healthy = world.add_body(Body::new(V3::new(3., 0., 0.), 1.).unwrap());
	world
		.attach(
			DistanceConstraint::new()
				.with_length(1.)
				.with_anchor(V3::zeros())
				.build(),
			vec![poisoned, healthy],
			None,
		)
		.unwrap();
	world.body_mut(poisoned).unwrap().position[0] = f32::NAN;
	world.step(DT).unwrap();
	// the degenerate target keeps its velocity, the finite one is corrected
	assert_eq!(world.body(poisoned).unwrap().velocity, V3::zeros());
	let corrected = world.body(healthy).unwrap();
	assert!(corrected.velocity[0] < 0f32);
	assert!(corrected.velocity.norm().is_finite());
	assert_relative_eq!(corrected.position.norm(), 1., epsilon = 1e-4);
}
