use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::assert_float_eq;
use crate::init_test_logger;
use crate::interactions::check_floor;
use crate::models::{BodyRef, FromCoordinates, Quaternion, Shape, Vector3};
use crate::utils::{PhysicsError, SimulationConfig};
use crate::world::World;

const DT: f32 = 1.0 / 60.0;

fn run(world: &mut World, frames: usize) {
    for _ in 0..frames {
        world.step(DT).unwrap();
    }
}

#[test]
fn test_sphere_comes_to_rest_and_sleeps() {
    init_test_logger();
    let mut world = World::new();
    let ball = world.add_sphere((0.0, 5.0, 0.0), 1.0, 1.0).unwrap();
    world.set_restitution(0.0).unwrap();

    run(&mut world, 600);

    let body = world.body(ball).unwrap();
    let slop = world.config().contact.penetration_slop;
    assert!((body.position.y - 1.0).abs() <= slop + 1e-6, "resting height {}", body.position.y);
    assert!(body.velocity.magnitude() < body.sleep_epsilon);
    assert!(!body.is_awake());
}

#[test]
fn test_static_body_never_moves() {
    init_test_logger();
    let mut world = World::new();
    let ground = world.add_box((0.0, 0.5, 0.0), (4.0, 1.0, 4.0), 0.0).unwrap();
    world.add_sphere((0.0, 4.0, 0.0), 0.5, 2.0).unwrap();
    world.add_cylinder((0.5, 6.0, 0.0), 0.5, 1.0, 1.0).unwrap();
    world.apply_force(ground, (100.0, 100.0, 0.0)).unwrap();

    run(&mut world, 300);

    let body = world.body(ground).unwrap();
    assert_eq!(body.force_accum, Vector3::zero());
    assert_eq!(body.position, Vector3::new(0.0, 0.5, 0.0));
    assert_eq!(body.velocity, Vector3::zero());
    assert_eq!(body.angular_velocity, Vector3::zero());
    assert_eq!(body.orientation, Quaternion::identity());
}

#[test]
fn test_head_on_spheres_exchange_velocities() {
    let mut world = World::new();
    world.set_gravity(0.0).unwrap();
    let a = world.add_sphere((-3.0, 5.0, 0.0), 1.0, 1.0).unwrap();
    let b = world.add_sphere((3.0, 5.0, 0.0), 1.0, 1.0).unwrap();
    world.set_restitution(1.0).unwrap();
    world.set_velocity(a, (3.0, 0.0, 0.0)).unwrap();
    world.set_velocity(b, (-3.0, 0.0, 0.0)).unwrap();

    run(&mut world, 120);

    let (va, vb) = (world.body(a).unwrap().velocity, world.body(b).unwrap().velocity);
    assert!(va.x < -2.5, "A rebounds: {:?}", va);
    assert!(vb.x > 2.5, "B rebounds: {:?}", vb);
    assert_float_eq(va.x + vb.x, 0.0, 1e-4, Some("momentum is conserved"));
}

#[test]
fn test_bounce_height_scales_with_restitution_squared() {
    init_test_logger();
    let drop_height = 5.0;
    let restitution = 0.5;

    let mut world = World::new();
    let ball = world.add_sphere((0.0, 1.0 + drop_height, 0.0), 1.0, 1.0).unwrap();
    world.set_restitution(restitution).unwrap();

    let mut rebounding = false;
    let mut apex = 0.0_f32;
    for _ in 0..240 {
        world.step(DT).unwrap();
        let body = world.body(ball).unwrap();
        if !rebounding && body.velocity.y > 0.0 {
            rebounding = true;
        }
        if rebounding {
            if body.velocity.y < 0.0 {
                break;
            }
            apex = apex.max(body.position.y - 1.0);
        }
    }

    assert!(rebounding);
    let expected = drop_height * restitution * restitution;
    assert!((apex - expected).abs() < 0.2, "apex {} expected {}", apex, expected);
}

#[test]
fn test_box_flush_on_floor_stays_put() {
    init_test_logger();
    let mut world = World::new();
    let cuboid = world.add_box((0.0, 0.5, 0.0), (1.0, 1.0, 1.0), 1.0).unwrap();

    let body = world.body(cuboid).unwrap();
    assert!(check_floor(BodyRef::new(cuboid, body), 0.0).is_none());

    run(&mut world, 100);

    let body = world.body(cuboid).unwrap();
    assert!((body.position.y - 0.5).abs() < 0.0125, "box height {}", body.position.y);
    assert_float_eq(body.position.x, 0.0, 1e-6, None);
    assert_float_eq(body.position.z, 0.0, 1e-6, None);
    assert!(body.velocity.magnitude() < 1e-3);
    assert_abs_diff_eq!(body.orientation, Quaternion::identity(), epsilon = 1e-6);
}

#[test]
fn test_custom_ground_level() {
    let config = SimulationConfig::new(None, Some(2.0), None, None);
    let mut world = World::with_config(config).unwrap();
    let ball = world.add_sphere((0.0, 6.0, 0.0), 0.5, 1.0).unwrap();
    world.set_restitution(0.0).unwrap();

    run(&mut world, 300);
    assert!((world.body(ball).unwrap().position.y - 2.5).abs() < 0.0125);
}

#[test]
fn test_with_config_rejects_invalid_configuration() {
    let config = SimulationConfig::new(None, None, Some(0), None);
    assert!(matches!(World::with_config(config), Err(PhysicsError::InvalidConfiguration(_))));
}

#[test]
fn test_sleeping_body_ignores_gravity() {
    let mut world = World::new();
    let ball = world.add_sphere((0.0, 10.0, 0.0), 1.0, 1.0).unwrap();
    world.body_mut(ball).unwrap().set_awake(false);

    run(&mut world, 60);
    assert_eq!(world.body(ball).unwrap().position, Vector3::new(0.0, 10.0, 0.0));
}

#[test]
fn test_sleeping_body_is_pushed_out_of_floor() {
    let mut world = World::new();
    let ball = world.add_sphere((0.0, 0.5, 0.0), 1.0, 1.0).unwrap();
    world.body_mut(ball).unwrap().set_awake(false);

    run(&mut world, 60);

    let body = world.body(ball).unwrap();
    let slop = world.config().contact.penetration_slop;
    assert!(!body.is_awake());
    assert_eq!(body.velocity, Vector3::zero());
    assert_float_eq(body.position.y, 1.0 - slop, 1e-5, Some("settles at the slop depth"));
}

#[test]
fn test_sleeping_body_is_woken_by_contact() {
    init_test_logger();
    let mut world = World::new();
    let resting = world.add_sphere((0.0, 1.0, 0.0), 1.0, 1.0).unwrap();
    world.body_mut(resting).unwrap().set_awake(false);
    world.add_sphere((0.0, 3.5, 0.0), 1.0, 1.0).unwrap();

    let mut woke = false;
    for _ in 0..60 {
        world.step(DT).unwrap();
        woke |= world.body(resting).unwrap().is_awake();
    }
    assert!(woke);
}

#[test]
fn test_apply_force_and_torque() {
    let mut world = World::new();
    world.set_gravity(0.0).unwrap();
    let ball = world.add_sphere((0.0, 5.0, 0.0), 1.0, 1.0).unwrap();

    world.apply_force(ball, (60.0, 0.0, 0.0)).unwrap();
    world.apply_torque(ball, (0.0, 10.0, 0.0)).unwrap();
    world.step(DT).unwrap();

    let body = world.body(ball).unwrap();
    assert!(body.velocity.x > 0.0);
    assert!(body.angular_velocity.y > 0.0);
    assert_eq!(body.force_accum, Vector3::zero());
}

#[test]
fn test_set_velocity_wakes_body() {
    let mut world = World::new();
    let ball = world.add_sphere((0.0, 5.0, 0.0), 1.0, 1.0).unwrap();
    world.body_mut(ball).unwrap().set_awake(false);

    world.set_velocity(ball, (0.0, 2.0, 0.0)).unwrap();
    assert!(world.body(ball).unwrap().is_awake());
    assert_eq!(world.body(ball).unwrap().velocity, Vector3::new(0.0, 2.0, 0.0));
}

#[test]
fn test_out_of_range_index() {
    let mut world = World::new();
    world.add_sphere((0.0, 5.0, 0.0), 1.0, 1.0).unwrap();

    assert!(world.body_transform(1).is_none());
    assert_eq!(
        world.set_velocity(3, (1.0, 0.0, 0.0)),
        Err(PhysicsError::BodyIndexOutOfRange { index: 3, count: 1 })
    );
    assert!(world.apply_force(1, (1.0, 0.0, 0.0)).is_err());
    assert!(world.apply_torque(1, (1.0, 0.0, 0.0)).is_err());
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let mut world = World::new();
    assert!(matches!(world.add_sphere((0.0, 0.0, 0.0), -1.0, 1.0), Err(PhysicsError::InvalidDimension(_))));
    assert!(world.add_box((0.0, 0.0, 0.0), (1.0, 0.0, 1.0), 1.0).is_err());
    assert!(world.add_cylinder((0.0, 0.0, 0.0), 1.0, f32::NAN, 1.0).is_err());
    assert_eq!(world.add_sphere((0.0, 0.0, 0.0), 1.0, f32::NAN), Err(PhysicsError::InvalidMass));
    assert_eq!(world.body_count(), 0);

    assert_eq!(world.set_restitution(1.5), Err(PhysicsError::InvalidCoefficient));
    assert_eq!(world.set_friction(-0.1), Err(PhysicsError::InvalidCoefficient));
    assert!(world.set_gravity(f32::INFINITY).is_err());
}

#[test]
fn test_step_rejects_bad_time_and_keeps_state() {
    let mut world = World::new();
    let ball = world.add_sphere((0.0, 5.0, 0.0), 1.0, 1.0).unwrap();
    let before = world.body_transform(ball).unwrap();

    assert_eq!(world.step(-DT), Err(PhysicsError::InvalidTime));
    assert_eq!(world.step(f32::NAN), Err(PhysicsError::InvalidTime));
    assert_eq!(world.body_transform(ball).unwrap(), before);
}

#[test]
fn test_restitution_and_friction_apply_to_all_bodies() {
    let mut world = World::new();
    world.add_sphere((0.0, 5.0, 0.0), 1.0, 1.0).unwrap();
    world.add_box((3.0, 5.0, 0.0), (1.0, 1.0, 1.0), 1.0).unwrap();

    world.set_restitution(0.25).unwrap();
    world.set_friction(0.8).unwrap();
    for body in world.bodies() {
        assert_float_eq(body.restitution, 0.25, 1e-6, None);
        assert_float_eq(body.friction, 0.8, 1e-6, None);
    }
}

#[test]
fn test_reset_clears_bodies_and_keeps_config() {
    let mut world = World::new();
    world.set_gravity(-1.62).unwrap();
    world.add_sphere((0.0, 5.0, 0.0), 1.0, 1.0).unwrap();
    world.add_cylinder((2.0, 5.0, 0.0), 0.5, 1.0, 1.0).unwrap();

    world.reset();
    assert_eq!(world.body_count(), 0);
    assert_float_eq(world.gravity(), -1.62, 1e-6, None);
    assert_eq!(world.add_sphere((0.0, 1.0, 0.0), 1.0, 1.0), Ok(0));
}

#[cfg(feature = "constraints")]
#[test]
fn test_resolve_constraint_on_world_bodies() {
    use crate::constraints::{Constraint, DistanceConstraint};

    let mut world = World::new();
    let a = world.add_sphere((-2.0, 5.0, 0.0), 0.5, 1.0).unwrap();
    let b = world.add_sphere((2.0, 5.0, 0.0), 0.5, 1.0).unwrap();

    let rope = DistanceConstraint::new(a, b, 1.0);
    world.resolve_constraint(&rope).unwrap();
    assert_float_eq(rope.calculate_error(world.bodies()).unwrap(), 0.0, 1e-5, None);

    assert_eq!(
        world.resolve_constraint(&DistanceConstraint::new(a, 9, 1.0)),
        Err(PhysicsError::BodyIndexOutOfRange { index: 9, count: 2 })
    );
}

#[test]
fn test_mixed_scene_stays_numerically_stable() {
    init_test_logger();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut world = World::new();
    world.add_box((0.0, -0.5, 0.0), (20.0, 1.0, 20.0), 0.0).unwrap();

    for _ in 0..24 {
        let position = (
            rng.random_range(-3.0..3.0),
            rng.random_range(1.0..12.0),
            rng.random_range(-3.0..3.0),
        );
        let mass = rng.random_range(0.5..5.0);
        let shape = match rng.random_range(0..3) {
            0 => Shape::new_sphere(rng.random_range(0.2..0.8)),
            1 => Shape::new_cuboid(
                rng.random_range(0.3..1.2),
                rng.random_range(0.3..1.2),
                rng.random_range(0.3..1.2),
            ),
            _ => Shape::new_cylinder(rng.random_range(0.2..0.7), rng.random_range(0.4..1.5)),
        };
        let index = world.add_body(Vector3::from_coord(position), shape, mass).unwrap();
        world
            .set_velocity(index, (rng.random_range(-2.0..2.0), 0.0, rng.random_range(-2.0..2.0)))
            .unwrap();
    }

    run(&mut world, 600);

    for body in world.bodies() {
        assert!(body.position.is_finite());
        assert!(body.velocity.is_finite());
        assert!(body.angular_velocity.is_finite());
        assert_relative_eq!(body.orientation.magnitude(), 1.0, epsilon = 1e-4);
        assert!(body.position.y > -2.0, "body fell through the floor: {:?}", body.position);
    }
}
