// demos/falling_shapes.rs
// Drops a mixed pile of shapes onto the ground and logs their transforms.
// Run with `RUST_LOG=debug cargo run --example falling_shapes`.

use log::info;
use rs_rigid::models::ToCoordinates;
use rs_rigid::utils::PhysicsError;
use rs_rigid::world::World;

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    let mut world = World::new();

    // A static platform and a small stack above it
    world.add_box((0.0, 0.25, 0.0), (6.0, 0.5, 6.0), 0.0)?;
    world.add_box((0.0, 2.0, 0.0), (1.0, 1.0, 1.0), 2.0)?;
    world.add_sphere((0.2, 4.0, 0.1), 0.5, 1.0)?;
    world.add_cylinder((-0.3, 6.0, 0.0), 0.4, 1.0, 1.5)?;
    let ball = world.add_sphere((3.5, 8.0, 0.0), 0.75, 3.0)?;
    world.set_velocity(ball, (-2.0, 0.0, 0.0))?;

    let dt = 1.0 / 60.0;
    for frame in 0..=300 {
        world.step(dt)?;

        if frame % 60 == 0 {
            info!("t = {:.1}s", frame as f32 * dt);
            for index in 0..world.body_count() {
                if let Some(t) = world.body_transform(index) {
                    info!(
                        "  body {}: pos {:?} rot ({:.3}, {:.3}, {:.3}, {:.3}) awake {}",
                        index,
                        t.position.to_coord(),
                        t.orientation.w,
                        t.orientation.x,
                        t.orientation.y,
                        t.orientation.z,
                        t.is_awake
                    );
                }
            }
        }
    }

    let asleep = world.bodies().iter().filter(|b| !b.is_awake()).count();
    println!("{} of {} bodies asleep after 5 seconds", asleep, world.body_count());
    Ok(())
}
