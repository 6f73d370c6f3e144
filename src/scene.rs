use glam::{vec3, Vec3};
use hecs::Entity;

use crate::components::{Color, Door, Patrol, Platform, Position, Projectile, Size, Velocity, Wall};
use crate::sim::{Room, Simulation};

/// Room extent of the demo scene, in world units.
pub fn demo_room() -> Room {
    Room {
        origin: Vec3::ZERO,
        size: vec3(80.0, 40.0, 0.0),
    }
}

/// A horizontal run of unit-wide solid tiles. Unit tiles keep side snapping
/// flush: the resolver expresses side snaps in the mover's own width.
fn tile_row(sim: &mut Simulation, x0: f32, y: f32, count: u32, height: f32, color: Vec3) -> Vec<Entity> {
    (0..count)
        .map(|i| sim.add_solid(vec3(x0 + i as f32, y, 0.0), vec3(1.0, height, 0.0), color))
        .collect()
}

/// Build and populate the demo room: a tiled floor, bounding walls, a few
/// platforms rising toward an exit door, and one patrolling hazard.
/// Returns the player entity.
pub fn load_demo_scene(sim: &mut Simulation) -> Entity {
    let stone = vec3(0.45, 0.45, 0.5);
    let wood = vec3(0.55, 0.4, 0.25);

    for tile in tile_row(sim, 0.0, 36.0, 80, 4.0, stone) {
        sim.ctx.world.insert_one(tile, Platform).expect("just spawned");
    }

    let left = sim.add_solid(vec3(0.0, 0.0, 0.0), vec3(1.0, 36.0, 0.0), stone);
    let right = sim.add_solid(vec3(79.0, 0.0, 0.0), vec3(1.0, 36.0, 0.0), stone);
    for wall in [left, right] {
        sim.ctx.world.insert_one(wall, Wall).expect("just spawned");
    }

    // Hop platforms rising toward the door.
    for &(x, y, count) in &[(14.0_f32, 30.0_f32, 8_u32), (28.0, 24.0, 6), (40.0, 18.0, 6), (54.0, 13.0, 8)] {
        for tile in tile_row(sim, x, y, count, 1.0, wood) {
            sim.ctx.world.insert_one(tile, Platform).expect("just spawned");
        }
    }

    // Exit door on the highest platform.
    sim.ctx.world.spawn((
        Position(vec3(58.0, 9.0, 0.0)),
        Size(vec3(2.0, 4.0, 0.0)),
        Color(vec3(0.8, 0.7, 0.2)),
        Door,
    ));

    // One hazard sweeping the floor.
    sim.ctx.world.spawn((
        Position(vec3(30.0, 34.5, 0.0)),
        Size(vec3(1.5, 1.5, 0.0)),
        Velocity(vec3(6.0, 0.0, 0.0)),
        Patrol {
            min: 10.0,
            max: 66.0,
        },
        Color(vec3(0.85, 0.2, 0.2)),
        Projectile,
    ));

    sim.spawn_player(vec3(6.0, 30.0, 0.0), vec3(1.0, 1.8, 0.0))
}
