use glam::Vec3;
use hecs::{Entity, World};
use log::{debug, info, trace};
use thiserror::Error;

use crate::camera::Camera;
use crate::components::{
    Color, Contact, Door, Orientation, Patrol, PlayerTag, Position, Projectile, Size, Solid,
    Velocity,
};
use crate::config::Settings;
use crate::engine::{
    Clock, Combos, Event, EventData, History, Hooks, InputSnapshot, InputSurface,
};
use crate::mechanics::{BodyView, DashDirection, Mechanics, SolidRect, Suspensions, TickCtx};
use crate::physics::{overlaps, Friction, Gravity};

#[derive(Debug, Error)]
pub enum SimError {
    /// A room with nothing solid in it would let every body fall forever;
    /// refuse it up front instead of once per frame.
    #[error("simulation has no solid bodies to collide with")]
    NoSolidBodies,
}

/// Rectangular world extent of the current room. Bodies below its bottom
/// edge count as fallen out.
#[derive(Debug, Clone, Copy)]
pub struct Room {
    pub origin: Vec3,
    pub size: Vec3,
}

impl Room {
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }
}

/// The player entity plus everything bound to it outside the arena: the
/// spawn point and its mechanic set.
pub struct PlayerRig {
    pub body: Entity,
    pub spawn: Vec3,
    pub mechanics: Mechanics,
}

/// All simulation state, handed mutably to every event listener.
///
/// Listeners are plain function pointers over this context, so state is
/// reached through one value instead of globals, and the borrow checker
/// arbitrates who touches what inside a callback.
pub struct SimCtx {
    pub settings: Settings,
    pub clock: Clock,
    pub gravity: Gravity,
    pub friction: Friction,
    pub history: History,
    pub combos: Combos,
    pub suspensions: Suspensions,
    pub world: World,
    pub player: Option<PlayerRig>,
    pub camera: Camera,
    pub room: Room,
    /// This frame's frozen input, captured once before Tick fires.
    pub snapshot: InputSnapshot,
    /// Events raised by listeners during a pass, fired after the pass so a
    /// callback never re-enters the dispatcher mid-firing.
    pub queue: Vec<(Event, EventData)>,
    pub frames: u64,
}

/// The frame pump: a [`SimCtx`] plus the dispatcher that drives it.
pub struct Simulation {
    pub ctx: SimCtx,
    pub hooks: Hooks<SimCtx>,
}

impl Simulation {
    pub fn new(settings: Settings, room: Room) -> Self {
        let view = Vec3::new(
            settings.screen.width as f32 / settings.screen.unit,
            settings.screen.height as f32 / settings.screen.unit,
            0.0,
        );
        let ctx = SimCtx {
            clock: Clock::new(&settings.frames),
            gravity: Gravity::new(&settings.physics),
            friction: Friction::new(&settings.physics),
            history: History::new(settings.controls.history.max),
            combos: Combos::new(&settings.controls.combos),
            suspensions: Suspensions::new(),
            world: World::new(),
            player: None,
            camera: Camera::new(view),
            room,
            snapshot: InputSnapshot::default(),
            queue: Vec::new(),
            frames: 0,
            settings,
        };
        let mut sim = Self {
            ctx,
            hooks: Hooks::new(),
        };
        sim.register_defaults();
        sim
    }

    /// The standard listener set. Priorities keep input sampling ahead of
    /// combo scanning, and both ahead of the player pipeline, regardless of
    /// registration order.
    fn register_defaults(&mut self) {
        self.hooks.add(Event::Tick, "history", sample_history, 11);
        self.hooks.add(Event::Tick, "combos", scan_combos, 12);
        self.hooks.add(Event::Tick, "projectiles", step_projectiles, 18);
        self.hooks.add(Event::Tick, "player", tick_player, 20);
        self.hooks.add(Event::Update, "camera", follow_player, 10);
        self.hooks.add(Event::Render, "counter", count_frame, 10);
        self.hooks.add(Event::ComboTrigger, "dash", trigger_dash, 10);
        self.hooks.add(Event::PlayerFell, "respawn", respawn_player, 10);
        self.hooks.add(Event::PlayerHit, "respawn", respawn_player, 10);
    }

    /// Fail fast on a room no body could ever stand in.
    pub fn ready(&mut self) -> Result<(), SimError> {
        let any_solid = self.ctx.world.query_mut::<&Solid>().into_iter().next().is_some();
        if any_solid {
            Ok(())
        } else {
            Err(SimError::NoSolidBodies)
        }
    }

    /// Add a static collidable rectangle and announce it.
    pub fn add_solid(&mut self, pos: Vec3, size: Vec3, color: Vec3) -> Entity {
        let entity = self
            .ctx
            .world
            .spawn((Position(pos), Size(size), Solid, Color(color)));
        self.hooks
            .fire(&mut self.ctx, Event::TileAdded, EventData::Tile(entity));
        entity
    }

    /// Spawn the player body and bind its mechanic set.
    pub fn spawn_player(&mut self, spawn: Vec3, size: Vec3) -> Entity {
        let body = self.ctx.world.spawn((
            Position(spawn),
            Size(size),
            Velocity(Vec3::ZERO),
            Contact::default(),
            Orientation::default(),
            PlayerTag,
            Color(Vec3::new(0.9, 0.9, 0.9)),
        ));
        let mechanics = Mechanics::bind(&self.ctx.settings.player, &self.ctx.settings.physics);
        self.ctx.player = Some(PlayerRig {
            body,
            spawn,
            mechanics,
        });
        self.ctx
            .camera
            .snap(spawn, self.ctx.room.origin, self.ctx.room.size);
        info!("player spawned at {spawn}");
        body
    }

    /// One whole frame: clock, input capture, listener revival, then the
    /// Tick, Update, and Render passes with queued events drained after
    /// each pass. While paused only the Render pass runs.
    pub fn frame(&mut self, now_ms: f64, input: &dyn InputSurface) {
        if self.ctx.clock.paused() {
            self.hooks.fire(&mut self.ctx, Event::Render, EventData::None);
            return;
        }
        self.ctx.clock.update(now_ms);
        self.ctx.snapshot = InputSnapshot::capture(input);
        self.hooks.tick(self.ctx.clock.now);

        self.hooks.fire(&mut self.ctx, Event::Tick, EventData::None);
        self.drain();
        self.hooks.fire(&mut self.ctx, Event::Update, EventData::None);
        self.drain();
        self.hooks.fire(&mut self.ctx, Event::Render, EventData::None);
        self.drain();
    }

    fn drain(&mut self) {
        while !self.ctx.queue.is_empty() {
            let batch = std::mem::take(&mut self.ctx.queue);
            for (event, data) in batch {
                self.hooks.fire(&mut self.ctx, event, data);
            }
        }
    }

    pub fn pause(&mut self, raw_now: f64) {
        self.ctx.clock.pause(raw_now);
        debug!("simulation paused");
    }

    pub fn resume(&mut self, raw_now: f64) {
        self.ctx.clock.resume(raw_now);
        debug!("simulation resumed");
    }

    pub fn paused(&self) -> bool {
        self.ctx.clock.paused()
    }
}

fn sample_history(ctx: &mut SimCtx, _data: &mut EventData) {
    let snapshot = ctx.snapshot;
    ctx.history.sample(&snapshot, &ctx.clock);
}

fn scan_combos(ctx: &mut SimCtx, _data: &mut EventData) {
    for name in ctx.combos.scan(&ctx.history, &ctx.clock) {
        ctx.queue.push((Event::ComboTrigger, EventData::Combo(name)));
    }
}

/// Bounce patrolling hazards between their extents.
fn step_projectiles(ctx: &mut SimCtx, _data: &mut EventData) {
    let scale = ctx.clock.scale as f32;
    for (_, (pos, vel, patrol)) in ctx
        .world
        .query_mut::<(&mut Position, &mut Velocity, &Patrol)>()
        .with::<&Projectile>()
    {
        pos.0.x += vel.0.x * scale;
        if pos.0.x <= patrol.min {
            pos.0.x = patrol.min;
            vel.0.x = vel.0.x.abs();
        } else if pos.0.x >= patrol.max {
            pos.0.x = patrol.max;
            vel.0.x = -vel.0.x.abs();
        }
    }
}

/// The player pass: snapshot the solid set, run the mechanic pipeline, then
/// raise any outcome events for the drain step.
fn tick_player(ctx: &mut SimCtx, _data: &mut EventData) {
    let mut solids = Vec::new();
    for (_, (pos, size)) in ctx.world.query_mut::<(&Position, &Size)>().with::<&Solid>() {
        solids.push(SolidRect {
            pos: pos.0,
            size: size.0,
        });
    }

    let Some(rig) = ctx.player.as_mut() else {
        return;
    };

    let (player_pos, player_size) = {
        let Ok((pos, size, vel, contact, orientation)) = ctx.world.query_one_mut::<(
            &mut Position,
            &Size,
            &mut Velocity,
            &mut Contact,
            &mut Orientation,
        )>(rig.body) else {
            return;
        };
        let mut body = BodyView {
            pos: &mut pos.0,
            size: size.0,
            vel: &mut vel.0,
            contact,
            orientation,
        };
        let mut tick = TickCtx {
            clock: &ctx.clock,
            history: &ctx.history,
            gravity: ctx.gravity,
            friction: ctx.friction,
            suspensions: &mut ctx.suspensions,
        };
        rig.mechanics.tick(&mut tick, &mut body, &solids);
        (*body.pos, body.size)
    };

    if player_pos.y > ctx.room.bottom() {
        ctx.queue.push((Event::PlayerFell, EventData::None));
        return;
    }

    for (_, (pos, size)) in ctx.world.query_mut::<(&Position, &Size)>().with::<&Door>() {
        if overlaps(player_pos, player_size, pos.0, size.0) {
            ctx.queue.push((Event::DoorReached, EventData::None));
        }
    }

    for (_, (pos, size)) in ctx
        .world
        .query_mut::<(&Position, &Size)>()
        .with::<&Projectile>()
    {
        if overlaps(player_pos, player_size, pos.0, size.0) {
            ctx.queue.push((Event::PlayerHit, EventData::None));
        }
    }
}

/// ComboTrigger listener: translate a gesture into a dash attempt.
fn trigger_dash(ctx: &mut SimCtx, data: &mut EventData) {
    let EventData::Combo(name) = *data else {
        return;
    };
    let Some(rig) = ctx.player.as_mut() else {
        return;
    };
    let Ok((pos, size, vel, contact, orientation)) = ctx.world.query_one_mut::<(
        &mut Position,
        &Size,
        &mut Velocity,
        &mut Contact,
        &mut Orientation,
    )>(rig.body) else {
        return;
    };
    let mut body = BodyView {
        pos: &mut pos.0,
        size: size.0,
        vel: &mut vel.0,
        contact,
        orientation,
    };
    let mut tick = TickCtx {
        clock: &ctx.clock,
        history: &ctx.history,
        gravity: ctx.gravity,
        friction: ctx.friction,
        suspensions: &mut ctx.suspensions,
    };
    rig.mechanics
        .dash
        .trigger(&mut tick, &mut body, DashDirection::from(name));
}

/// Put the player back at its spawn point without reallocating anything.
fn respawn_player(ctx: &mut SimCtx, _data: &mut EventData) {
    ctx.suspensions.clear();
    let Some(rig) = ctx.player.as_mut() else {
        return;
    };
    rig.mechanics.reset();
    if let Ok((pos, vel, contact)) = ctx
        .world
        .query_one_mut::<(&mut Position, &mut Velocity, &mut Contact)>(rig.body)
    {
        pos.0 = rig.spawn;
        vel.0 = Vec3::ZERO;
        contact.reset();
    }
    ctx.camera.snap(rig.spawn, ctx.room.origin, ctx.room.size);
    info!("player respawned");
}

fn follow_player(ctx: &mut SimCtx, _data: &mut EventData) {
    let Some(rig) = ctx.player.as_ref() else {
        return;
    };
    let Ok((pos, size)) = ctx.world.query_one_mut::<(&Position, &Size)>(rig.body) else {
        return;
    };
    let center = pos.0 + size.0 * 0.5;
    let scale = ctx.clock.scale as f32;
    ctx.camera
        .follow(center, ctx.room.origin, ctx.room.size, scale);
}

fn count_frame(ctx: &mut SimCtx, _data: &mut EventData) {
    ctx.frames += 1;
    trace!("frame {} at {:.1}ms", ctx.frames, ctx.clock.now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Action;
    use glam::vec3;

    const STEP: f64 = 1000.0 / 60.0;

    fn room() -> Room {
        Room {
            origin: vec3(0.0, 0.0, 0.0),
            size: vec3(60.0, 30.0, 0.0),
        }
    }

    /// Wide floor near the bottom of the room, player a few units above it.
    /// The floor extends far past the room so walk tests never step off it.
    fn sim_with_floor() -> Simulation {
        let mut sim = Simulation::new(Settings::default(), room());
        sim.add_solid(vec3(-2000.0, 20.0, 0.0), vec3(4000.0, 2.0, 0.0), Vec3::ONE);
        sim.spawn_player(vec3(30.0, 16.0, 0.0), vec3(1.0, 1.0, 0.0));
        sim.ready().expect("room has solids");
        sim
    }

    fn run(sim: &mut Simulation, input: &InputSnapshot, frames: usize) {
        for _ in 0..frames {
            let next = sim.ctx.clock.now + STEP;
            sim.frame(next, input);
        }
    }

    fn player_pos(sim: &mut Simulation) -> Vec3 {
        let body = sim.ctx.player.as_ref().expect("player").body;
        sim.ctx
            .world
            .query_one_mut::<&Position>(body)
            .expect("player body")
            .0
    }

    fn player_vel(sim: &mut Simulation) -> Vec3 {
        let body = sim.ctx.player.as_ref().expect("player").body;
        sim.ctx
            .world
            .query_one_mut::<&Velocity>(body)
            .expect("player body")
            .0
    }

    #[test]
    fn empty_room_is_refused() {
        let mut sim = Simulation::new(Settings::default(), room());
        assert!(matches!(sim.ready(), Err(SimError::NoSolidBodies)));
        sim.add_solid(Vec3::ZERO, Vec3::ONE, Vec3::ONE);
        assert!(sim.ready().is_ok());
    }

    #[test]
    fn player_falls_and_lands_on_the_floor() {
        let mut sim = sim_with_floor();
        let idle = InputSnapshot::default();
        run(&mut sim, &idle, 120);
        let pos = player_pos(&mut sim);
        // Resting exactly on top of the floor solid.
        assert_eq!(pos.y, 19.0);
        assert_eq!(sim.ctx.frames, 120);
    }

    #[test]
    fn held_direction_walks_the_player() {
        let mut sim = sim_with_floor();
        let idle = InputSnapshot::default();
        run(&mut sim, &idle, 60);
        let before = player_pos(&mut sim).x;

        let mut right = InputSnapshot::default();
        right.press(Action::Right);
        run(&mut sim, &right, 30);
        assert!(player_pos(&mut sim).x > before + 5.0);
    }

    #[test]
    fn jump_edge_launches_through_the_full_stack() {
        let mut sim = sim_with_floor();
        let idle = InputSnapshot::default();
        run(&mut sim, &idle, 60);

        let mut jump = InputSnapshot::default();
        jump.press(Action::Jump);
        run(&mut sim, &jump, 1);
        assert_eq!(player_vel(&mut sim).y, -16.0);
    }

    #[test]
    fn double_tap_combo_dashes_airborne() {
        let mut sim = Simulation::new(Settings::default(), room());
        sim.add_solid(vec3(-2000.0, 20.0, 0.0), vec3(4000.0, 2.0, 0.0), Vec3::ONE);
        // Spawn high enough that the tap sequence completes in free fall.
        sim.spawn_player(vec3(30.0, 5.0, 0.0), vec3(1.0, 1.0, 0.0));
        sim.ready().expect("room has solids");

        let mut tap = InputSnapshot::default();
        tap.press(Action::Right);
        run(&mut sim, &tap, 1);
        tap.release(Action::Right);
        run(&mut sim, &tap, 1);
        tap.press(Action::Right);
        run(&mut sim, &tap, 1);
        assert_eq!(player_vel(&mut sim).x, 75.0);
    }

    #[test]
    fn falling_out_of_the_room_respawns_at_the_spawn_point() {
        let mut sim = Simulation::new(Settings::default(), room());
        // A solid off in a corner so readiness passes, but no floor below
        // the spawn.
        sim.add_solid(vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 0.0), Vec3::ONE);
        let spawn = vec3(30.0, 5.0, 0.0);
        sim.spawn_player(spawn, vec3(1.0, 1.0, 0.0));
        sim.ready().expect("room has solids");

        let idle = InputSnapshot::default();
        let mut respawned = false;
        for _ in 0..600 {
            run(&mut sim, &idle, 1);
            if player_pos(&mut sim) == spawn {
                respawned = true;
                break;
            }
        }
        assert!(respawned);
        assert_eq!(player_vel(&mut sim), Vec3::ZERO);
    }

    #[test]
    fn touching_a_projectile_respawns() {
        let mut sim = sim_with_floor();
        let idle = InputSnapshot::default();
        run(&mut sim, &idle, 120);
        let landed = player_pos(&mut sim);

        // Drop a hazard right on the player.
        sim.ctx.world.spawn((
            Position(landed),
            Size(vec3(1.0, 1.0, 0.0)),
            Velocity(vec3(0.0, 0.0, 0.0)),
            Patrol {
                min: landed.x - 5.0,
                max: landed.x + 5.0,
            },
            Projectile,
        ));
        run(&mut sim, &idle, 1);
        // Queue drained within the same frame: player is back at spawn.
        assert_eq!(player_pos(&mut sim), vec3(30.0, 16.0, 0.0));
    }

    #[test]
    fn projectiles_patrol_between_their_extents() {
        let mut sim = sim_with_floor();
        let hazard = sim.ctx.world.spawn((
            Position(vec3(10.0, 5.0, 0.0)),
            Size(vec3(1.0, 1.0, 0.0)),
            Velocity(vec3(4.0, 0.0, 0.0)),
            Patrol { min: 8.0, max: 12.0 },
            Projectile,
        ));
        let idle = InputSnapshot::default();
        for _ in 0..120 {
            run(&mut sim, &idle, 1);
            let x = sim
                .ctx
                .world
                .query_one_mut::<&Position>(hazard)
                .expect("hazard")
                .0
                .x;
            assert!((8.0..=12.0).contains(&x));
        }
    }

    #[test]
    fn pause_freezes_the_world_mid_fall() {
        let mut sim = sim_with_floor();
        let idle = InputSnapshot::default();
        run(&mut sim, &idle, 2);
        let frozen = player_pos(&mut sim);
        assert!(player_vel(&mut sim).y > 0.0);
        let raw = sim.ctx.clock.now;

        sim.pause(raw);
        assert!(sim.paused());
        run(&mut sim, &idle, 30);
        assert_eq!(player_pos(&mut sim), frozen);

        // Resume at the same raw timestamp: no wall time passed in the test,
        // so the offset stays put and the clock continues seamlessly.
        sim.resume(raw);
        run(&mut sim, &idle, 30);
        let pos = player_pos(&mut sim);
        assert_ne!(pos, frozen);
        assert_eq!(pos.y, 19.0);
    }

    #[test]
    fn camera_tracks_the_player() {
        let mut sim = sim_with_floor();
        let idle = InputSnapshot::default();
        run(&mut sim, &idle, 60);
        let mut right = InputSnapshot::default();
        right.press(Action::Right);
        let before = sim.ctx.camera.pos.x;
        run(&mut sim, &right, 60);
        assert!(sim.ctx.camera.pos.x > before);
    }
}
