use glam::Vec3;

use crate::components::{Color, Hidden, Opacity, PlayerTag, Position, Size};
use crate::sim::SimCtx;

/// The only surface the simulation draws through. Offsets and sizes are in
/// world units relative to the camera; the host owns pixel scaling. The core
/// never reads anything back.
pub trait RenderSink {
    fn rect(&mut self, color: Vec3, offset: Vec3, size: Vec3, opacity: f32);
    fn text(&mut self, text: &str, offset: Vec3, color: Vec3, opacity: f32);
}

/// Emit one rect per visible colored body, camera-culled with the same
/// overlap test collision uses. The player is drawn last so it always sits
/// on top of terrain.
pub fn draw(ctx: &mut SimCtx, sink: &mut dyn RenderSink) {
    let cam_pos = ctx.camera.pos;
    let cam_view = ctx.camera.view;
    let player = ctx.player.as_ref().map(|rig| rig.body);

    for (entity, (pos, size, color, opacity)) in ctx
        .world
        .query_mut::<(&Position, &Size, &Color, Option<&Opacity>)>()
        .without::<&Hidden>()
    {
        if Some(entity) == player {
            continue;
        }
        if !crate::physics::overlaps(pos.0, size.0, cam_pos, cam_view) {
            continue;
        }
        sink.rect(
            color.0,
            pos.0 - cam_pos,
            size.0,
            opacity.map_or(1.0, |o| o.0),
        );
    }

    let Some(body) = player else {
        return;
    };
    if let Ok((pos, size, color, _tag)) = ctx
        .world
        .query_one_mut::<(&Position, &Size, &Color, &PlayerTag)>(body)
    {
        if crate::physics::overlaps(pos.0, size.0, cam_pos, cam_view) {
            sink.rect(color.0, pos.0 - cam_pos, size.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::sim::{Room, Simulation};
    use glam::vec3;

    #[derive(Default)]
    struct Recorder {
        rects: Vec<(Vec3, Vec3)>,
    }

    impl RenderSink for Recorder {
        fn rect(&mut self, _color: Vec3, offset: Vec3, size: Vec3, _opacity: f32) {
            self.rects.push((offset, size));
        }

        fn text(&mut self, _text: &str, _offset: Vec3, _color: Vec3, _opacity: f32) {}
    }

    fn sim() -> Simulation {
        Simulation::new(
            Settings::default(),
            Room {
                origin: vec3(-1000.0, -1000.0, 0.0),
                size: vec3(2000.0, 2000.0, 0.0),
            },
        )
    }

    #[test]
    fn offscreen_bodies_are_culled() {
        let mut sim = sim();
        // No player yet, so the camera still rests at the world origin with
        // a roughly 53x30 unit view.
        sim.add_solid(vec3(5.0, 5.0, 0.0), vec3(2.0, 2.0, 0.0), Vec3::ONE);
        sim.add_solid(vec3(500.0, 500.0, 0.0), vec3(2.0, 2.0, 0.0), Vec3::ONE);

        let mut rec = Recorder::default();
        draw(&mut sim.ctx, &mut rec);
        assert_eq!(rec.rects.len(), 1);
        // Offset is camera-relative.
        assert_eq!(rec.rects[0].0, vec3(5.0, 5.0, 0.0));
    }

    #[test]
    fn player_rect_comes_last() {
        let mut sim = sim();
        sim.add_solid(vec3(-998.0, -990.0, 0.0), vec3(20.0, 2.0, 0.0), Vec3::ONE);
        sim.spawn_player(vec3(-995.0, -994.0, 0.0), vec3(1.0, 1.0, 0.0));

        // Camera snapped to the player; both bodies are in view.
        let mut rec = Recorder::default();
        draw(&mut sim.ctx, &mut rec);
        assert_eq!(rec.rects.len(), 2);
        assert_eq!(rec.rects[1].1, vec3(1.0, 1.0, 0.0));
    }
}
