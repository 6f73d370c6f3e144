use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect;
use sdl2::render::WindowCanvas;

use ledge::engine::{Action, InputSnapshot};
use ledge::render::{draw, RenderSink};
use ledge::scene::{demo_room, load_demo_scene};
use ledge::{Settings, Simulation};

#[derive(Parser)]
#[command(name = "ledge", about = "Ledge platformer demo")]
struct Args {
    /// Settings overrides in RON format, merged over the built-in defaults
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Run this many frames without a window, then exit
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}

/// Draws simulation rects onto the SDL canvas, scaling world units to
/// pixels. The demo carries no font stack, so `text` goes to the log.
struct CanvasSink<'a> {
    canvas: &'a mut WindowCanvas,
    unit: f32,
}

impl RenderSink for CanvasSink<'_> {
    fn rect(&mut self, color: Vec3, offset: Vec3, size: Vec3, opacity: f32) {
        self.canvas.set_draw_color(SdlColor::RGBA(
            (color.x * 255.0) as u8,
            (color.y * 255.0) as u8,
            (color.z * 255.0) as u8,
            (opacity.clamp(0.0, 1.0) * 255.0) as u8,
        ));
        let rect = Rect::new(
            (offset.x * self.unit) as i32,
            (offset.y * self.unit) as i32,
            ((size.x * self.unit) as u32).max(1),
            ((size.y * self.unit) as u32).max(1),
        );
        let _ = self.canvas.fill_rect(rect);
    }

    fn text(&mut self, text: &str, _offset: Vec3, _color: Vec3, _opacity: f32) {
        info!("{text}");
    }
}

/// Map held keys onto the simulation's action set. Arrows and WASD both
/// steer; Space jumps.
fn capture_keys(pump: &sdl2::EventPump) -> InputSnapshot {
    let keys = pump.keyboard_state();
    let mut snap = InputSnapshot::default();
    let bindings = [
        (Scancode::Left, Action::Left),
        (Scancode::A, Action::Left),
        (Scancode::Right, Action::Right),
        (Scancode::D, Action::Right),
        (Scancode::Up, Action::Up),
        (Scancode::W, Action::Up),
        (Scancode::Down, Action::Down),
        (Scancode::S, Action::Down),
        (Scancode::Space, Action::Jump),
    ];
    for (code, action) in bindings {
        if keys.is_scancode_pressed(code) {
            snap.press(action);
        }
    }
    snap
}

fn run_headless(mut sim: Simulation, frames: u64) -> Result<()> {
    let step = sim.ctx.clock.step();
    let idle = InputSnapshot::default();
    let mut now = 0.0;
    for _ in 0..frames {
        now += step;
        sim.frame(now, &idle);
    }
    info!(
        "headless run complete: {} frames, clock at {:.0}ms",
        sim.ctx.frames, sim.ctx.clock.now
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let screen = settings.screen.clone();

    let mut sim = Simulation::new(settings, demo_room());
    load_demo_scene(&mut sim);
    sim.ready()?;

    if let Some(frames) = args.headless {
        return run_headless(sim, frames);
    }

    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let video = sdl.video().map_err(anyhow::Error::msg)?;
    let window = video
        .window("Ledge", screen.width, screen.height)
        .position_centered()
        .build()?;
    let mut canvas = window.into_canvas().present_vsync().build()?;
    canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
    let mut pump = sdl.event_pump().map_err(anyhow::Error::msg)?;

    let start = Instant::now();
    'running: loop {
        let now = start.elapsed().as_secs_f64() * 1000.0;
        for event in pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    repeat: false,
                    ..
                } => {
                    if sim.paused() {
                        sim.resume(now);
                        let _ = canvas.window_mut().set_title("Ledge");
                    } else {
                        sim.pause(now);
                        let _ = canvas.window_mut().set_title("Ledge (paused)");
                    }
                }
                _ => {}
            }
        }

        let input = capture_keys(&pump);
        sim.frame(now, &input);

        canvas.set_draw_color(SdlColor::RGB(24, 26, 33));
        canvas.clear();
        let mut sink = CanvasSink {
            canvas: &mut canvas,
            unit: screen.unit,
        };
        draw(&mut sim.ctx, &mut sink);
        canvas.present();
    }

    Ok(())
}
