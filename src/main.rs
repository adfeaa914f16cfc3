//! Circles bouncing around an SDL2 window.
//!
//! The window is the surface, the frame loop is the scheduler: each frame
//! runs one simulation step and draws every ball as a filled disc.

use bcircles::{Color, ColorPolicy, Config, Renderer, Simulation, StepStats};
use sdl2::event::{Event, WindowEvent};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::keyboard::Keycode;
use sdl2::pixels;
use sdl2::render::{BlendMode, Canvas, RenderTarget};
use std::time::Duration;

/// Window title displayed in the title bar
const TITLE: &str = "Bouncing circles";
/// Translucent background so moving balls leave a short trail
const BACKGROUND: pixels::Color = pixels::Color::RGBA(6, 6, 46, 77);
/// Frames between two status lines on stderr
const REPORT_EVERY: u64 = 600;

fn to_abgr(color: Color) -> pixels::Color {
    pixels::Color::RGBA(color.a, color.b, color.g, color.r)
}

/// Draws balls onto an SDL2 canvas.
struct CanvasRenderer<'a, T: RenderTarget> {
    canvas: &'a mut Canvas<T>,
}

impl<T: RenderTarget> Renderer for CanvasRenderer<'_, T> {
    fn draw_particle(&mut self, position: [f64; 2], radius: f64, color: Color) {
        let x = position[0].round() as i16;
        let y = position[1].round() as i16;
        let rad = radius.round().max(1.0) as i16;
        let _ = self.canvas.filled_circle(x, y, rad, to_abgr(color));
    }
}

fn print_usage() {
    eprintln!("Usage: bouncing-circles [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --count N            Number of circles (default 200)");
    eprintln!("  --radius MIN MAX     Radius range in pixels (default 10 10)");
    eprintln!("  --speed MIN MAX      Initial speed per axis (default 2 2)");
    eprintln!("  --max-velocity V     Velocity clamp after collisions (default 2)");
    eprintln!("  --size W H           Initial window size (default 800 600)");
    eprintln!("  --seed S             RNG seed");
    eprintln!("  --random-colors      Random colour per circle");
    eprintln!("  -h, --help           Show this message");
}

fn parse_value<T: std::str::FromStr>(args: &[String], idx: usize, flag: &str) -> Result<T, String> {
    args.get(idx)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| format!("{flag} expects a numeric value"))
}

/// Reads the command line into a config. `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<Config>, String> {
    let mut config = Config::default();
    let mut idx = 1;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "--count" => {
                config.count = parse_value(args, idx + 1, flag)?;
                idx += 2;
            }
            "--radius" => {
                config.radius_range = [parse_value(args, idx + 1, flag)?, parse_value(args, idx + 2, flag)?];
                idx += 3;
            }
            "--speed" => {
                config.speed_range = [parse_value(args, idx + 1, flag)?, parse_value(args, idx + 2, flag)?];
                idx += 3;
            }
            "--max-velocity" => {
                config.max_velocity = parse_value(args, idx + 1, flag)?;
                idx += 2;
            }
            "--size" => {
                config.extent = [parse_value(args, idx + 1, flag)?, parse_value(args, idx + 2, flag)?];
                idx += 3;
            }
            "--seed" => {
                config.seed = Some(parse_value(args, idx + 1, flag)?);
                idx += 2;
            }
            "--random-colors" => {
                config.color_policy = ColorPolicy::Random { alpha: 191 };
                idx += 1;
            }
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("unknown option: {other}")),
        }
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(Some(config))
}

fn report(sim: &Simulation, stats: StepStats) {
    eprintln!(
        "step {}: {} contacts, {} skipped, {} reflections, energy {:.1}",
        sim.steps(),
        stats.contacts,
        stats.degenerate,
        stats.reflections,
        sim.kinetic_energy()
    );
}

fn run(config: Config) -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window = video_subsystem
        .window(TITLE, config.extent[0] as u32, config.extent[1] as u32)
        .position_centered()
        .resizable()
        .build()
        .map_err(|e| e.to_string())?;
    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas.set_blend_mode(BlendMode::Blend);

    let mut sim = Simulation::new(&config).map_err(|e| e.to_string())?;
    eprintln!(
        "spawned {} circles on a {}x{} surface",
        sim.num_balls(),
        config.extent[0],
        config.extent[1]
    );

    let mut event_pump = sdl_context.event_pump()?;
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } => match sim.resize([w as f64, h as f64]) {
                    Ok(()) => eprintln!("resized to {w}x{h}"),
                    Err(e) => eprintln!("ignoring resize: {e}"),
                },
                _ => {}
            }
        }

        canvas.set_draw_color(BACKGROUND);
        canvas.fill_rect(None)?;

        let stats = sim.step();
        sim.draw_frame(&mut CanvasRenderer { canvas: &mut canvas });
        canvas.present();

        if sim.steps() % REPORT_EVERY == 0 {
            report(&sim, stats);
        }
        // Target 60 FPS
        ::std::thread::sleep(Duration::new(0, 1_000_000_000u32 / 60));
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let config = match parse_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            std::process::exit(1);
        }
    };
    if let Err(e) = run(config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
