mod config;
mod field;
mod iterm2;
mod overlay;
mod renderer;
mod state;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use field::{diagnostics, FrameCache, FrameParams, CANDIDATE_COUNT};
use renderer::{Canvas, OrbitCamera, RenderConfig};
use state::{RenderableArrays, Scene};

struct Defaults;

impl Defaults {
    const SCENE: Scene = Scene::TowerFlow;
    const SNAPSHOT_WIDTH: usize = 1000;
    const SNAPSHOT_HEIGHT: usize = 800;
    /// Camera orbit per key press, radians.
    const ORBIT_STEP: f64 = 0.08;
    const ZOOM_STEP: f64 = 1.1;
}

/// How the process was asked to present frames.
#[derive(Debug, PartialEq)]
enum Mode {
    Gui,
    Snapshot(PathBuf),
    Inline,
}

/// Command-line options. Parameter flags override the config file.
#[derive(Debug, PartialEq)]
struct CliOptions {
    mode: Mode,
    scene: Option<Scene>,
    velocity: Option<f64>,
    twist: Option<f64>,
    strength: Option<f64>,
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == name).map(|w| w[1].as_str())
}

fn is_flag(arg: &str) -> bool {
    arg.starts_with("--")
}

fn parse_number(args: &[String], name: &str) -> Result<Option<f64>, String> {
    match flag_value(args, name) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|e| format!("{name} {raw:?}: {e}")),
    }
}

const VALUE_FLAGS: [&str; 5] = ["--snapshot", "--scene", "--velocity", "--twist", "--strength"];

fn parse_cli(args: &[String]) -> Result<CliOptions, String> {
    for (i, arg) in args.iter().enumerate() {
        if VALUE_FLAGS.contains(&arg.as_str()) && args.get(i + 1).is_none_or(|v| is_flag(v)) {
            return Err(format!("{arg} needs a value"));
        }
    }
    let mode = if let Some(path) = flag_value(args, "--snapshot") {
        Mode::Snapshot(PathBuf::from(path))
    } else if args.iter().any(|a| a == "--inline") {
        Mode::Inline
    } else {
        Mode::Gui
    };
    let scene = match flag_value(args, "--scene") {
        None => None,
        Some(s) => Some(Scene::parse(s).ok_or_else(|| format!("unknown scene {s:?} (tower|panels)"))?),
    };
    Ok(CliOptions {
        mode,
        scene,
        velocity: parse_number(args, "--velocity")?,
        twist: parse_number(args, "--twist")?,
        strength: parse_number(args, "--strength")?,
    })
}

/// Starting parameters: config file, then CLI overrides, then slider ranges.
fn initial_params(cfg: &config::Config, cli: &CliOptions) -> FrameParams {
    let mut params = cfg.params.to_params();
    if let Some(v) = cli.velocity {
        params.velocity = v;
    }
    if let Some(t) = cli.twist {
        params.twist = t;
    }
    if let Some(s) = cli.strength {
        params.strength = s;
    }
    overlay::clamp_params(params)
}

/// Convert RGBA &[u8] buffer to 0RGB &[u32] buffer for minifb.
fn rgba_to_argb(rgba: &[u8], out: &mut [u32]) {
    for (i, pixel) in rgba.chunks_exact(4).enumerate() {
        out[i] = (pixel[0] as u32) << 16 | (pixel[1] as u32) << 8 | pixel[2] as u32;
    }
}

fn format_status(frame: &RenderableArrays, scene: Scene, panel_visible: bool) -> String {
    if panel_visible {
        return "space=close  ud=nav  lr=adj  ,.=fine  r=reset".to_string();
    }
    let p = &frame.params;
    match scene {
        Scene::TowerFlow => format!(
            "tower | v={:.0}m/s q={}pa re={} twist={:.2} res={} | space=params m=scene arrows=orbit",
            p.velocity,
            diagnostics::dynamic_pressure(p.velocity) as i64,
            diagnostics::reynolds_label(p.velocity),
            p.twist,
            p.resolution.label(),
        ),
        Scene::PanelErosion => format!(
            "panels | v={:.0}m/s strength={:.0} survivors={}/{} ({:.0}%) | space=params m=scene arrows=orbit",
            p.velocity,
            p.strength,
            frame.panels.panels.len(),
            CANDIDATE_COUNT,
            diagnostics::survival_ratio(&frame.panels) * 100.0,
        ),
    }
}

/// New layout when the window size changed since the last call.
/// Tracks the requested window size, not the fitted frame, which grows past a
/// tiny or minimized window.
fn refit_on_resize(last: &mut (usize, usize), size: (usize, usize)) -> Option<RenderConfig> {
    if *last == size {
        return None;
    }
    *last = size;
    Some(RenderConfig::fit(size.0, size.1))
}

/// Render scene, status bar and overlay into `rgba`.
fn compose(
    rgba: &mut Vec<u8>,
    frame: &RenderableArrays,
    scene: Scene,
    camera: &OrbitCamera,
    cfg: &RenderConfig,
    overlay_state: &overlay::OverlayState,
    params: &FrameParams,
) {
    renderer::render_into(rgba, frame, scene, camera, cfg);
    let mut canvas = Canvas::new(rgba, cfg.frame_width, cfg.frame_height);
    renderer::render_status(&mut canvas, cfg, &format_status(frame, scene, overlay_state.visible));
    overlay::render_overlay(&mut canvas, cfg.display_width, cfg.display_height, overlay_state, params);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_cli(&args) {
        Ok(cli) => cli,
        Err(e) => {
            log::error!("{e}");
            eprintln!("usage: windtower [--snapshot out.png | --inline] [--scene tower|panels] [--velocity V] [--twist T] [--strength S]");
            std::process::exit(2);
        }
    };
    let cfg = config::load();

    let result = match &cli.mode {
        Mode::Gui => run_gui(&cfg, &cli),
        Mode::Snapshot(path) => run_headless(&cfg, &cli, Some(path)),
        Mode::Inline => run_headless(&cfg, &cli, None),
    };
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Render a single frame and write it to `snapshot`, or to stdout as an
/// inline image when no path is given.
fn run_headless(
    cfg: &config::Config,
    cli: &CliOptions,
    snapshot: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = initial_params(cfg, cli);
    let scene = cli.scene.unwrap_or(Defaults::SCENE);
    let camera = cfg.camera.to_camera();
    let render_cfg = RenderConfig::fit(
        if cfg.display.width > 0 { cfg.display.width } else { Defaults::SNAPSHOT_WIDTH },
        if cfg.display.height > 0 { cfg.display.height } else { Defaults::SNAPSHOT_HEIGHT },
    );

    let frame = field::compute_frame(params);
    let mut rgba = Vec::new();
    compose(&mut rgba, &frame, scene, &camera, &render_cfg, &overlay::OverlayState::new(), &params);

    match snapshot {
        Some(path) => {
            iterm2::write_png(path, &rgba, render_cfg.frame_width, render_cfg.frame_height)?;
            log::info!(
                "wrote {} ({}x{}, scene={})",
                path.display(),
                render_cfg.frame_width,
                render_cfg.frame_height,
                scene.label()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            iterm2::write_inline(&mut out, &rgba, render_cfg.frame_width, render_cfg.frame_height)?;
        }
    }
    Ok(())
}

fn run_gui(cfg: &config::Config, cli: &CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut params = initial_params(cfg, cli);
    let mut scene = cli.scene.unwrap_or(Defaults::SCENE);
    let mut camera = cfg.camera.to_camera();
    let mut render_cfg = RenderConfig::fit(cfg.display.width, cfg.display.height);
    let mut w = render_cfg.frame_width;
    let mut h = render_cfg.frame_height;
    let mut window_size = (w, h);

    let mut window = Window::new(
        "windtower",
        w,
        h,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(cfg.display.target_fps.max(1));

    // Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    log::info!("scene={} v={} twist={} strength={}", scene.label(), params.velocity, params.twist, params.strength);

    let mut overlay_state = overlay::OverlayState::new();
    let mut cache = FrameCache::new();
    let mut framebuf = vec![0u32; w * h];
    let mut rgba_buf: Vec<u8> = Vec::new();
    let mut frame_count = 0u32;
    let mut last_fps_time = Instant::now();
    let mut needs_redraw = true;

    while window.is_open() && running.load(Ordering::SeqCst) {
        // --- Keyboard handling ---

        // Escape: close panel first, then quit app
        if window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            if overlay_state.visible {
                overlay_state.visible = false;
                needs_redraw = true;
            } else {
                break;
            }
        }

        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            overlay_state.toggle();
            needs_redraw = true;
        }

        if overlay_state.visible {
            if window.is_key_pressed(Key::Up, KeyRepeat::Yes) {
                overlay_state.navigate(-1);
                needs_redraw = true;
            }
            if window.is_key_pressed(Key::Down, KeyRepeat::Yes) {
                overlay_state.navigate(1);
                needs_redraw = true;
            }
            let adjustments = [
                (Key::Left, -1, false),
                (Key::Right, 1, false),
                (Key::Comma, -1, true),
                (Key::Period, 1, true),
            ];
            for (key, delta, fine) in adjustments {
                if window.is_key_pressed(key, KeyRepeat::Yes)
                    && overlay::adjust_param(&mut params, overlay_state.selected, delta, fine)
                {
                    needs_redraw = true;
                }
            }
            if window.is_key_pressed(Key::R, KeyRepeat::No) {
                overlay::reset_param(&mut params, overlay_state.selected);
                needs_redraw = true;
            }
        } else {
            // Arrows orbit the camera while the panel is hidden
            let orbits = [
                (Key::Left, -Defaults::ORBIT_STEP, 0.0),
                (Key::Right, Defaults::ORBIT_STEP, 0.0),
                (Key::Up, 0.0, Defaults::ORBIT_STEP),
                (Key::Down, 0.0, -Defaults::ORBIT_STEP),
            ];
            for (key, d_yaw, d_pitch) in orbits {
                if window.is_key_pressed(key, KeyRepeat::Yes) {
                    camera.orbit(d_yaw, d_pitch);
                    needs_redraw = true;
                }
            }
            if window.is_key_pressed(Key::Comma, KeyRepeat::Yes) {
                camera.zoom(1.0 / Defaults::ZOOM_STEP);
                needs_redraw = true;
            }
            if window.is_key_pressed(Key::Period, KeyRepeat::Yes) {
                camera.zoom(Defaults::ZOOM_STEP);
                needs_redraw = true;
            }
        }

        // M: switch scene
        if window.is_key_pressed(Key::M, KeyRepeat::No) {
            scene = scene.next();
            log::info!("scene -> {}", scene.label());
            needs_redraw = true;
        }

        // --- Check for window resize ---
        if let Some(resized) = refit_on_resize(&mut window_size, window.get_size()) {
            render_cfg = resized;
            w = render_cfg.frame_width;
            h = render_cfg.frame_height;
            framebuf = vec![0u32; w * h];
            needs_redraw = true;
        }

        if needs_redraw {
            let frame = cache.get(params);
            compose(&mut rgba_buf, frame, scene, &camera, &render_cfg, &overlay_state, &params);
            rgba_to_argb(&rgba_buf, &mut framebuf);
            needs_redraw = false;
        }

        window.update_with_buffer(&framebuf, w, h)?;

        frame_count += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            window.set_title(&format!("windtower | {frame_count} fps"));
            frame_count = 0;
            last_fps_time = now;
        }
    }

    log::debug!("frame cache: {} hits, {} misses", cache.hits(), cache.misses());
    Ok(())
}
