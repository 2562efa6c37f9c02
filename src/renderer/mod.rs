pub mod camera;
mod canvas;
mod color;
mod font;

// Re-export public API
pub use camera::OrbitCamera;
pub use canvas::Canvas;
use color::ColorMap;
pub use font::render_status;
pub(crate) use font::{draw_text, draw_text_sized, FONT_HEIGHT, STATUS_BAR_HEIGHT};

use glam::DVec3;

use crate::field::tower::FlowSample;
use crate::field::{diagnostics, Resolution, CANDIDATE_COUNT, TOWER_HEIGHT};
use crate::state::{RenderableArrays, Scene};
use camera::Projector;
use color::{BAR_GAP, BAR_TOTAL, BAR_WIDTH, BUILDING_BODY, BUILDING_EDGE, CORE_STEEL, LABEL_GAP, TICK_LEN};

const BACKGROUND: [u8; 3] = [0, 0, 0];
const TITLE_COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];
const LABEL_COLOR: [u8; 3] = [0xAA, 0xAA, 0xAA];

/// Quiver arrows are drawn at a fixed world length along the unit flow direction.
const ARROW_LENGTH: f64 = 5.0;
const ARROW_ALPHA: f64 = 0.6;
const BODY_ALPHA: f64 = 0.9;
const EDGE_ALPHA: f64 = 0.2;
const PANEL_ALPHA: f64 = 0.9;

/// Smallest display area accepted by [`RenderConfig::fit`].
const MIN_DISPLAY: usize = 64;

/// Frame layout: scene area on the left, color bar on the right, status bar below.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub display_width: usize,
    pub display_height: usize,
    pub frame_width: usize,
    pub frame_height: usize,
}

impl RenderConfig {
    /// Lay out a frame of exactly `pixel_width` x `pixel_height` when that is
    /// large enough, growing to the minimum otherwise.
    pub fn fit(pixel_width: usize, pixel_height: usize) -> Self {
        let display_width = pixel_width.saturating_sub(BAR_TOTAL).max(MIN_DISPLAY);
        let display_height = pixel_height.saturating_sub(STATUS_BAR_HEIGHT).max(MIN_DISPLAY);
        Self {
            display_width,
            display_height,
            frame_width: display_width + BAR_TOTAL,
            frame_height: display_height + STATUS_BAR_HEIGHT,
        }
    }

    pub fn buffer_len(&self) -> usize {
        self.frame_width * self.frame_height * 4
    }
}

/// Render the active scene, title and color bar into `buf` (RGBA8).
/// The buffer is resized and cleared as needed; the status bar is left to
/// [`render_status`].
pub fn render_into(buf: &mut Vec<u8>, frame: &RenderableArrays, scene: Scene, camera: &OrbitCamera, cfg: &RenderConfig) {
    buf.resize(cfg.buffer_len(), 0);
    let mut canvas = Canvas::new(buf, cfg.frame_width, cfg.frame_height);
    canvas.clear(BACKGROUND);

    let (colormap, lo_label, hi_label, title) = match scene {
        Scene::TowerFlow => {
            let (lo, hi) = diagnostics::speed_range(&frame.tower.flow);
            draw_tower(&mut canvas, frame, camera, cfg, lo, hi);
            let title = format!("aerodynamic interaction | re: {}", diagnostics::reynolds_label(frame.params.velocity));
            (ColorMap::Jet, format!("{lo:.0}"), format!("{hi:.0}"), title)
        }
        Scene::PanelErosion => {
            draw_panels(&mut canvas, frame, camera, cfg);
            let strength = frame.panels.strength;
            let title = format!("panel erosion | {}/{} panels", frame.panels.panels.len(), CANDIDATE_COUNT);
            (ColorMap::Ember, "0".to_string(), format!("{strength:.0}"), title)
        }
    };

    // Scene geometry may spill past the display edge; repaint the bar column.
    canvas.fill_rect(cfg.display_width, 0, BAR_TOTAL, cfg.display_height, BACKGROUND);
    draw_color_bar(&mut canvas, cfg, colormap, &lo_label, &hi_label);

    draw_text(&mut canvas, 6, 6, &title, TITLE_COLOR);
}

/// Tower scene: arrows behind the axis, building wireframe, then arrows in front.
fn draw_tower(canvas: &mut Canvas, frame: &RenderableArrays, camera: &OrbitCamera, cfg: &RenderConfig, lo: f64, hi: f64) {
    let target = DVec3::new(0.0, 0.0, TOWER_HEIGHT * 0.5);
    let proj = Projector::new(camera, target, TOWER_HEIGHT, cfg.display_width, cfg.display_height);
    let axis_depth = proj.project(target.to_array()).map_or(f64::INFINITY, |p| p.depth);

    let (behind, in_front): (Vec<&FlowSample>, Vec<&FlowSample>) = frame
        .tower
        .flow
        .iter()
        .partition(|s| proj.project(s.position).is_some_and(|p| p.depth > axis_depth));

    for s in &behind {
        draw_arrow(canvas, &proj, s.position, s.velocity, s.speed(), lo, hi);
    }
    draw_surface(canvas, &proj, frame);
    for s in &in_front {
        draw_arrow(canvas, &proj, s.position, s.velocity, s.speed(), lo, hi);
    }
}

fn draw_segment(canvas: &mut Canvas, proj: &Projector, a: [f64; 3], b: [f64; 3], rgb: [u8; 3], alpha: f64) {
    if let (Some(pa), Some(pb)) = (proj.project(a), proj.project(b)) {
        canvas.line(
            pa.x.round() as isize,
            pa.y.round() as isize,
            pb.x.round() as isize,
            pb.y.round() as isize,
            rgb,
            alpha,
        );
    }
}

/// Meridians in the body tint, rings as faint white edges. Low resolution
/// draws every other ring.
fn draw_surface(canvas: &mut Canvas, proj: &Projector, frame: &RenderableArrays) {
    let mesh = &frame.tower.surface;
    let ring_step = match frame.params.resolution {
        Resolution::Low => 2,
        Resolution::High => 1,
    };

    for col in 0..mesh.cols {
        for row in 1..mesh.rows {
            draw_segment(canvas, proj, mesh.point(row - 1, col), mesh.point(row, col), BUILDING_BODY, BODY_ALPHA);
        }
    }

    let mut rows: Vec<usize> = (0..mesh.rows).step_by(ring_step).collect();
    if rows.last() != Some(&(mesh.rows - 1)) {
        rows.push(mesh.rows - 1);
    }
    for row in rows {
        for col in 1..mesh.cols {
            draw_segment(canvas, proj, mesh.point(row, col - 1), mesh.point(row, col), BUILDING_EDGE, EDGE_ALPHA);
        }
    }
}

/// Fixed-length arrow along the unit flow direction, colored by speed.
fn draw_arrow(canvas: &mut Canvas, proj: &Projector, pos: [f64; 3], vel: [f64; 3], speed: f64, lo: f64, hi: f64) {
    let rgb = color::map_to_rgb(color::normalize(speed, lo, hi), ColorMap::Jet);
    let Some(tail) = proj.project(pos) else {
        return;
    };
    if speed <= 0.0 {
        canvas.disc(tail.x.round() as isize, tail.y.round() as isize, 0, rgb, ARROW_ALPHA);
        return;
    }
    let k = ARROW_LENGTH / speed;
    let tip = [pos[0] + vel[0] * k, pos[1] + vel[1] * k, pos[2] + vel[2] * k];
    draw_segment(canvas, proj, pos, tip, rgb, ARROW_ALPHA);
    if let Some(head) = proj.project(tip) {
        canvas.disc(head.x.round() as isize, head.y.round() as isize, 1, rgb, ARROW_ALPHA);
    }
}

/// Panel scene: depth-sorted splats, far to near.
fn draw_panels(canvas: &mut Canvas, frame: &RenderableArrays, camera: &OrbitCamera, cfg: &RenderConfig) {
    let target = DVec3::new(4.5, 4.5, 9.5);
    let proj = Projector::new(camera, target, 25.0, cfg.display_width, cfg.display_height);
    let strength = frame.panels.strength;

    let mut splats: Vec<_> = frame
        .panels
        .panels
        .iter()
        .filter_map(|p| {
            let [x, y, z] = p.position;
            proj.project([x as f64, y as f64, z as f64]).map(|sp| (sp, p))
        })
        .collect();
    splats.sort_by(|a, b| b.0.depth.total_cmp(&a.0.depth));

    for (sp, panel) in splats {
        let rgb = if panel.is_core() {
            CORE_STEEL
        } else {
            color::map_to_rgb(color::normalize(panel.pressure, 0.0, strength), ColorMap::Ember)
        };
        let radius = (0.4 * proj.pixels_per_unit(sp.depth)).clamp(1.0, 12.0).round() as isize;
        canvas.disc(sp.x.round() as isize, sp.y.round() as isize, radius, rgb, PANEL_ALPHA);
    }
}

/// Vertical color bar right of the display, high end at the top.
fn draw_color_bar(canvas: &mut Canvas, cfg: &RenderConfig, colormap: ColorMap, lo_label: &str, hi_label: &str) {
    let dh = cfg.display_height;
    let bar_x = cfg.display_width + BAR_GAP;
    for y in 0..dh {
        let t = 1.0 - y as f64 / (dh - 1).max(1) as f64;
        let rgb = color::map_to_rgb(t, colormap);
        canvas.fill_rect(bar_x, y, BAR_WIDTH, 1, rgb);
    }

    let tick_x = bar_x + BAR_WIDTH;
    let label_x = tick_x + TICK_LEN + LABEL_GAP;
    for (y, label) in [(0, hi_label), (dh.saturating_sub(FONT_HEIGHT), lo_label)] {
        canvas.fill_rect(tick_x, y + FONT_HEIGHT / 2, TICK_LEN, 1, LABEL_COLOR);
        draw_text(canvas, label_x, y, label, LABEL_COLOR);
    }
}
