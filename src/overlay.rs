use crate::field::{FrameParams, Resolution};
use crate::renderer::{self, Canvas, FONT_HEIGHT};

/// Number of adjustable parameters.
const PARAM_COUNT: usize = 4;

/// Gauge width in character cells.
const GAUGE_WIDTH: usize = 8;

/// Overlay panel state.
pub struct OverlayState {
    pub visible: bool,
    pub selected: usize,
}

impl OverlayState {
    pub fn new() -> Self {
        Self {
            visible: false,
            selected: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn navigate(&mut self, delta: isize) {
        let count = PARAM_COUNT as isize;
        self.selected = ((self.selected as isize + delta).rem_euclid(count)) as usize;
    }
}

/// A bounded slider over one field of [`FrameParams`].
pub struct ParamDef {
    pub name: &'static str,
    pub short: &'static str,
    pub desc: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub fine_step: f64,
    pub default: f64,
    pub get: fn(&FrameParams) -> f64,
    pub set: fn(&mut FrameParams, f64),
}

pub const PARAM_DEFS: [ParamDef; PARAM_COUNT] = [
    ParamDef {
        name: "wind",
        short: "m/s",
        desc: "wind velocity",
        min: 10.0,
        max: 100.0,
        step: 5.0,
        fine_step: 1.0,
        default: 45.0,
        get: |p| p.velocity,
        set: |p, v| p.velocity = v.round(),
    },
    ParamDef {
        name: "twist",
        short: "rad",
        desc: "tower twist from base to top",
        min: 0.0,
        max: 3.0,
        step: 0.1,
        fine_step: 0.01,
        default: 1.5,
        get: |p| p.twist,
        set: |p, v| p.twist = v,
    },
    ParamDef {
        name: "panel",
        short: "strength",
        desc: "facade panel material strength",
        min: 1000.0,
        max: 5000.0,
        step: 100.0,
        fine_step: 10.0,
        default: 2500.0,
        get: |p| p.strength,
        set: |p, v| p.strength = v,
    },
    ParamDef {
        name: "res",
        short: "display",
        desc: "surface drawing density (low/high)",
        min: 0.0,
        max: 1.0,
        step: 1.0,
        fine_step: 1.0,
        default: 0.0,
        get: |p| p.resolution.as_f64(),
        set: |p, v| p.resolution = Resolution::from_f64(v),
    },
];

/// Adjust a parameter by delta steps (positive = increase, negative = decrease).
/// If `fine` is true, use fine_step instead of step.
/// Returns true if the value actually changed.
pub fn adjust_param(params: &mut FrameParams, selected: usize, delta: i32, fine: bool) -> bool {
    let def = &PARAM_DEFS[selected];
    let old = (def.get)(params);
    let step = if fine { def.fine_step } else { def.step };
    let new_val = (old + delta as f64 * step).clamp(def.min, def.max);
    (def.set)(params, new_val);
    ((def.get)(params) - old).abs() > f64::EPSILON
}

/// Reset a parameter to its default value.
pub fn reset_param(params: &mut FrameParams, selected: usize) {
    let def = &PARAM_DEFS[selected];
    (def.set)(params, def.default);
}

/// Force every parameter into its slider range (used for config-file values).
pub fn clamp_params(params: FrameParams) -> FrameParams {
    let mut out = params;
    for def in &PARAM_DEFS {
        let v = (def.get)(&out);
        let v = if v.is_finite() { v.clamp(def.min, def.max) } else { def.default };
        (def.set)(&mut out, v);
    }
    out
}

fn format_value(def: &ParamDef, params: &FrameParams) -> String {
    if def.name == "res" {
        return params.resolution.label().to_string();
    }
    let val = (def.get)(params);
    if def.fine_step >= 1.0 {
        format!("{:.0}", val)
    } else {
        format!("{:.2}", val)
    }
}

/// Colors used in the overlay panel.
mod colors {
    pub const BORDER: [u8; 3] = [0x44, 0x44, 0x44];
    pub const HEADER: [u8; 3] = [0x00, 0xBB, 0xBB];
    pub const LABEL_NORMAL: [u8; 3] = [0x88, 0x88, 0x88];
    pub const LABEL_SELECTED: [u8; 3] = [0xFF, 0xFF, 0xFF];
    pub const VALUE: [u8; 3] = [0xCC, 0xCC, 0xCC];
    pub const DESC_NORMAL: [u8; 3] = [0x66, 0x66, 0x66];
    pub const DESC_SELECTED: [u8; 3] = [0xAA, 0xAA, 0xAA];
    pub const HINT: [u8; 3] = [0x44, 0x88, 0x88];
    pub const CURSOR: [u8; 3] = [0x00, 0xFF, 0xFF];
    pub const GAUGE_EMPTY: [u8; 3] = [0x22, 0x22, 0x22];
}

/// Gauge bar with a teal gradient over the filled fraction.
fn draw_gauge(canvas: &mut Canvas, x: usize, y: usize, ratio: f64, width_px: usize, height: usize) {
    let filled_px = ((ratio * width_px as f64).round() as usize).min(width_px);
    for dx in 0..width_px {
        let rgb = if dx < filled_px {
            let t = dx as f64 / width_px as f64;
            let g = (0x55 as f64 + t * (0xCC - 0x55) as f64) as u8;
            [0, g, g]
        } else {
            colors::GAUGE_EMPTY
        };
        canvas.fill_rect(x + dx, y, 1, height, rgb);
    }
}

/// Render the parameter panel centered over the display area.
/// Does nothing if `state.visible` is false.
pub fn render_overlay(
    canvas: &mut Canvas,
    display_width: usize,
    display_height: usize,
    state: &OverlayState,
    params: &FrameParams,
) {
    if !state.visible {
        return;
    }

    // 7x9 glyphs scaled up from the 5x7 font
    let cw: usize = 7;
    let ch: usize = 9;
    let sc = cw + cw / 5 + 1;
    let row_h = ch + 4;
    let pad = 10;

    // "> twist  ████████  1.50  rad"
    let content_chars = 34;
    let panel_w = content_chars * sc + pad * 2;
    let panel_h = pad + row_h + 4 + PARAM_COUNT * row_h + 6 + row_h + 4 + (FONT_HEIGHT + 2) + pad;

    let panel_w = panel_w.min(display_width.saturating_sub(4));
    let panel_h = panel_h.min(display_height.saturating_sub(4));
    let px = display_width.saturating_sub(panel_w) / 2;
    let py = display_height.saturating_sub(panel_h) / 2;

    canvas.darken_rect(px, py, panel_w, panel_h, 0.25);
    canvas.stroke_rect(px, py, panel_w, panel_h, colors::BORDER);

    let left = px + pad;
    let mut cy = py + pad;

    renderer::draw_text_sized(canvas, left, cy, "design parameters", colors::HEADER, cw, ch);
    cy += row_h + 4;

    for (i, def) in PARAM_DEFS.iter().enumerate() {
        let is_sel = i == state.selected;
        let label_color = if is_sel { colors::LABEL_SELECTED } else { colors::LABEL_NORMAL };
        let desc_color = if is_sel { colors::DESC_SELECTED } else { colors::DESC_NORMAL };

        if is_sel {
            renderer::draw_text_sized(canvas, left, cy, ">", colors::CURSOR, cw, ch);
        }
        renderer::draw_text_sized(canvas, left + 2 * sc, cy, def.name, label_color, cw, ch);

        let mut cx = left + 8 * sc;
        let ratio = ((def.get)(params) - def.min) / (def.max - def.min);
        draw_gauge(canvas, cx, cy, ratio.clamp(0.0, 1.0), GAUGE_WIDTH * sc, ch);
        cx += GAUGE_WIDTH * sc + sc;

        cx = renderer::draw_text_sized(canvas, cx, cy, &format_value(def, params), colors::VALUE, cw, ch);
        renderer::draw_text_sized(canvas, cx + sc, cy, def.short, desc_color, cw, ch);

        cy += row_h;
    }

    cy += 6;
    let sel_def = &PARAM_DEFS[state.selected];
    renderer::draw_text_sized(canvas, left, cy, sel_def.desc, colors::DESC_SELECTED, cw, ch);
    cy += row_h + 4;

    renderer::draw_text(canvas, left, cy, "space=close  ud=nav  lr=adj  ,.=fine  r=reset", colors::HINT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderConfig;

    #[test]
    fn test_overlay_toggle() {
        let mut state = OverlayState::new();
        assert!(!state.visible);
        state.toggle();
        assert!(state.visible);
        state.toggle();
        assert!(!state.visible);
    }

    #[test]
    fn test_navigate_wraps() {
        let mut state = OverlayState::new();
        state.navigate(-1);
        assert_eq!(state.selected, PARAM_COUNT - 1, "Should wrap to last");
        state.navigate(1);
        assert_eq!(state.selected, 0, "Should wrap back to first");
    }

    #[test]
    fn test_param_defaults_match_frame_params() {
        let defaults = FrameParams::default();
        for def in &PARAM_DEFS {
            let v = (def.get)(&defaults);
            assert!(
                (v - def.default).abs() < 1e-10,
                "PARAM_DEFS.default for {} ({}) doesn't match FrameParams::default() ({})",
                def.name, def.default, v
            );
        }
    }

    #[test]
    fn test_adjust_velocity_stays_integer() {
        let mut params = FrameParams::default();
        assert!(adjust_param(&mut params, 0, 1, true));
        assert_eq!(params.velocity, 46.0);
        assert!(adjust_param(&mut params, 0, -2, false));
        assert_eq!(params.velocity, 36.0);
    }

    #[test]
    fn test_adjust_clamps() {
        let mut params = FrameParams::default();
        params.twist = 0.0;
        assert!(!adjust_param(&mut params, 1, -1, false), "Should not change when at min");
        assert_eq!(params.twist, 0.0);

        params.strength = 5000.0;
        assert!(!adjust_param(&mut params, 2, 1, false), "Should not change when at max");
        assert_eq!(params.strength, 5000.0);
    }

    #[test]
    fn test_adjust_resolution_toggles() {
        let mut params = FrameParams::default();
        assert!(adjust_param(&mut params, 3, 1, false));
        assert_eq!(params.resolution, Resolution::High);
        assert!(!adjust_param(&mut params, 3, 1, false));
        assert!(adjust_param(&mut params, 3, -1, true));
        assert_eq!(params.resolution, Resolution::Low);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut params = FrameParams::default();
        params.twist = 2.9;
        reset_param(&mut params, 1);
        assert!((params.twist - 1.5).abs() < 1e-10, "twist should reset to 1.5, got {}", params.twist);
    }

    #[test]
    fn test_clamp_params_pulls_into_range() {
        let wild = FrameParams {
            velocity: 400.0,
            twist: -1.0,
            strength: f64::NAN,
            resolution: Resolution::High,
        };
        let p = clamp_params(wild);
        assert_eq!(p.velocity, 100.0);
        assert_eq!(p.twist, 0.0);
        assert_eq!(p.strength, 2500.0);
        assert_eq!(p.resolution, Resolution::High);
    }

    #[test]
    fn test_gauge_empty_full() {
        let w = 200;
        let h = 20;
        let mut buf_empty = vec![0u8; w * h * 4];
        let mut buf_full = vec![0u8; w * h * 4];
        draw_gauge(&mut Canvas::new(&mut buf_empty, w, h), 4, 4, 0.0, 64, FONT_HEIGHT);
        draw_gauge(&mut Canvas::new(&mut buf_full, w, h), 4, 4, 1.0, 64, FONT_HEIGHT);

        let off = (4 * w + 4) * 4;
        assert_eq!(buf_empty[off], 0x22, "Empty gauge should be #22 at start");
        assert!(buf_full[off + 1] > 0x22, "Full gauge should have teal fill");
    }

    #[test]
    fn test_overlay_invisible_noop() {
        let cfg = RenderConfig::fit(542, 512);
        let mut buf = vec![42u8; cfg.buffer_len()];
        let orig = buf.clone();
        let state = OverlayState::new();
        let mut canvas = Canvas::new(&mut buf, cfg.frame_width, cfg.frame_height);
        render_overlay(&mut canvas, cfg.display_width, cfg.display_height, &state, &FrameParams::default());
        assert_eq!(buf, orig, "Invisible overlay should not modify buffer");
    }

    #[test]
    fn test_overlay_visible_draws_panel() {
        let cfg = RenderConfig::fit(542, 512);
        let mut buf = vec![0u8; cfg.buffer_len()];
        let mut state = OverlayState::new();
        state.toggle();
        let mut canvas = Canvas::new(&mut buf, cfg.frame_width, cfg.frame_height);
        render_overlay(&mut canvas, cfg.display_width, cfg.display_height, &state, &FrameParams::default());
        assert!(buf.iter().any(|&b| b == 0x44), "border should be drawn");
    }
}
