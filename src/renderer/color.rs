/// Selects which color palette to use for scalar mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorMap {
    /// Jet: navy -> azure -> mint -> orange -> maroon (flow speed).
    Jet,
    /// Ember: soot -> oxblood -> flame -> amber -> white heat (panel load).
    Ember,
}

/// Jet sampled at quarter points.
pub(crate) const JET_STOPS: [(f64, f64, f64); 5] = [
    (0.0, 0.0, 128.0),     // navy                  (0.00)
    (0.0, 128.0, 255.0),   // azure                 (0.25)
    (128.0, 255.0, 128.0), // mint                  (0.50)
    (255.0, 128.0, 0.0),   // orange                (0.75)
    (128.0, 0.0, 0.0),     // maroon                (1.00)
];

/// Ember stops: unloaded panels stay dark, panels near failure glow.
pub(crate) const EMBER_STOPS: [(f64, f64, f64); 5] = [
    (30.0, 18.0, 16.0),    // soot                  (0.00)
    (120.0, 24.0, 20.0),   // oxblood               (0.25)
    (220.0, 80.0, 20.0),   // flame                 (0.50)
    (255.0, 180.0, 60.0),  // amber                 (0.75)
    (255.0, 245.0, 200.0), // white heat            (1.00)
];

/// Building and structural core tints.
pub(crate) const BUILDING_BODY: [u8; 3] = [0x2c, 0x3e, 0x50];
pub(crate) const BUILDING_EDGE: [u8; 3] = [0xff, 0xff, 0xff];
pub(crate) const CORE_STEEL: [u8; 3] = [0x7f, 0x8c, 0x8d];

/// Convert a [0.0, 1.0] value to RGB using the specified color map.
pub fn map_to_rgb(t: f64, colormap: ColorMap) -> [u8; 3] {
    let stops = match colormap {
        ColorMap::Jet => &JET_STOPS,
        ColorMap::Ember => &EMBER_STOPS,
    };

    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let seg = t * 4.0;
    let i = (seg as usize).min(3);
    let s = seg - i as f64;

    let (r0, g0, b0) = stops[i];
    let (r1, g1, b1) = stops[i + 1];

    [
        (r0 + s * (r1 - r0)) as u8,
        (g0 + s * (g1 - g0)) as u8,
        (b0 + s * (b1 - b0)) as u8,
    ]
}

/// Normalize `v` into [0, 1] over `[lo, hi]`; a collapsed range maps to 0.5.
pub fn normalize(v: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span.abs() < 1e-12 {
        0.5
    } else {
        ((v - lo) / span).clamp(0.0, 1.0)
    }
}

/// Color bar layout constants.
pub(crate) const BAR_GAP: usize = 6;
pub(crate) const BAR_WIDTH: usize = 20;
pub(crate) const TICK_LEN: usize = 4;
pub(crate) const LABEL_GAP: usize = 2;
pub(crate) const LABEL_WIDTH: usize = 30;
pub(crate) const BAR_TOTAL: usize = BAR_GAP + BAR_WIDTH + TICK_LEN + LABEL_GAP + LABEL_WIDTH;
