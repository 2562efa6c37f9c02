/// Facade lattice dimensions (x, y, z).
pub const LATTICE: [u32; 3] = [10, 10, 20];
pub const CANDIDATE_COUNT: usize = (LATTICE[0] * LATTICE[1] * LATTICE[2]) as usize;

/// Half of sea-level air density in kg/m^3, rounded.
const HALF_RHO: f64 = 0.613;
/// Amplification applied on top of the dynamic pressure.
const GUST_FACTOR: f64 = 1.5;
/// Exponent of the height law.
const HEIGHT_EXPONENT: f64 = 0.5;

/// Structural core columns that never erode.
const CORE_XY: [u32; 2] = [4, 5];
pub const CORE_COUNT: usize = CORE_XY.len() * CORE_XY.len() * LATTICE[2] as usize;

/// One surviving facade panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Panel {
    pub position: [u32; 3],
    pub pressure: f64,
}

impl Panel {
    pub fn is_core(&self) -> bool {
        in_core(self.position[0], self.position[1])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PanelField {
    pub panels: Vec<Panel>,
    /// Threshold the field was filtered with.
    pub strength: f64,
}

#[inline]
fn in_core(x: u32, y: u32) -> bool {
    CORE_XY.contains(&x) && CORE_XY.contains(&y)
}

/// Square-root height law, 0 at ground level.
#[inline]
pub fn height_factor(z: u32) -> f64 {
    (z as f64 / LATTICE[2] as f64).powf(HEIGHT_EXPONENT)
}

/// Scaled dynamic pressure acting on a panel at level `z`.
pub fn local_pressure(velocity: f64, z: u32) -> f64 {
    HALF_RHO * velocity * velocity * height_factor(z) * GUST_FACTOR
}

/// Keep every panel whose pressure stays below `strength`, plus the core.
/// Order: x outermost, then y, z innermost.
pub fn generate_panels(velocity: f64, strength: f64) -> PanelField {
    let mut panels = Vec::with_capacity(CANDIDATE_COUNT);
    for x in 0..LATTICE[0] {
        for y in 0..LATTICE[1] {
            for z in 0..LATTICE[2] {
                let pressure = local_pressure(velocity, z);
                debug_assert!(pressure.is_finite());
                if pressure < strength || in_core(x, y) {
                    panels.push(Panel {
                        position: [x, y, z],
                        pressure,
                    });
                }
            }
        }
    }
    debug_assert!(panels.len() >= CORE_COUNT);
    PanelField { panels, strength }
}
