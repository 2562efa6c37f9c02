use std::f64::consts::PI;

use super::grid::linspace;

pub const TOWER_HEIGHT: f64 = 100.0;
pub const TOWER_RADIUS: f64 = 15.0;

/// Surface sampling: height levels x azimuth samples.
pub const SURFACE_LEVELS: usize = 50;
pub const SURFACE_AZIMUTHS: usize = 30;

/// Flow lattice extent and sample counts.
const FLOW_XY_EXTENT: f64 = 40.0;
const FLOW_XY_SAMPLES: usize = 15;
const FLOW_Z_MIN: f64 = 10.0;
const FLOW_Z_MAX: f64 = 90.0;
const FLOW_Z_SAMPLES: usize = 8;

/// Vertical turbulence term: amplitude and streamwise frequency.
const TURBULENCE_AMP: f64 = 5.0;
const TURBULENCE_FREQ: f64 = 0.1;

/// Twisted cylinder stored as three row-major grids, one row per height level.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceMesh {
    pub rows: usize,
    pub cols: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl SurfaceMesh {
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn point(&self, row: usize, col: usize) -> [f64; 3] {
        let i = self.index(row, col);
        [self.x[i], self.y[i], self.z[i]]
    }
}

/// One exterior lattice point with its deflected wind vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowSample {
    pub position: [f64; 3],
    /// (u, v, w) in m/s.
    pub velocity: [f64; 3],
}

impl FlowSample {
    pub fn speed(&self) -> f64 {
        let [u, v, w] = self.velocity;
        (u * u + v * v + w * w).sqrt()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TowerFrame {
    pub surface: SurfaceMesh,
    pub flow: Vec<FlowSample>,
}

/// Build the building surface and the masked flow field around it.
pub fn generate_tower(twist: f64, velocity: f64) -> TowerFrame {
    TowerFrame {
        surface: twisted_surface(twist),
        flow: flow_field(velocity),
    }
}

/// Ruled cylinder of radius [`TOWER_RADIUS`] whose rings rotate linearly with
/// height, reaching `twist` radians at the top.
pub fn twisted_surface(twist: f64) -> SurfaceMesh {
    let levels = linspace(0.0, TOWER_HEIGHT, SURFACE_LEVELS);
    let azimuths = linspace(0.0, 2.0 * PI, SURFACE_AZIMUTHS);
    let rate = twist / TOWER_HEIGHT;

    let n = SURFACE_LEVELS * SURFACE_AZIMUTHS;
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    let mut z = Vec::with_capacity(n);
    for &h in &levels {
        for &theta in &azimuths {
            let angle = theta + h * rate;
            x.push(TOWER_RADIUS * angle.cos());
            y.push(TOWER_RADIUS * angle.sin());
            z.push(h);
        }
    }

    SurfaceMesh {
        rows: SURFACE_LEVELS,
        cols: SURFACE_AZIMUTHS,
        x,
        y,
        z,
    }
}

/// Potential flow around an infinite cylinder plus an ad-hoc vertical term.
/// Lattice points on or inside the building are dropped.
/// Order: z outermost, then y, x innermost.
pub fn flow_field(velocity: f64) -> Vec<FlowSample> {
    let xs = linspace(-FLOW_XY_EXTENT, FLOW_XY_EXTENT, FLOW_XY_SAMPLES);
    let ys = linspace(-FLOW_XY_EXTENT, FLOW_XY_EXTENT, FLOW_XY_SAMPLES);
    let zs = linspace(FLOW_Z_MIN, FLOW_Z_MAX, FLOW_Z_SAMPLES);
    let r2_cyl = TOWER_RADIUS * TOWER_RADIUS;

    let mut out = Vec::with_capacity(xs.len() * ys.len() * zs.len());
    for &z in &zs {
        for &y in &ys {
            for &x in &xs {
                let r = (x * x + y * y).sqrt();
                if r <= TOWER_RADIUS {
                    continue;
                }
                debug_assert!(r > 0.0);

                let ratio = r2_cyl / (r * r);
                let phi2 = 2.0 * y.atan2(x);
                let u = velocity * (1.0 - ratio * phi2.cos());
                let v = -velocity * (1.0 + ratio) * phi2.sin();
                let w = (z / 100.0) * TURBULENCE_AMP * (x * TURBULENCE_FREQ).cos();
                debug_assert!(u.is_finite() && v.is_finite() && w.is_finite());

                out.push(FlowSample {
                    position: [x, y, z],
                    velocity: [u, v, w],
                });
            }
        }
    }
    out
}
