//! Orbit camera and perspective projection for the 3-D scenes.

use glam::{DMat4, DVec3, DVec4};

/// Orbit camera around a scene-supplied target. World z is up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f64,
    /// Elevation angle in radians.
    pub pitch: f64,
    /// Distance multiplier applied to the scene's framing radius.
    pub distance: f64,
}

const PITCH_LIMIT: f64 = 1.45;
const DISTANCE_MIN: f64 = 0.5;
const DISTANCE_MAX: f64 = 4.0;
const FOV_Y: f64 = 0.75;

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: -0.9,
            pitch: 0.35,
            distance: 1.6,
        }
    }
}

impl OrbitCamera {
    pub fn orbit(&mut self, d_yaw: f64, d_pitch: f64) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(std::f64::consts::TAU);
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom(&mut self, factor: f64) {
        self.distance = (self.distance * factor).clamp(DISTANCE_MIN, DISTANCE_MAX);
    }

    /// Clamp externally supplied values (config file) into the usable range.
    pub fn sanitized(self) -> Self {
        Self {
            yaw: self.yaw.rem_euclid(std::f64::consts::TAU),
            pitch: self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance: self.distance.clamp(DISTANCE_MIN, DISTANCE_MAX),
        }
    }

    /// World-space eye position when framing `target` at `radius`.
    pub fn eye(&self, target: DVec3, radius: f64) -> DVec3 {
        let d = self.distance * radius;
        let offset = DVec3::new(
            d * self.pitch.cos() * self.yaw.cos(),
            d * self.pitch.cos() * self.yaw.sin(),
            d * self.pitch.sin(),
        );
        target + offset
    }
}

/// Screen-space result of projecting a world point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Clip-space w; larger is farther from the eye.
    pub depth: f64,
}

/// Precomputed view-projection for one frame.
pub struct Projector {
    view_proj: DMat4,
    width: f64,
    height: f64,
    near: f64,
}

impl Projector {
    pub fn new(camera: &OrbitCamera, target: DVec3, radius: f64, width: usize, height: usize) -> Self {
        let eye = camera.eye(target, radius);
        let view = DMat4::look_at_rh(eye, target, DVec3::Z);
        let aspect = width.max(1) as f64 / height.max(1) as f64;
        let near = radius * 0.05;
        let far = radius * (DISTANCE_MAX + 2.0) * 2.0;
        let proj = DMat4::perspective_rh(FOV_Y, aspect, near, far);
        Self {
            view_proj: proj * view,
            width: width as f64,
            height: height as f64,
            near,
        }
    }

    /// Screen pixels spanned by one world unit at clip depth `depth`.
    pub fn pixels_per_unit(&self, depth: f64) -> f64 {
        self.height / (2.0 * (FOV_Y * 0.5).tan() * depth.max(self.near))
    }

    /// Project to pixel coordinates; `None` for points behind the near plane.
    pub fn project(&self, p: [f64; 3]) -> Option<ScreenPoint> {
        let clip: DVec4 = self.view_proj * DVec4::new(p[0], p[1], p[2], 1.0);
        if clip.w <= self.near {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some(ScreenPoint {
            x: (ndc_x + 1.0) * 0.5 * self.width,
            y: (1.0 - ndc_y) * 0.5 * self.height,
            depth: clip.w,
        })
    }
}
