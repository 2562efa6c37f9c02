use serde::Deserialize;

/// Display density selector shown on the control surface.
///
/// Not consumed by the generators: lattice sizes are fixed. The renderer uses
/// it to pick how many surface rings to draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[default]
    Low,
    High,
}

impl Resolution {
    pub fn label(self) -> &'static str {
        match self {
            Resolution::Low => "low",
            Resolution::High => "high",
        }
    }

    /// Numeric encoding used by the slider panel (0 = low, 1 = high).
    pub fn as_f64(self) -> f64 {
        match self {
            Resolution::Low => 0.0,
            Resolution::High => 1.0,
        }
    }

    pub fn from_f64(v: f64) -> Self {
        if v >= 0.5 { Resolution::High } else { Resolution::Low }
    }
}

/// Parameter snapshot handed to the frame pipeline by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    /// Free-stream wind velocity in m/s.
    pub velocity: f64,
    /// Total tower twist from base to top, in radians.
    pub twist: f64,
    /// Panel material strength, compared against local pressure.
    pub strength: f64,
    pub resolution: Resolution,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            velocity: 45.0,
            twist: 1.5,
            strength: 2500.0,
            resolution: Resolution::Low,
        }
    }
}

impl FrameParams {
    /// Bit-exact key for memoization. Two snapshots share a key iff every
    /// field is bitwise identical, so `0.0` and `-0.0` are distinct keys.
    pub fn cache_key(&self) -> (u64, u64, u64, Resolution) {
        (
            self.velocity.to_bits(),
            self.twist.to_bits(),
            self.strength.to_bits(),
            self.resolution,
        )
    }
}
