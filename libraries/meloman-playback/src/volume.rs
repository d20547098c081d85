//! Volume preference with logarithmic scaling
//!
//! The preference is a 0-100 level; outputs receive a perceptual gain mapped
//! from -60 dB to 0 dB.

/// Volume preference with logarithmic gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Cached linear gain multiplier
    linear_gain: f32,
}

impl Volume {
    /// Create a volume preference; values above 100 are clamped
    pub fn new(level: u8) -> Self {
        let level = level.min(100);
        Self {
            level,
            linear_gain: Self::calculate_linear_gain(level),
        }
    }

    /// Set the level from any integer, clamping into `[0, 100]`
    ///
    /// Returns `true` if the stored level changed.
    pub fn set_level(&mut self, level: i32) -> bool {
        let level = level.clamp(0, 100) as u8;
        let changed = level != self.level;
        self.level = level;
        self.linear_gain = Self::calculate_linear_gain(level);
        changed
    }

    /// Current level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Linear gain to hand to an audio output
    pub fn gain(&self) -> f32 {
        self.linear_gain
    }

    /// Convert volume percentage to linear gain
    ///
    /// Formula: gain = 10^((level% - 100) * 0.6 / 20)
    /// - 0%   → silence
    /// - 50%  → -30 dB → 0.0316 gain
    /// - 70%  → -18 dB → 0.126 gain (default)
    /// - 100% →   0 dB → 1.0 gain (unity)
    fn calculate_linear_gain(level: u8) -> f32 {
        if level == 0 {
            return 0.0;
        }

        let db = (level as f32 - 100.0) * 0.6;
        10.0_f32.powf(db / 20.0)
    }

    /// Gain expressed in dB (-60 at silence)
    pub fn to_db(&self) -> f32 {
        if self.level == 0 {
            -60.0
        } else {
            20.0 * self.linear_gain.log10()
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(70)
    }
}
