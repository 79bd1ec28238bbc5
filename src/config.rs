// config.rs - Tunables for drop injection, timing and damping
//
// Overrides arrive from the host (a JS options object on wasm, CLI flags in
// the native bin); values that fail validation are dropped with a warning
// rather than rejected.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RippleConfig {
    /// Half-side of the square neighborhood a drop energizes, in cells
    pub drop_radius: u32,
    /// Height added to each cell of the neighborhood
    pub drop_depth: u32,
    /// Tick period for the host timer, in milliseconds
    pub frame_interval_ms: u32,
    /// Damping is 1 - 2^-shift per tick; 0 disables damping
    pub damping_shift: u32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            drop_radius: 3,
            drop_depth: 1024,
            frame_interval_ms: 20,
            damping_shift: 5,
        }
    }
}

impl RippleConfig {
    /// Apply one named override. Unknown names are ignored, invalid values
    /// are logged and ignored.
    pub fn set(&mut self, key: &str, value: f64) {
        // Every field crosses a host boundary that speaks i32
        let positive = |v: f64| -> Option<u32> {
            (v.fract() == 0.0 && v >= 1.0 && v <= i32::MAX as f64).then_some(v as u32)
        };
        match key {
            "dropRadius" => match positive(value) {
                Some(v) => self.drop_radius = v,
                None => log::warn!("ignoring dropRadius = {}", value),
            },
            "dropDepth" => match positive(value) {
                Some(v) => self.drop_depth = v,
                None => log::warn!("ignoring dropDepth = {}", value),
            },
            "frameIntervalMs" => match positive(value) {
                Some(v) => self.frame_interval_ms = v,
                None => log::warn!("ignoring frameIntervalMs = {}", value),
            },
            "dampingShift" => {
                // Zero is a legal (if non-converging) shift
                if value.fract() == 0.0 && value >= 0.0 && value < 32.0 {
                    self.damping_shift = value as u32;
                } else {
                    log::warn!("ignoring dampingShift = {}", value);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_water_tuning() {
        let c = RippleConfig::default();
        assert_eq!(c.drop_radius, 3);
        assert_eq!(c.drop_depth, 1024);
        assert_eq!(c.frame_interval_ms, 20);
        assert_eq!(c.damping_shift, 5);
    }

    #[test]
    fn overrides_merge_known_keys() {
        let mut c = RippleConfig::default();
        c.set("dropRadius", 5.0);
        c.set("dampingShift", 4.0);
        assert_eq!(c.drop_radius, 5);
        assert_eq!(c.damping_shift, 4);
        // untouched fields keep defaults
        assert_eq!(c.drop_depth, 1024);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut c = RippleConfig::default();
        c.set("splashHeight", 99.0);
        assert_eq!(c, RippleConfig::default());
    }

    #[test]
    fn invalid_values_are_ignored() {
        let mut c = RippleConfig::default();
        c.set("dropDepth", 0.0);
        c.set("dropDepth", -3.0);
        c.set("dropDepth", 1.5);
        c.set("dampingShift", 32.0);
        assert_eq!(c, RippleConfig::default());
    }

    #[test]
    fn damping_shift_zero_is_allowed() {
        let mut c = RippleConfig::default();
        c.set("dampingShift", 0.0);
        assert_eq!(c.damping_shift, 0);
    }
}
