// sim/ - Ripple simulation
//
// One world object owns the height field, the refractor and the config.
// The host owns the timer: it calls tick() once per frame interval and
// presents pixels() after every tick, including the one that settles.

mod field;

pub use field::HeightField;

use crate::config::RippleConfig;
use crate::error::RippleError;
use crate::render::Refractor;

/// Ripple simulation world
pub struct RippleWorld {
    config: RippleConfig,
    field: HeightField,
    refractor: Refractor,
    // Running while drops are live; Idle once a tick finds no energy
    active: bool,
}

impl RippleWorld {
    /// Build a world sized to the source image. `texture` is the RGBA pixel
    /// snapshot of the image and is never mutated; the output buffer starts
    /// as a copy of it.
    pub fn new(
        width: u32,
        height: u32,
        texture: Vec<u8>,
        config: RippleConfig,
    ) -> Result<Self, RippleError> {
        let refractor = Refractor::new(width, height, texture)?;
        Ok(Self {
            config,
            field: HeightField::new(width as usize, height as usize),
            refractor,
            active: false,
        })
    }

    /// Inject a drop at surface coordinates. Starts the simulation if idle;
    /// the host should check is_active() afterwards and arm its timer.
    pub fn add_drop(&mut self, x: i32, y: i32) {
        self.field.add_drop(
            x,
            y,
            self.config.drop_radius as i32,
            self.config.drop_depth as i32,
        );
        self.active = true;
    }

    /// Advance one tick, refracting every changed cell into the output
    /// buffer. Returns true while energy remains; the first tick returning
    /// false leaves the world idle.
    pub fn tick(&mut self) -> bool {
        let depth = self.config.drop_depth as i32;
        let refractor = &mut self.refractor;

        let found = self
            .field
            .step(self.config.damping_shift, |i, j, value| {
                refractor.refract(i, j, value, depth);
            });

        self.active = found;
        found
    }

    /// Running (drops live) vs Idle (settled, timer may stop)
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// RGBA output buffer, ready for the host to present
    pub fn pixels(&self) -> &[u8] {
        self.refractor.output()
    }

    pub fn config(&self) -> &RippleConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.field.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.field.height() as u32
    }

    #[cfg(test)]
    fn field(&self) -> &HeightField {
        &self.field
    }
}
