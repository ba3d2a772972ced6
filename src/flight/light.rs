use crate::waypoint::Rgb;
use std::sync::Mutex;
use std::sync::PoisonError;

/// Onboard light. Calls are fire-and-forget, with no acknowledgement.
pub trait Light: Send + Sync {
    fn set_color(&self, rgb: Rgb);
    fn set_brightness(&self, brightness: f64);
    fn set_on(&self, on: bool);
}

/// Commanded actuator state of the light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightState {
    pub rgb: Rgb,
    pub brightness: f64,
    pub on: bool,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            rgb: Rgb::WHITE,
            brightness: 1.0,
            on: false,
        }
    }
}

impl LightState {
    /// Emitted color as 8-bit RGBA: dimmed by brightness, transparent black when off.
    pub fn rgba(&self) -> [u8; 4] {
        if !self.on {
            return [0, 0, 0, 0];
        }
        let [r, g, b] = self.rgb.scale(self.brightness).bytes();
        [r, g, b, 255]
    }
}

/// In-process light that records the commanded state for observers.
#[derive(Debug, Default)]
pub struct Lamp(Mutex<LightState>);

impl Lamp {
    pub fn state(&self) -> LightState {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut LightState),
    {
        let mut state = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *state);
        log::debug!("[light] {:?} rgba {:?}", state.rgb, state.rgba());
    }
}

impl Light for Lamp {
    fn set_color(&self, rgb: Rgb) {
        self.update(|s| s.rgb = rgb);
    }
    fn set_brightness(&self, brightness: f64) {
        self.update(|s| s.brightness = brightness.clamp(0.0, 1.0));
    }
    fn set_on(&self, on: bool) {
        self.update(|s| s.on = on);
    }
}
