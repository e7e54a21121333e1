use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BOTTOM_PIXELS, DEFAULT_FIRE_DELAY_MS, DEFAULT_INTERVAL_FREQUENCY_MS};
use crate::errors::ScrollError;
use crate::monitor::ReArm;

pub type ResetCounterFn = Rc<dyn Fn() -> bool>;
pub type FireCallbackFn = Rc<dyn Fn(ReArm, u64)>;
pub type CeaseFireFn = Rc<dyn Fn(u64) -> bool>;

/// Numeric and boolean options of a monitor. Missing fields fall back to their defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// distance in pixels from the end of the content that counts as near the end
    pub bottom_pixels: f64,
    /// re-arming has no effect after the first fire
    pub fire_once: bool,
    /// reserved, not used by the monitor
    pub fire_delay_ms: u32,
    /// period of the poll checking whether the target was scrolled near its end
    pub interval_frequency_ms: u32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            bottom_pixels: DEFAULT_BOTTOM_PIXELS,
            fire_once: false,
            fire_delay_ms: DEFAULT_FIRE_DELAY_MS,
            interval_frequency_ms: DEFAULT_INTERVAL_FREQUENCY_MS,
        }
    }
}

impl ScrollSettings {
    pub fn from_json(json: &str) -> Result<Self, ScrollError> {
        let settings: ScrollSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ScrollError> {
        if !self.bottom_pixels.is_finite() || self.bottom_pixels < 0.0 {
            return Err(ScrollError::InvalidConfig(format!(
                "bottom_pixels must be a finite, non-negative number, got {}", self.bottom_pixels
            )));
        }
        if self.interval_frequency_ms == 0 {
            return Err(ScrollError::InvalidConfig(String::from("interval_frequency_ms must be greater than 0")));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.interval_frequency_ms))
    }
}

/// Integrator supplied hooks of a monitor.
#[derive(Clone)]
pub struct ScrollHooks {
    pub reset_counter: ResetCounterFn,
    pub callback: FireCallbackFn,
    pub cease_fire: CeaseFireFn,
}

impl Default for ScrollHooks {
    fn default() -> Self {
        Self {
            reset_counter: Rc::new(|| false),
            callback: Rc::new(|_, _| {}),
            cease_fire: Rc::new(|_| false),
        }
    }
}

impl fmt::Debug for ScrollHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollHooks").finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScrollConfig {
    pub settings: ScrollSettings,
    pub hooks: ScrollHooks,
}

impl ScrollConfig {
    pub fn new(settings: ScrollSettings) -> Self {
        Self {
            settings,
            hooks: ScrollHooks::default(),
        }
    }

    pub fn with_bottom_pixels(mut self, bottom_pixels: f64) -> Self {
        self.settings.bottom_pixels = bottom_pixels;
        self
    }

    pub fn with_fire_once(mut self, fire_once: bool) -> Self {
        self.settings.fire_once = fire_once;
        self
    }

    pub fn with_fire_delay_ms(mut self, fire_delay_ms: u32) -> Self {
        self.settings.fire_delay_ms = fire_delay_ms;
        self
    }

    pub fn with_interval_frequency_ms(mut self, interval_frequency_ms: u32) -> Self {
        self.settings.interval_frequency_ms = interval_frequency_ms;
        self
    }

    /// Called on every qualifying tick before the callback, returning true zeroes the fire sequence.
    pub fn with_reset_counter(mut self, reset_counter: impl Fn() -> bool + 'static) -> Self {
        self.hooks.reset_counter = Rc::new(reset_counter);
        self
    }

    /// Called when the target is near its end with a [`ReArm`] handle and the current fire sequence.
    pub fn with_callback(mut self, callback: impl Fn(ReArm, u64) + 'static) -> Self {
        self.hooks.callback = Rc::new(callback);
        self
    }

    /// Returning true permanently stops the monitor.
    pub fn with_cease_fire(mut self, cease_fire: impl Fn(u64) -> bool + 'static) -> Self {
        self.hooks.cease_fire = Rc::new(cease_fire);
        self
    }
}
