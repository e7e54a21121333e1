pub const DEFAULT_BOTTOM_PIXELS: f64 = 50.0;
pub const DEFAULT_FIRE_DELAY_MS: u32 = 150;
pub const DEFAULT_INTERVAL_FREQUENCY_MS: u32 = 250;

pub const INNER_WRAP_CLASS: &str = "endless_scroll_inner_wrap";
