pub mod endless_scroll;
pub mod node_utils;
pub mod unpack;

pub use endless_scroll::{use_element_endless_scroll, use_endless_scroll_with_probe, use_window_endless_scroll, UseEndlessScrollReturn};
pub use endless_scroll_core::{ReArm, ScrollConfig, ScrollError, ScrollSettings};
