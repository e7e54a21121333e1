use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::errors::ScrollError;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollTargetKind {
    Window,
    Document,
    Element,
}

/// Snapshot of the scroll state of a target, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    /// full height of the scrollable content
    pub content_height: f64,
    /// visible height of the target
    pub viewport_height: f64,
    /// current vertical scroll offset
    pub scroll_top: f64,
}

impl ScrollMetrics {
    pub fn new(content_height: f64, viewport_height: f64, scroll_top: f64) -> Self {
        Self {
            content_height,
            viewport_height,
            scroll_top,
        }
    }

    pub fn is_near_end(&self, bottom_pixels: f64) -> bool {
        self.content_height - self.viewport_height <= self.scroll_top + bottom_pixels
    }
}

/// Measures the scroll state of a single target.
pub trait ScrollProbe {
    fn target_kind(&self) -> ScrollTargetKind;

    /// Returns `Ok(None)` when the target cannot be measured, which counts as not being near the end.
    /// Errors are recoverable, the monitor skips the tick.
    fn measure(&mut self) -> Result<Option<ScrollMetrics>, ScrollError>;
}

/// A scrollable element whose own height is its viewport. Its content extent is read from an inner wrapper
/// holding all of its children.
pub trait ContentHost {
    type Wrapper;

    /// Returns a wrapper inserted by a previous probe, if any.
    fn find_wrapper(&self) -> Result<Option<Self::Wrapper>, ScrollError>;
    /// Moves all children of the element into a new wrapper and returns it.
    fn wrap_children(&self) -> Result<Option<Self::Wrapper>, ScrollError>;
    fn wrapper_height(&self, wrapper: &Self::Wrapper) -> Result<f64, ScrollError>;
    fn viewport_height(&self) -> Result<f64, ScrollError>;
    fn scroll_top(&self) -> Result<f64, ScrollError>;
}

/// Probe of an element target, creates the measurement wrapper on first measurement and reuses it afterwards.
pub struct ElementProbe<H: ContentHost> {
    host: H,
    wrapper: Option<H::Wrapper>,
}

impl<H: ContentHost> ElementProbe<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            wrapper: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn has_wrapper(&self) -> bool {
        self.wrapper.is_some()
    }

    fn ensure_wrapper(&mut self) -> Result<(), ScrollError> {
        if self.wrapper.is_none() {
            self.wrapper = match self.host.find_wrapper()? {
                Some(wrapper) => Some(wrapper),
                None => {
                    log::debug!("Insert measurement wrapper in scroll target.");
                    self.host.wrap_children()?
                }
            };
        }
        Ok(())
    }
}

impl<H: ContentHost> ScrollProbe for ElementProbe<H> {
    fn target_kind(&self) -> ScrollTargetKind {
        ScrollTargetKind::Element
    }

    fn measure(&mut self) -> Result<Option<ScrollMetrics>, ScrollError> {
        self.ensure_wrapper()?;
        let wrapper_height = match self.wrapper.as_ref() {
            Some(wrapper) => self.host.wrapper_height(wrapper),
            None => return Ok(None),
        };
        let content_height = match wrapper_height {
            Ok(height) => height,
            Err(ScrollError::DetachedTarget) => {
                // the element was remounted, the next measurement looks for a wrapper again
                log::debug!("Drop detached measurement wrapper.");
                self.wrapper = None;
                return Err(ScrollError::DetachedTarget);
            }
            Err(e) => return Err(e),
        };
        Ok(Some(ScrollMetrics::new(
            content_height,
            self.host.viewport_height()?,
            self.host.scroll_top()?,
        )))
    }
}
