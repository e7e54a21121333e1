use std::cell::{Cell, RefCell};
use std::rc::Rc;

use endless_scroll_core::{ContentHost, ReArm, ScrollError, ScrollMetrics, ScrollProbe, ScrollTargetKind};

/// Window-like probe whose metrics are driven by the test.
#[derive(Clone)]
pub struct TestWindow {
    pub document_height: Rc<Cell<f64>>,
    pub viewport_height: f64,
    pub scroll_top: Rc<Cell<f64>>,
    pub measure_count: Rc<Cell<usize>>,
}

impl TestWindow {
    pub fn new(document_height: f64, viewport_height: f64) -> Self {
        Self {
            document_height: Rc::new(Cell::new(document_height)),
            viewport_height,
            scroll_top: Rc::new(Cell::new(0.0)),
            measure_count: Rc::new(Cell::new(0)),
        }
    }

    pub fn scroll_to(&self, scroll_top: f64) {
        self.scroll_top.set(scroll_top);
    }
}

impl ScrollProbe for TestWindow {
    fn target_kind(&self) -> ScrollTargetKind {
        ScrollTargetKind::Window
    }

    fn measure(&mut self) -> Result<Option<ScrollMetrics>, ScrollError> {
        self.measure_count.set(self.measure_count.get() + 1);
        Ok(Some(ScrollMetrics::new(self.document_height.get(), self.viewport_height, self.scroll_top.get())))
    }
}

/// Records the fire sequences a callback received and keeps the last re-arm handle.
#[derive(Clone, Default)]
pub struct FireLog {
    pub sequences: Rc<RefCell<Vec<u64>>>,
    pub rearm: Rc<RefCell<Option<ReArm>>>,
}

impl FireLog {
    /// Callback recording the fire and holding on to the re-arm handle.
    pub fn deferred(&self) -> impl Fn(ReArm, u64) + 'static {
        let fire_log = self.clone();
        move |rearm, fire_sequence| {
            fire_log.sequences.borrow_mut().push(fire_sequence);
            *fire_log.rearm.borrow_mut() = Some(rearm);
        }
    }

    /// Callback recording the fire and re-arming immediately.
    pub fn immediate(&self) -> impl Fn(ReArm, u64) + 'static {
        let fire_log = self.clone();
        move |rearm, fire_sequence| {
            fire_log.sequences.borrow_mut().push(fire_sequence);
            rearm.rearm();
        }
    }

    pub fn rearm(&self) {
        if let Some(rearm) = self.rearm.borrow_mut().take() {
            rearm.rearm();
        }
    }

    pub fn sequences(&self) -> Vec<u64> {
        self.sequences.borrow().clone()
    }
}

/// Scroll element measured through an inner wrapper, counting the wrappers it inserted.
#[derive(Clone)]
pub struct TestElement {
    pub content_height: Rc<Cell<f64>>,
    pub viewport_height: f64,
    pub scroll_top: Rc<Cell<f64>>,
    pub wrap_count: Rc<Cell<usize>>,
}

impl TestElement {
    pub fn new(content_height: f64, viewport_height: f64) -> Self {
        Self {
            content_height: Rc::new(Cell::new(content_height)),
            viewport_height,
            scroll_top: Rc::new(Cell::new(0.0)),
            wrap_count: Rc::new(Cell::new(0)),
        }
    }
}

impl ContentHost for TestElement {
    type Wrapper = ();

    fn find_wrapper(&self) -> Result<Option<()>, ScrollError> {
        Ok((self.wrap_count.get() > 0).then_some(()))
    }

    fn wrap_children(&self) -> Result<Option<()>, ScrollError> {
        self.wrap_count.set(self.wrap_count.get() + 1);
        Ok(Some(()))
    }

    fn wrapper_height(&self, _wrapper: &()) -> Result<f64, ScrollError> {
        Ok(self.content_height.get())
    }

    fn viewport_height(&self) -> Result<f64, ScrollError> {
        Ok(self.viewport_height)
    }

    fn scroll_top(&self) -> Result<f64, ScrollError> {
        Ok(self.scroll_top.get())
    }
}
