use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use strum_macros::Display;

use crate::config::ScrollConfig;
use crate::errors::ScrollError;
use crate::probe::ScrollProbe;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum FireState {
    /// the next qualifying tick fires the callback
    Armed,
    /// a fire is in flight, waiting for the callback to re-arm
    AwaitingRearm,
    /// stopped for good, by the cease fire hook or by disposal
    Ceased,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// no scroll since the last tick, or the monitor is not armed
    Idle,
    /// the cease fire hook stopped the monitor on this tick
    Ceased,
    /// the probe failed, the tick is skipped
    Unmeasurable,
    NotNearEnd,
    Fired { fire_sequence: u64 },
}

#[derive(Debug)]
struct MonitorState {
    fire_state: FireState,
    fire_sequence: u64,
    did_scroll: bool,
}

/// Handle given to the fire callback, allows the next fire once called.
#[derive(Clone)]
pub struct ReArm {
    state: Weak<RefCell<MonitorState>>,
    fire_once: bool,
}

impl ReArm {
    pub fn rearm(&self) {
        if self.fire_once {
            log::trace!("Ignore re-arm of fire once monitor.");
            return;
        }
        if let Some(state) = self.state.upgrade() {
            let mut state = state.borrow_mut();
            if state.fire_state == FireState::AwaitingRearm {
                log::trace!("Re-arm monitor.");
                state.fire_state = FireState::Armed;
            }
        }
    }
}

impl fmt::Debug for ReArm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReArm").field("fire_once", &self.fire_once).finish_non_exhaustive()
    }
}

/// Shared view on a monitor's state, usable from within hooks or from the owner of the poll timer.
#[derive(Clone)]
pub struct MonitorHandle {
    state: Weak<RefCell<MonitorState>>,
}

impl MonitorHandle {
    /// Same as [`ScrollMonitor::notify_scroll`], no-op if the monitor was dropped.
    pub fn notify_scroll(&self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().did_scroll = true;
        }
    }

    /// Same as [`ScrollMonitor::dispose`], no-op if the monitor was dropped.
    pub fn dispose(&self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().fire_state = FireState::Ceased;
        }
    }

    pub fn fire_sequence(&self) -> Option<u64> {
        self.state.upgrade().map(|state| state.borrow().fire_sequence)
    }

    /// A dropped monitor counts as ceased.
    pub fn is_ceased(&self) -> bool {
        self.state.upgrade().is_none_or(|state| state.borrow().fire_state == FireState::Ceased)
    }
}

/// Watches one scroll target and fires the configured callback when it is scrolled near its end.
///
/// Scroll notifications only mark the monitor as dirty, the measurement and the hooks run on [`ScrollMonitor::tick`],
/// which the owner calls every [`ScrollMonitor::interval`].
pub struct ScrollMonitor<P: ScrollProbe> {
    probe: P,
    config: ScrollConfig,
    state: Rc<RefCell<MonitorState>>,
}

/// Binds a monitor to the target measured by `probe`.
pub fn attach<P: ScrollProbe>(probe: P, config: ScrollConfig) -> Result<ScrollMonitor<P>, ScrollError> {
    config.settings.validate()?;
    log::debug!(
        "Attach endless scroll monitor to {} target with bottom_pixels={}, fire_once={}, interval={}ms",
        probe.target_kind(),
        config.settings.bottom_pixels,
        config.settings.fire_once,
        config.settings.interval_frequency_ms,
    );
    Ok(ScrollMonitor {
        probe,
        config,
        state: Rc::new(RefCell::new(MonitorState {
            fire_state: FireState::Armed,
            fire_sequence: 0,
            did_scroll: false,
        })),
    })
}

impl<P: ScrollProbe> ScrollMonitor<P> {
    pub fn notify_scroll(&self) {
        self.state.borrow_mut().did_scroll = true;
    }

    pub fn tick(&mut self) -> TickOutcome {
        let fire_sequence = {
            let mut state = self.state.borrow_mut();
            if !state.did_scroll || state.fire_state != FireState::Armed {
                return TickOutcome::Idle;
            }
            state.did_scroll = false;
            state.fire_sequence
        };

        if (self.config.hooks.cease_fire)(fire_sequence) {
            log::debug!("Cease fire at sequence {fire_sequence}.");
            self.state.borrow_mut().fire_state = FireState::Ceased;
            return TickOutcome::Ceased;
        }

        let bottom_pixels = self.config.settings.bottom_pixels;
        match self.probe.measure() {
            Ok(Some(metrics)) if metrics.is_near_end(bottom_pixels) => (),
            Ok(_) => return TickOutcome::NotNearEnd,
            Err(e) => {
                log::debug!("Skip tick, cannot measure {} target: {e}", self.probe.target_kind());
                return TickOutcome::Unmeasurable;
            }
        }

        {
            // the cease fire hook may have disposed the monitor through a MonitorHandle
            let mut state = self.state.borrow_mut();
            if state.fire_state != FireState::Armed {
                return TickOutcome::Idle;
            }
            state.fire_state = FireState::AwaitingRearm;
        }

        let fire_sequence = match (self.config.hooks.reset_counter)() {
            true => {
                log::trace!("Reset fire sequence.");
                self.state.borrow_mut().fire_sequence = 0;
                0
            }
            false => fire_sequence,
        };

        let rearm = ReArm {
            state: Rc::downgrade(&self.state),
            fire_once: self.config.settings.fire_once,
        };
        log::debug!("Fire endless scroll callback with sequence {fire_sequence}.");
        (self.config.hooks.callback)(rearm, fire_sequence);
        self.state.borrow_mut().fire_sequence = fire_sequence + 1;

        TickOutcome::Fired { fire_sequence }
    }

    /// Stops the monitor, further ticks are no-ops and outstanding [`ReArm`] handles become inert.
    pub fn dispose(&self) {
        let mut state = self.state.borrow_mut();
        if state.fire_state != FireState::Ceased {
            log::debug!("Dispose endless scroll monitor.");
            state.fire_state = FireState::Ceased;
        }
    }

    pub fn handle(&self) -> MonitorHandle {
        MonitorHandle {
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn fire_sequence(&self) -> u64 {
        self.state.borrow().fire_sequence
    }

    pub fn fire_state(&self) -> FireState {
        self.state.borrow().fire_state
    }

    pub fn is_ceased(&self) -> bool {
        self.fire_state() == FireState::Ceased
    }

    pub fn is_dirty(&self) -> bool {
        self.state.borrow().did_scroll
    }

    pub fn interval(&self) -> Duration {
        self.config.settings.interval()
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }
}
