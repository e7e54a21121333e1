use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::html::ElementType;
use leptos::prelude::*;
use leptos::wasm_bindgen::JsCast;
use leptos_use::core::IntoElementMaybeSignal;
use leptos_use::utils::Pausable;
use leptos_use::{use_event_listener, use_interval_fn, use_window};
use send_wrapper::SendWrapper;
use web_sys::{Element, EventTarget};

use endless_scroll_core::{attach, ElementProbe, MonitorHandle, ScrollConfig, ScrollMonitor, ScrollProbe, TickOutcome};

use crate::node_utils::{NodeRefHost, WindowProbe};

pub struct UseEndlessScrollReturn<PauseFn, ResumeFn, DisposeFn>
where
    PauseFn: Fn() + Clone + Send + Sync,
    ResumeFn: Fn() + Clone + Send + Sync,
    DisposeFn: Fn() + Clone + Send + Sync,
{
    /// fire sequence the next callback will receive, unless the counter is reset
    pub fire_sequence: Signal<u64>,
    /// true once the monitor stopped for good
    pub is_ceased: Signal<bool>,
    /// whether the poll interval is running
    pub is_active: Signal<bool>,
    /// pauses the poll, scroll notifications are still recorded
    pub pause: PauseFn,
    pub resume: ResumeFn,
    /// removes the scroll listener, stops the poll and ceases the monitor
    pub dispose: DisposeFn,
}

/// Fires `config`'s callback when the window is scrolled near the end of the document.
pub fn use_window_endless_scroll(
    config: ScrollConfig,
) -> UseEndlessScrollReturn<impl Fn() + Clone + Send + Sync, impl Fn() + Clone + Send + Sync, impl Fn() + Clone + Send + Sync> {
    use_endless_scroll_with_probe(WindowProbe, use_window(), config)
}

/// Fires `config`'s callback when the element of `node_ref` is scrolled near the end of its content.
///
/// On the first measurement, the children of the element are moved into an inner wrapper used to read the height
/// of the content.
pub fn use_element_endless_scroll<R, M>(
    node_ref: NodeRef<R>,
    config: ScrollConfig,
) -> UseEndlessScrollReturn<impl Fn() + Clone + Send + Sync, impl Fn() + Clone + Send + Sync, impl Fn() + Clone + Send + Sync>
where
    R: ElementType,
    R::Output: Clone + AsRef<Element> + JsCast + 'static,
    NodeRef<R>: IntoElementMaybeSignal<EventTarget, M>,
{
    use_endless_scroll_with_probe(ElementProbe::new(NodeRefHost::new(node_ref)), node_ref, config)
}

/// Drives a monitor measured by `probe`: scroll events on `target` mark it as dirty, a poll ticks it.
pub fn use_endless_scroll_with_probe<P, T, M>(
    probe: P,
    target: T,
    config: ScrollConfig,
) -> UseEndlessScrollReturn<impl Fn() + Clone + Send + Sync, impl Fn() + Clone + Send + Sync, impl Fn() + Clone + Send + Sync>
where
    P: ScrollProbe + 'static,
    T: IntoElementMaybeSignal<EventTarget, M>,
{
    let interval_ms = u64::from(config.settings.interval_frequency_ms);
    let monitor = SendWrapper::new(Rc::new(RefCell::new(attach_or_log(probe, config))));

    // hooks may run while the monitor is borrowed by a tick, the handle only touches the shared state
    let handle = SendWrapper::new(monitor.borrow().as_ref().map(|monitor| monitor.handle()));

    let fire_sequence = RwSignal::new(0u64);
    let is_ceased = RwSignal::new(handle.is_none());

    let scroll_handle = handle.clone();
    let stop_listener = use_event_listener(target, ev::scroll, move |_| {
        if let Some(handle) = &*scroll_handle {
            handle.notify_scroll();
        }
    });

    let tick_monitor = monitor.clone();
    let Pausable {
        pause,
        resume,
        is_active,
    } = use_interval_fn(
        move || {
            // the fire callback runs inside the tick, a re-entrant tick is skipped
            let Ok(mut monitor) = tick_monitor.try_borrow_mut() else {
                return;
            };
            if let Some(monitor) = monitor.as_mut() {
                let outcome = monitor.tick();
                sync_tick_outcome(monitor, outcome, fire_sequence, is_ceased);
            }
        },
        interval_ms,
    );

    let pause_on_cease = pause.clone();
    Effect::new(move || {
        if is_ceased.get() {
            pause_on_cease();
        }
    });

    let dispose_pause = pause.clone();
    let dispose = move || {
        stop_listener();
        dispose_pause();
        dispose_monitor((*handle).as_ref(), is_ceased);
    };

    UseEndlessScrollReturn {
        fire_sequence: fire_sequence.into(),
        is_ceased: is_ceased.into(),
        is_active,
        pause,
        resume,
        dispose,
    }
}

/// Attaches the monitor, an invalid configuration is logged and yields no monitor.
pub fn attach_or_log<P: ScrollProbe>(probe: P, config: ScrollConfig) -> Option<ScrollMonitor<P>> {
    match attach(probe, config) {
        Ok(monitor) => Some(monitor),
        Err(e) => {
            log::error!("Cannot attach endless scroll monitor: {e}");
            None
        }
    }
}

/// Publishes the state of `monitor` after a tick that fired or ceased.
pub fn sync_tick_outcome<P: ScrollProbe>(
    monitor: &ScrollMonitor<P>,
    outcome: TickOutcome,
    fire_sequence: RwSignal<u64>,
    is_ceased: RwSignal<bool>,
) {
    match outcome {
        TickOutcome::Idle | TickOutcome::NotNearEnd | TickOutcome::Unmeasurable => (),
        TickOutcome::Ceased | TickOutcome::Fired { .. } => {
            fire_sequence.set(monitor.fire_sequence());
            if monitor.is_ceased() {
                is_ceased.set(true);
            }
        }
    }
}

pub fn dispose_monitor(handle: Option<&MonitorHandle>, is_ceased: RwSignal<bool>) {
    if let Some(handle) = handle {
        handle.dispose();
    }
    is_ceased.set(true);
}
