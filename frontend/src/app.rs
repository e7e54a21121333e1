use std::time::Duration;

use leptos::html;
use leptos::prelude::*;

use endless_scroll_core::{ScrollConfig, ScrollSettings};
use endless_scroll_web::unpack::{append_page, reset_loaded};
use endless_scroll_web::{use_element_endless_scroll, use_window_endless_scroll};

const PAGE_SIZE: usize = 20;
const PAGE_COUNT: u64 = 10;
const LOAD_DELAY: Duration = Duration::from_millis(300);
const WINDOW_FEED_SETTINGS: &str = r#"{ "bottom_pixels": 200, "interval_frequency_ms": 250 }"#;

/// Simulates a paginated source of items.
pub fn load_page(page: u64) -> Result<Vec<String>, String> {
    match page {
        page if page < PAGE_COUNT => Ok(
            (0..PAGE_SIZE).map(|index| format!("Item {}", page as usize * PAGE_SIZE + index)).collect()
        ),
        _ => Err(format!("There is no page {page}.")),
    }
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="flex flex-col gap-4 p-4">
            <h1 class="text-2xl">"Endless scroll"</h1>
            <ElementFeed/>
            <WindowFeed/>
        </main>
    }
}

/// Feed loading additional items when the window is scrolled near the end of the document.
#[component]
pub fn WindowFeed() -> impl IntoView {
    let item_vec = RwSignal::new(load_page(0).unwrap_or_default());
    let load_error = RwSignal::new(None);
    let is_loading = RwSignal::new(false);

    let settings = ScrollSettings::from_json(WINDOW_FEED_SETTINGS).unwrap_or_else(|e| {
        log::warn!("Use default settings for window feed: {e}");
        ScrollSettings::default()
    });
    let config = ScrollConfig::new(settings)
        .with_cease_fire(|fire_sequence| fire_sequence + 1 >= PAGE_COUNT)
        .with_callback(move |rearm, fire_sequence| {
            is_loading.set(true);
            set_timeout(
                move || {
                    append_page(load_page(fire_sequence + 1), item_vec, load_error);
                    is_loading.set(false);
                    rearm.rearm();
                },
                LOAD_DELAY,
            );
        });
    let endless_scroll = use_window_endless_scroll(config);
    let is_ceased = endless_scroll.is_ceased;

    view! {
        <ul class="flex flex-col w-full divide-y">
            <For
                each=move || item_vec.get().into_iter().enumerate()
                key=|(index, _)| *index
                children=move |(_, item)| view! { <li class="p-2">{item}</li> }
            />
        </ul>
        <LoadIndicators is_loading load_error is_ceased/>
    }
}

/// Feed inside a scrollable box, loading a single additional page and resettable on demand.
#[component]
pub fn ElementFeed() -> impl IntoView {
    let item_vec = RwSignal::new(load_page(0).unwrap_or_default());
    let load_error = RwSignal::new(None);
    let is_loading = RwSignal::new(false);
    let reset_requested = RwSignal::new(false);
    let list_ref = NodeRef::<html::Div>::new();

    let config = ScrollConfig::default()
        .with_bottom_pixels(20.0)
        .with_reset_counter(move || match reset_requested.get_untracked() {
            true => {
                reset_requested.set(false);
                true
            },
            false => false,
        })
        .with_callback(move |rearm, fire_sequence| {
            append_page(load_page(fire_sequence + 1), item_vec, load_error);
            rearm.rearm();
        });
    let endless_scroll = use_element_endless_scroll(list_ref, config);
    let fire_sequence = endless_scroll.fire_sequence;
    let is_ceased = endless_scroll.is_ceased;
    let dispose = endless_scroll.dispose;

    view! {
        <div class="h-64 overflow-y-auto border" node_ref=list_ref>
            <For
                each=move || item_vec.get().into_iter().enumerate()
                key=|(index, _)| *index
                children=move |(_, item)| view! { <div class="p-2">{item}</div> }
            />
        </div>
        <div class="flex gap-2 items-center">
            <span>{move || format!("Next page: {}", fire_sequence.get() + 1)}</span>
            <button
                on:click=move |_| {
                    reset_loaded(item_vec, Some(list_ref));
                    append_page(load_page(0), item_vec, load_error);
                    reset_requested.set(true);
                }
            >
                "Reset"
            </button>
            <button on:click=move |_| dispose()>"Stop"</button>
        </div>
        <LoadIndicators is_loading load_error is_ceased/>
    }
}

#[component]
pub fn LoadIndicators(
    #[prop(into)]
    is_loading: Signal<bool>,
    #[prop(into)]
    load_error: Signal<Option<String>>,
    #[prop(into)]
    is_ceased: Signal<bool>,
) -> impl IntoView {
    view! {
        <Show when=move || is_loading.get()>
            <div class="p-2">"Loading..."</div>
        </Show>
        {move || load_error.get().map(|error| view! { <div class="p-2 text-error">{error}</div> })}
        <Show when=move || is_ceased.get()>
            <div class="p-2">"No more items."</div>
        </Show>
    }
}
