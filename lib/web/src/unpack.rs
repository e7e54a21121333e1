use leptos::html::ElementType;
use leptos::prelude::*;
use leptos::wasm_bindgen::JsCast;
use web_sys::Element;

/// Appends a page of items loaded by a fire callback, or stores the load error to display it.
pub fn append_page<T, E>(
    mut load_result: Result<Vec<T>, E>,
    loaded_vec: RwSignal<Vec<T>>,
    load_error: RwSignal<Option<E>>,
)
where
    T: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    match load_result {
        Ok(ref mut page) => {
            if !page.is_empty() {
                loaded_vec.update(|loaded_vec| loaded_vec.append(page));
            }
        },
        Err(e) => load_error.set(Some(e)),
    }
}

/// Clears the loaded items and scrolls the element of `node_ref` back to its top.
pub fn reset_loaded<T, R>(
    loaded_vec: RwSignal<Vec<T>>,
    node_ref: Option<NodeRef<R>>,
)
where
    T: Send + Sync + 'static,
    R: ElementType,
    R::Output: Clone + AsRef<Element> + JsCast + 'static,
{
    loaded_vec.write().clear();
    if let Some(Some(node_ref)) = node_ref.map(|node_ref| node_ref.get_untracked()) {
        if let Some(element) = node_ref.dyn_ref::<Element>() {
            element.set_scroll_top(0);
        }
    }
}
