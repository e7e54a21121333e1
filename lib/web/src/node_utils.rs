use leptos::prelude::*;
use leptos::html::ElementType;
use leptos::wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use endless_scroll_core::constants::INNER_WRAP_CLASS;
use endless_scroll_core::{ContentHost, ScrollError, ScrollMetrics, ScrollProbe, ScrollTargetKind};

pub fn dom_error(error: JsValue) -> ScrollError {
    ScrollError::Dom(format!("{error:?}"))
}

fn get_document() -> Result<Document, ScrollError> {
    web_sys::window().and_then(|window| window.document()).ok_or(ScrollError::DetachedTarget)
}

/// Height of the whole document, the largest extent reported by `<body>` and `<html>`.
pub fn document_height(document: &Document) -> f64 {
    let body_heights = document.body().map(|body| {
        [body.scroll_height(), body.offset_height(), body.client_height()]
    });
    let html_heights = document.document_element().map(|html| {
        let offset_height = html.dyn_ref::<HtmlElement>().map(|html| html.offset_height()).unwrap_or_default();
        [html.scroll_height(), offset_height, html.client_height()]
    });
    max_height(body_heights.into_iter().chain(html_heights).flatten())
}

pub fn max_height(heights: impl IntoIterator<Item = i32>) -> f64 {
    f64::from(heights.into_iter().max().unwrap_or_default().max(0))
}

/// Parses a computed CSS length such as `12.5px`, anything else counts as 0.
pub fn parse_pixels(value: &str) -> f64 {
    value.trim()
        .strip_suffix("px")
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or_default()
}

pub fn content_box_height(client_height: i32, vertical_padding: f64) -> f64 {
    (f64::from(client_height) - vertical_padding).max(0.0)
}

/// Measures the scroll state of the browser window.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowProbe;

impl ScrollProbe for WindowProbe {
    fn target_kind(&self) -> ScrollTargetKind {
        ScrollTargetKind::Window
    }

    fn measure(&mut self) -> Result<Option<ScrollMetrics>, ScrollError> {
        let window = web_sys::window().ok_or(ScrollError::DetachedTarget)?;
        let document = window.document().ok_or(ScrollError::DetachedTarget)?;
        let viewport_height = window.inner_height().map_err(dom_error)?.as_f64().unwrap_or_default();
        let scroll_top = window.scroll_y().map_err(dom_error)?;
        Ok(Some(ScrollMetrics::new(document_height(&document), viewport_height, scroll_top)))
    }
}

/// Scroll element behind a [`NodeRef`], resolved on every measurement so that remounts are followed.
pub struct NodeRefHost<R: ElementType> {
    node_ref: NodeRef<R>,
}

impl<R> NodeRefHost<R>
where
    R: ElementType,
    R::Output: Clone + AsRef<Element> + JsCast + 'static,
{
    pub fn new(node_ref: NodeRef<R>) -> Self {
        Self { node_ref }
    }

    fn element(&self) -> Result<Element, ScrollError> {
        self.node_ref.get_untracked()
            .and_then(|node| node.dyn_ref::<Element>().cloned())
            .ok_or(ScrollError::DetachedTarget)
    }
}

impl<R> ContentHost for NodeRefHost<R>
where
    R: ElementType,
    R::Output: Clone + AsRef<Element> + JsCast + 'static,
{
    type Wrapper = HtmlElement;

    fn find_wrapper(&self) -> Result<Option<HtmlElement>, ScrollError> {
        let wrapper = self.element()?
            .query_selector(&format!(":scope > .{INNER_WRAP_CLASS}"))
            .map_err(dom_error)?;
        Ok(wrapper.and_then(|wrapper| wrapper.dyn_into::<HtmlElement>().ok()))
    }

    fn wrap_children(&self) -> Result<Option<HtmlElement>, ScrollError> {
        let element = self.element()?;
        let wrapper = get_document()?
            .create_element("div")
            .map_err(dom_error)?;
        wrapper.set_class_name(INNER_WRAP_CLASS);
        while let Some(child) = element.first_child() {
            wrapper.append_child(&child).map_err(dom_error)?;
        }
        element.append_child(&wrapper).map_err(dom_error)?;
        Ok(wrapper.dyn_into::<HtmlElement>().ok())
    }

    fn wrapper_height(&self, wrapper: &HtmlElement) -> Result<f64, ScrollError> {
        if !wrapper.is_connected() {
            return Err(ScrollError::DetachedTarget);
        }
        Ok(f64::from(wrapper.offset_height()))
    }

    /// Content box height of the element, its client height without the vertical padding.
    fn viewport_height(&self) -> Result<f64, ScrollError> {
        let element = self.element()?;
        let style = web_sys::window()
            .ok_or(ScrollError::DetachedTarget)?
            .get_computed_style(&element)
            .map_err(dom_error)?;
        let padding = match style {
            Some(style) => {
                let padding_top = style.get_property_value("padding-top").map_err(dom_error)?;
                let padding_bottom = style.get_property_value("padding-bottom").map_err(dom_error)?;
                parse_pixels(&padding_top) + parse_pixels(&padding_bottom)
            },
            None => 0.0,
        };
        Ok(content_box_height(element.client_height(), padding))
    }

    fn scroll_top(&self) -> Result<f64, ScrollError> {
        Ok(f64::from(self.element()?.scroll_top()))
    }
}
