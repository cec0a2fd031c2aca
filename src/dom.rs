use crate::core::{
    is_internal_link, ContentFragment, Document, NavigationRequest, Rect, ScreenSize, Style, Theme,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub type NavigateHandler = Rc<dyn Fn(NavigationRequest)>;

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

fn elements(list: web::NodeList) -> Vec<web::Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

/// The live browser document behind the `Document` trait.
pub struct WebDocument {
    window: web::Window,
    document: web::Document,
    content: web::Element,
    on_navigate: RefCell<Option<NavigateHandler>>,
    // onclick closures of the anchors bound last; replaced on every rebind
    link_handlers: RefCell<Vec<Closure<dyn FnMut(web::MouseEvent)>>>,
}

impl WebDocument {
    pub fn new(window: web::Window) -> anyhow::Result<Self> {
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        let content = document
            .query_selector(".content")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("missing .content"))?;
        Ok(Self {
            window,
            document,
            content,
            on_navigate: RefCell::new(None),
            link_handlers: RefCell::new(Vec::new()),
        })
    }

    /// Where intercepted clicks go. Takes effect on the next `bind_links`.
    pub fn set_navigate_handler(&self, handler: NavigateHandler) {
        *self.on_navigate.borrow_mut() = Some(handler);
    }
}

impl Document for WebDocument {
    type Element = web::Element;

    fn query_all(&self, selector: &str) -> Vec<web::Element> {
        self.document
            .query_selector_all(selector)
            .map(elements)
            .unwrap_or_default()
    }

    fn query_in(&self, root: &web::Element, selector: &str) -> Vec<web::Element> {
        root.query_selector_all(selector)
            .map(elements)
            .unwrap_or_default()
    }

    fn attribute(&self, element: &web::Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn bounds(&self, element: &web::Element) -> Rect {
        let r = element.get_bounding_client_rect();
        Rect {
            left: r.left(),
            top: r.top(),
            width: r.width(),
            height: r.height(),
        }
    }

    fn client_height(&self, element: &web::Element) -> f64 {
        element.client_height() as f64
    }

    fn screen(&self) -> ScreenSize {
        let px = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
        ScreenSize::new(px(self.window.inner_width()), px(self.window.inner_height()))
    }

    fn apply_style(&self, element: &web::Element, style: Style) {
        let Some(html) = element.dyn_ref::<web::HtmlElement>() else {
            return;
        };
        let css = html.style();
        let written = match style {
            Style::Opacity(v) => css.set_property("opacity", &v.to_string()).and_then(|_| {
                css.set_property("visibility", if v <= 0.0 { "hidden" } else { "inherit" })
            }),
            Style::TranslateYPercent(v) => {
                css.set_property("transform", &format!("translateY({v}%)"))
            }
            Style::TranslateYPx(v) => {
                css.set_property("transform", &format!("translateY({v}px)"))
            }
            Style::Scale(v) => css.set_property("transform", &format!("scale({v})")),
            Style::Color(rgb) => css.set_property("color", &rgb.to_string()),
        };
        if let Err(e) = written {
            log::warn!("[dom] style write failed: {:?}", e);
        }
    }

    fn apply_theme(&self, theme: &Theme) {
        let Some(body) = self.document.body() else {
            return;
        };
        let css = body.style();
        if let Some(background) = &theme.background {
            _ = css.set_property("background-color", background);
        }
        if let Some(color) = &theme.color {
            _ = css.set_property("color", color);
        }
    }

    fn content_template(&self) -> Option<String> {
        self.content.get_attribute("data-template")
    }

    fn parse_content(&self, markup: &str) -> Option<ContentFragment> {
        let div = self.document.create_element("div").ok()?;
        div.set_inner_html(markup);
        let content = div.query_selector(".content").ok()??;
        Some(ContentFragment {
            template: content.get_attribute("data-template").unwrap_or_default(),
            inner_html: content.inner_html(),
        })
    }

    fn swap_content(&self, fragment: &ContentFragment) {
        _ = self
            .content
            .set_attribute("data-template", &fragment.template);
        self.content.set_inner_html(&fragment.inner_html);
    }

    fn push_history(&self, url: &str) {
        let pushed = self
            .window
            .history()
            .and_then(|h| h.push_state_with_url(&JsValue::NULL, "", Some(url)));
        if let Err(e) = pushed {
            log::warn!("[dom] pushState {} failed: {:?}", url, e);
        }
    }

    fn bind_links(&self) {
        let Some(handler) = self.on_navigate.borrow().clone() else {
            return;
        };
        let origin = self.window.location().origin().unwrap_or_default();

        let mut bound = Vec::new();
        for anchor in self.query_all("a") {
            let Ok(anchor) = anchor.dyn_into::<web::HtmlAnchorElement>() else {
                continue;
            };
            let href = anchor.href();
            let target = anchor.target();
            if !is_internal_link(&href, &origin, Some(&target)) {
                continue;
            }
            let handler = handler.clone();
            let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
                // let modified clicks open tabs natively
                if ev.meta_key() || ev.ctrl_key() || ev.shift_key() || ev.button() != 0 {
                    return;
                }
                ev.prevent_default();
                handler(NavigationRequest::link(href.clone()));
            }) as Box<dyn FnMut(web::MouseEvent)>);
            anchor.set_onclick(Some(closure.as_ref().unchecked_ref()));
            bound.push(closure);
        }

        log::info!("[dom] {} links bound", bound.len());
        // every live anchor now points at a new closure
        *self.link_handlers.borrow_mut() = bound;
    }
}
