#![cfg(target_arch = "wasm32")]
use crate::core::App;
use crate::dom::WebDocument;
use crate::fetch::HttpSource;
use crate::render::GpuRenderer;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod core;
mod dom;
mod events;
mod fetch;
mod frame;
mod render;

pub(crate) type WebApp = App<WebDocument, HttpSource, GpuRenderer>;
pub(crate) type AppHandle = Rc<RefCell<WebApp>>;

const CANVAS_ID: &str = "app-canvas";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("vitrine-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// The scene canvas sits behind the DOM; reuse one from the markup if present.
fn scene_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let element = match document.get_element_by_id(CANVAS_ID) {
        Some(el) => el,
        None => {
            let el = document
                .create_element("canvas")
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            el.set_id(CANVAS_ID);
            let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
            body.append_child(&el)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            el
        }
    };
    element
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = scene_canvas(&document)?;
    dom::sync_canvas_backing_size(&canvas);

    // Without WebGPU the site still navigates; the scene just stays empty.
    let gpu = match render::GpuState::new(&canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            None
        }
    };
    let renderer = GpuRenderer::new(canvas, gpu);

    let web_document = WebDocument::new(window.clone())?;
    let slot: events::AppSlot = Rc::new(RefCell::new(Weak::new()));
    web_document.set_navigate_handler(events::navigate_handler(slot.clone()));

    let seed = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    let app: AppHandle = Rc::new(RefCell::new(App::new(
        web_document,
        HttpSource,
        renderer,
        seed,
    )?));
    *slot.borrow_mut() = Rc::downgrade(&app);

    events::wire_input_handlers(events::InputWiring {
        window: window.clone(),
        app: app.clone(),
    });
    events::wire_popstate(&window, &app);

    // No preloader: show the first page straight away.
    _ = app.borrow_mut().boot();

    frame::start_loop(Rc::new(RefCell::new(frame::FrameContext::new(app))));
    Ok(())
}
