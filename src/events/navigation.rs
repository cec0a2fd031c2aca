use crate::core::{navigate, NavigationOutcome, NavigationRequest};
use crate::dom::NavigateHandler;
use crate::{AppHandle, WebApp};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Filled in once the app exists; link handlers are created before that.
pub type AppSlot = Rc<RefCell<Weak<RefCell<WebApp>>>>;

/// Every navigation runs as its own task; a newer one supersedes older ones.
pub fn spawn_navigation(app: AppHandle, request: NavigationRequest) {
    spawn_local(async move {
        match navigate(&app, request).await {
            NavigationOutcome::Completed(_) => {}
            NavigationOutcome::Superseded => log::debug!("[nav] dropped stale navigation"),
            NavigationOutcome::Failed(e) => log::error!("[nav] staying on hidden page: {}", e),
        }
    });
}

pub fn navigate_handler(slot: AppSlot) -> NavigateHandler {
    Rc::new(move |request: NavigationRequest| {
        let Some(app) = slot.borrow().upgrade() else {
            log::warn!("[nav] click before app was ready: {}", request.url);
            return;
        };
        spawn_navigation(app, request);
    })
}

/// Back/forward re-runs navigation for the new location without pushing.
pub fn wire_popstate(window: &web::Window, app: &AppHandle) {
    let app = app.clone();
    let location = window.location();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        spawn_navigation(app.clone(), NavigationRequest::history(path));
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
    closure.forget();
}
