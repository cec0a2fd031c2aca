use crate::core::normalize_wheel;
use crate::AppHandle;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub window: web::Window,
    pub app: AppHandle,
}

/// Pointer, wheel and resize listeners on the window.
///
/// Handlers skip the event when the app is already borrowed, which only
/// happens if an event fires re-entrantly from inside a frame.
pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_resize(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let app = w.app.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Ok(mut app) = app.try_borrow_mut() {
            app.on_touch_down(ev.client_x() as f64, ev.client_y() as f64);
        }
    }) as Box<dyn FnMut(_)>);
    _ = w
        .window
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let app = w.app.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Ok(mut app) = app.try_borrow_mut() {
            app.on_touch_move(ev.client_x() as f64, ev.client_y() as f64);
        }
    }) as Box<dyn FnMut(_)>);
    _ = w
        .window
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let app = w.app.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Ok(mut app) = app.try_borrow_mut() {
            app.on_touch_up(ev.client_x() as f64, ev.client_y() as f64);
        }
    }) as Box<dyn FnMut(_)>);
    for name in ["pointerup", "pointercancel"] {
        _ = w
            .window
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let app = w.app.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let delta = normalize_wheel(ev.delta_x(), ev.delta_y(), ev.delta_mode());
        if let Ok(mut app) = app.try_borrow_mut() {
            app.on_wheel(delta);
        }
    }) as Box<dyn FnMut(_)>);
    _ = w
        .window
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_resize(w: &InputWiring) {
    let app = w.app.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        if let Ok(mut app) = app.try_borrow_mut() {
            app.on_resize();
        }
    }) as Box<dyn FnMut()>);
    _ = w
        .window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
