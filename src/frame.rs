use crate::AppHandle;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// A hidden tab resumes with one long frame; tweens and scroll treat it as this.
const MAX_FRAME_SECS: f64 = 0.1;

pub struct FrameContext {
    pub app: AppHandle,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f64().min(MAX_FRAME_SECS);
        self.last_instant = now;

        if let Ok(mut app) = self.app.try_borrow_mut() {
            app.update(dt);
        }
    }
}

fn request_frame(callback: &Closure<dyn FnMut()>) {
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let Some(callback) = tick_clone.borrow().as_ref() {
            request_frame(callback);
        }
    }) as Box<dyn FnMut()>));
    if let Some(callback) = tick.borrow().as_ref() {
        request_frame(callback);
    }
}
