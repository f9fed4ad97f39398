//! Frame scheduling.
//!
//! Animation state never talks to `requestAnimationFrame` directly. It is
//! ticked through a [`FrameLoop`], so the same code runs against the browser
//! ([`RafLoop`]) and against synthetic timestamps in tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// A self-rescheduling per-frame callback.
///
/// `start` on a running loop and `stop` on a stopped loop are no-ops, so a
/// loop is never registered twice.
pub trait FrameLoop {
    /// Creates a loop that is not yet running. `callback` receives the frame
    /// timestamp in milliseconds.
    fn new(callback: impl FnMut(f64) + 'static) -> Self
    where
        Self: Sized;

    fn start(&self);

    fn stop(&self);

    fn is_running(&self) -> bool;
}

type RafClosure = Closure<dyn FnMut(f64)>;

/// [`FrameLoop`] backed by `window.requestAnimationFrame`.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

struct RafInner {
    closure: RefCell<Option<RafClosure>>,
    callback: RefCell<Box<dyn FnMut(f64)>>,
    running: Cell<bool>,
    raf_id: Cell<Option<i32>>,
}

fn request_frame(closure: &RafClosure) -> Option<i32> {
    web_sys::window()?
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

impl FrameLoop for RafLoop {
    fn new(callback: impl FnMut(f64) + 'static) -> Self {
        Self {
            inner: Rc::new(RafInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                running: Cell::new(false),
                raf_id: Cell::new(None),
            }),
        }
    }

    fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);

        if self.inner.closure.borrow().is_none() {
            // Weak so the closure stored inside `inner` doesn't keep `inner` alive.
            let weak = Rc::downgrade(&self.inner);
            let closure = Closure::wrap(Box::new(move |timestamp: f64| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if !inner.running.get() {
                    return;
                }
                inner.callback.borrow_mut()(timestamp);
                if inner.running.get() {
                    if let Some(ref closure) = *inner.closure.borrow() {
                        inner.raf_id.set(request_frame(closure));
                    }
                }
            }) as Box<dyn FnMut(f64)>);
            *self.inner.closure.borrow_mut() = Some(closure);
        }

        if let Some(ref closure) = *self.inner.closure.borrow() {
            self.inner.raf_id.set(request_frame(closure));
        }
    }

    fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        if let (Some(id), Some(window)) = (self.inner.raf_id.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }

    fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        self.inner.closure.borrow_mut().take();
    }
}
