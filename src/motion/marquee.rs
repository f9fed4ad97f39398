//! Constant-velocity wrapping scroll for the testimonial strip.

use std::cell::RefCell;
use std::rc::Rc;

use super::frame::FrameLoop;

/// Scroll state for one built strip. A rebuild replaces it wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct MarqueeState {
    /// Width of one copy of the cards, measured before duplication.
    pub base_width: f64,
    /// Always in `[0, base_width)`.
    pub position: f64,
    pub speed: f64,
    pub animating: bool,
    pub last_time: Option<f64>,
    pub card_count: usize,
}

impl MarqueeState {
    pub fn new(card_count: usize, base_width: f64, speed: f64) -> Self {
        Self {
            base_width,
            position: 0.0,
            speed,
            animating: false,
            last_time: None,
            card_count,
        }
    }

    /// A single card or an unmeasured strip has nothing to loop.
    pub fn can_scroll(&self) -> bool {
        self.card_count > 1 && self.base_width > 0.0
    }

    /// Returns `true` only when this call switched scrolling on.
    pub fn start(&mut self) -> bool {
        if self.animating || !self.can_scroll() {
            return false;
        }
        self.animating = true;
        self.last_time = None;
        true
    }

    /// Returns `true` only when this call switched scrolling off.
    pub fn stop(&mut self) -> bool {
        if !self.animating {
            return false;
        }
        self.animating = false;
        self.last_time = None;
        true
    }

    /// Advances to `timestamp` (ms) and returns the new offset. The first
    /// frame after a start only records the time.
    pub fn step(&mut self, timestamp: f64) -> Option<f64> {
        if !self.animating {
            return None;
        }
        let last = self.last_time.replace(timestamp).unwrap_or(timestamp);
        let elapsed = ((timestamp - last) / 1000.0).max(0.0);
        self.position = if self.base_width > 0.0 {
            (self.position + self.speed * elapsed).rem_euclid(self.base_width)
        } else {
            0.0
        };
        Some(self.position)
    }
}

pub fn translate_x(position: f64) -> String {
    format!("translateX(-{position}px)")
}

/// Whether leaving the container should resume scrolling. Moving pointer or
/// focus onto another element inside the container keeps it paused.
pub fn resumes_on_exit(next_target_inside: bool) -> bool {
    !next_target_inside
}

/// One running strip: scroll state plus the frame loop that drives it.
///
/// `render` receives each new offset. Dropping the marquee disposes it.
pub struct Marquee<L: FrameLoop> {
    state: Rc<RefCell<MarqueeState>>,
    frames: L,
}

impl<L: FrameLoop> Marquee<L> {
    pub fn new(state: MarqueeState, render: impl Fn(f64) + 'static) -> Self {
        let state = Rc::new(RefCell::new(state));
        let frames = {
            let state = Rc::clone(&state);
            L::new(move |timestamp| {
                let position = state.borrow_mut().step(timestamp);
                if let Some(position) = position {
                    render(position);
                }
            })
        };
        Self { state, frames }
    }

    pub fn start(&self) {
        if self.state.borrow_mut().start() {
            self.frames.start();
        }
    }

    pub fn stop(&self) {
        self.state.borrow_mut().stop();
        self.frames.stop();
    }

    /// Stops scrolling for good. Further `start` calls are ignored.
    pub fn dispose(&self) {
        self.stop();
        let mut state = self.state.borrow_mut();
        state.card_count = 0;
        state.base_width = 0.0;
    }

    pub fn pointer_enter(&self) {
        self.stop();
    }

    pub fn pointer_leave(&self, next_target_inside: bool) {
        if resumes_on_exit(next_target_inside) {
            self.start();
        }
    }

}

impl<L: FrameLoop> Drop for Marquee<L> {
    fn drop(&mut self) {
        self.dispose();
    }
}
