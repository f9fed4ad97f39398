pub mod frame;
pub mod marquee;
pub mod parallax;
pub mod typewriter;
