use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Index-based defaults for parallax layers that don't declare their own
/// `data-*` parameters. Each step down the stack recedes further.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallaxConfig {
    pub depth_step: f64,
    pub scale_step: f64,
    pub min_scale: f64,
    pub base_rotate: f64,
    pub rotate_step: f64,
    pub min_rotate: f64,
    pub opacity_step: f64,
    pub min_opacity: f64,
    pub base_ease: f64,
    pub ease_step: f64,
    pub max_ease: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            depth_step: -60.0,
            scale_step: 0.08,
            min_scale: 0.4,
            base_rotate: 14.0,
            rotate_step: 2.0,
            min_rotate: 2.0,
            opacity_step: 0.15,
            min_opacity: 0.2,
            base_ease: 0.06,
            ease_step: 0.02,
            max_ease: 0.3,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarqueeConfig {
    pub speed_px_per_sec: f64,
    /// Viewports matching this query get the static stacked layout.
    pub mobile_query: &'static str,
    pub respect_reduced_motion: bool,
    /// Some page variants render a star row under the review text.
    pub show_rating: bool,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            speed_px_per_sec: 140.0,
            mobile_query: "(max-width: 600px)",
            respect_reduced_motion: true,
            show_rating: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypewriterConfig {
    pub hold_ms: u32,
    pub initial_delay_ms: u32,
    pub fallback_word: &'static str,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            hold_ms: 1800,
            initial_delay_ms: 450,
            fallback_word: "HEALTHCARE",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    pub stagger_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { stagger_ms: 120 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThemeConfig {
    pub cta_threshold: f64,
    pub footer_threshold: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            cta_threshold: 0.35,
            footer_threshold: 0.35,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavConfig {
    /// The menu closes itself once the viewport grows past this width.
    pub close_above_width: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            close_above_width: 500.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollRevealConfig {
    /// Visible fraction at which a node is revealed.
    pub threshold: f64,
}

impl Default for ScrollRevealConfig {
    fn default() -> Self {
        Self { threshold: 0.2 }
    }
}
