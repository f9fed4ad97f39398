//! Pointer-follow parallax for a stack of hero images.
//!
//! Each layer eases toward the pointer (or the container centre when the
//! pointer is away) at its own rate. Positions are container-local pixels.

use crate::config::ParallaxConfig;

/// Visual parameters of one layer. Fixed once the scene is built.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerParams {
    pub depth: f64,
    pub scale: f64,
    pub rotate_range: f64,
    pub base_opacity: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub ease: f64,
}

impl LayerParams {
    /// Parameters for the layer at `index` when it declares nothing.
    pub fn defaults(index: usize, config: &ParallaxConfig) -> Self {
        let i = index as f64;
        Self {
            depth: config.depth_step * i,
            scale: (1.0 - config.scale_step * i).max(config.min_scale),
            rotate_range: (config.base_rotate - config.rotate_step * i).max(config.min_rotate),
            base_opacity: (1.0 - config.opacity_step * i).max(config.min_opacity),
            offset_x: 0.0,
            offset_y: 0.0,
            ease: (config.base_ease + config.ease_step * i).min(config.max_ease),
        }
    }

    /// Reads declared overrides through `attr` (a `data-*` lookup), falling
    /// back to the index default for anything missing or unparsable.
    pub fn from_attrs(
        index: usize,
        config: &ParallaxConfig,
        attr: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let read = |name: &str, fallback: f64| {
            attr(name)
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(fallback)
        };
        let d = Self::defaults(index, config);
        Self {
            depth: read("depth", d.depth),
            scale: read("scale", d.scale).clamp(0.0, 1.0),
            rotate_range: read("rotate", d.rotate_range),
            base_opacity: read("opacity", d.base_opacity).clamp(0.0, 1.0),
            offset_x: read("offsetX", d.offset_x),
            offset_y: read("offsetY", d.offset_y),
            ease: read("ease", d.ease).clamp(0.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Written by pointer handlers, read by the frame callback.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerState {
    pub x: f64,
    pub y: f64,
}

/// Everything needed to style one layer for the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerPose {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub scale: f64,
    pub opacity: f64,
    pub z_index: usize,
}

impl LayerPose {
    pub fn transform(&self) -> String {
        format!(
            "translate3d({:.2}px, {:.2}px, {:.2}px) translate(-50%, -50%) rotateX({:.2}deg) rotateY({:.2}deg) scale({:.3})",
            self.x, self.y, self.depth, self.rotate_x, self.rotate_y, self.scale
        )
    }
}

struct Layer {
    params: LayerParams,
    state: LayerState,
}

pub struct ParallaxScene {
    layers: Vec<Layer>,
    bounds: Bounds,
    pointer: PointerState,
}

impl ParallaxScene {
    /// Builds a scene with every layer resting at the centre plus its offset.
    /// Returns `None` for an empty stack; there is nothing to animate.
    pub fn new(params: Vec<LayerParams>, bounds: Bounds) -> Option<Self> {
        if params.is_empty() {
            return None;
        }
        let (cx, cy) = bounds.center();
        let layers = params
            .into_iter()
            .map(|params| Layer {
                state: LayerState {
                    x: cx + params.offset_x,
                    y: cy + params.offset_y,
                },
                params,
            })
            .collect();
        Some(Self {
            layers,
            bounds,
            pointer: PointerState::default(),
        })
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// New container size. Interpolated positions are kept to avoid a jump.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = PointerState { x, y, active: true };
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.active = false;
    }

    pub fn layer_state(&self, index: usize) -> Option<LayerState> {
        self.layers.get(index).map(|l| l.state)
    }

    /// Point the stack is easing toward, before per-layer offsets.
    pub fn target(&self) -> (f64, f64) {
        if self.pointer.active {
            (self.pointer.x, self.pointer.y)
        } else {
            self.bounds.center()
        }
    }

    /// Advances every layer by one frame and returns their poses, in stack order.
    pub fn frame(&mut self) -> Vec<LayerPose> {
        let (tx, ty) = self.target();
        let (cx, cy) = self.bounds.center();
        let active = self.pointer.active;
        let count = self.layers.len();

        self.layers
            .iter_mut()
            .enumerate()
            .map(|(index, layer)| {
                let p = &layer.params;
                let s = &mut layer.state;
                s.x += (tx + p.offset_x - s.x) * p.ease;
                s.y += (ty + p.offset_y - s.y) * p.ease;

                let nx = normalized(s.x - cx, cx);
                let ny = normalized(s.y - cy, cy);

                LayerPose {
                    x: s.x,
                    y: s.y,
                    depth: p.depth,
                    rotate_x: ny * p.rotate_range,
                    rotate_y: -nx * p.rotate_range,
                    scale: p.scale,
                    opacity: if active { p.base_opacity } else { 0.0 },
                    z_index: count - index,
                }
            })
            .collect()
    }
}

fn normalized(offset: f64, half_extent: f64) -> f64 {
    if half_extent > 0.0 {
        (offset / half_extent).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(count: usize) -> ParallaxScene {
        let config = ParallaxConfig::default();
        let params = (0..count).map(|i| LayerParams::defaults(i, &config)).collect();
        ParallaxScene::new(
            params,
            Bounds {
                width: 800.0,
                height: 600.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn empty_stack_is_inert() {
        assert!(ParallaxScene::new(Vec::new(), Bounds::default()).is_none());
    }

    #[test]
    fn index_defaults_recede() {
        let config = ParallaxConfig::default();
        let front = LayerParams::defaults(0, &config);
        let back = LayerParams::defaults(3, &config);
        assert!(back.depth < front.depth);
        assert!(back.scale < front.scale);
        assert!(back.rotate_range < front.rotate_range);
        assert!(back.base_opacity < front.base_opacity);
        assert!(back.ease > front.ease);

        let far = LayerParams::defaults(50, &config);
        assert_eq!(far.scale, config.min_scale);
        assert_eq!(far.ease, config.max_ease);
    }

    #[test]
    fn declared_attributes_override_defaults() {
        let config = ParallaxConfig::default();
        let params = LayerParams::from_attrs(1, &config, |name| match name {
            "depth" => Some("-200".into()),
            "offsetX" => Some(" 12.5 ".into()),
            "ease" => Some("4".into()),
            "scale" => Some("not a number".into()),
            _ => None,
        });
        assert_eq!(params.depth, -200.0);
        assert_eq!(params.offset_x, 12.5);
        assert_eq!(params.ease, 1.0);
        assert_eq!(params.scale, LayerParams::defaults(1, &config).scale);
    }

    #[test]
    fn layers_start_at_center_plus_offset() {
        let mut params = LayerParams::defaults(0, &ParallaxConfig::default());
        params.offset_x = 30.0;
        params.offset_y = -10.0;
        let scene = ParallaxScene::new(
            vec![params],
            Bounds {
                width: 200.0,
                height: 100.0,
            },
        )
        .unwrap();
        assert_eq!(scene.layer_state(0), Some(LayerState { x: 130.0, y: 40.0 }));
    }

    #[test]
    fn stationary_pointer_converges_geometrically() {
        let mut scene = scene(3);
        scene.pointer_move(700.0, 100.0);

        let mut previous: Vec<f64> = (0..3)
            .map(|i| {
                let s = scene.layer_state(i).unwrap();
                (700.0 - s.x).hypot(100.0 - s.y)
            })
            .collect();

        for _ in 0..20 {
            scene.frame();
            for (i, prev) in previous.iter_mut().enumerate() {
                let s = scene.layer_state(i).unwrap();
                let err = (700.0 - s.x).hypot(100.0 - s.y);
                let ease = LayerParams::defaults(i, &ParallaxConfig::default()).ease;
                assert!((err - *prev * (1.0 - ease)).abs() < 1e-9);
                *prev = err;
            }
        }

        for _ in 0..1000 {
            scene.frame();
        }
        for i in 0..3 {
            let s = scene.layer_state(i).unwrap();
            assert!((s.x - 700.0).abs() < 1e-6);
            assert!((s.y - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn inactive_pointer_targets_center() {
        let mut scene = scene(2);
        scene.pointer_move(10.0, 20.0);
        for _ in 0..5 {
            scene.frame();
        }
        scene.pointer_leave();
        assert_eq!(scene.target(), (400.0, 300.0));

        for _ in 0..2000 {
            scene.frame();
        }
        let s = scene.layer_state(1).unwrap();
        assert!((s.x - 400.0).abs() < 1e-6);
        assert!((s.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn opacity_and_stacking_follow_pointer_and_index() {
        let mut scene = scene(3);
        let poses = scene.frame();
        assert!(poses.iter().all(|p| p.opacity == 0.0));
        assert_eq!(
            poses.iter().map(|p| p.z_index).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );

        scene.pointer_move(400.0, 300.0);
        let poses = scene.frame();
        assert_eq!(poses[0].opacity, 1.0);
        assert!(poses[2].opacity < poses[0].opacity);
    }

    #[test]
    fn rotation_tracks_offset_from_center() {
        let mut params = LayerParams::defaults(0, &ParallaxConfig::default());
        params.ease = 1.0;
        params.rotate_range = 10.0;
        let mut scene = ParallaxScene::new(
            vec![params],
            Bounds {
                width: 400.0,
                height: 400.0,
            },
        )
        .unwrap();

        // Right and below centre.
        scene.pointer_move(300.0, 400.0);
        let pose = &scene.frame()[0];
        assert!((pose.rotate_x - 10.0).abs() < 1e-9);
        assert!((pose.rotate_y + 5.0).abs() < 1e-9);
    }

    #[test]
    fn resize_keeps_positions() {
        let mut scene = scene(1);
        scene.pointer_move(100.0, 100.0);
        scene.frame();
        let before = scene.layer_state(0);
        scene.set_bounds(Bounds {
            width: 1200.0,
            height: 900.0,
        });
        assert_eq!(scene.layer_state(0), before);
        scene.pointer_leave();
        assert_eq!(scene.target(), (600.0, 450.0));
    }

    #[test]
    fn transform_orders_translate_before_rotation() {
        let pose = LayerPose {
            x: 10.0,
            y: 20.0,
            depth: -60.0,
            rotate_x: 1.0,
            rotate_y: -2.0,
            scale: 0.92,
            opacity: 1.0,
            z_index: 1,
        };
        assert_eq!(
            pose.transform(),
            "translate3d(10.00px, 20.00px, -60.00px) translate(-50%, -50%) rotateX(1.00deg) rotateY(-2.00deg) scale(0.920)"
        );
    }
}
