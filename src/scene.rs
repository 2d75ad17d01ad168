use log::warn;
use nalgebra::{Point3, Vector3};

use crate::{
    camera::Camera,
    canvas::Color,
    light::Light,
    material::Material,
    shape::{Shape, Sphere},
};

/// How overlapping shapes along a ray are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compositing {
    /// The intersection closest to the camera wins.
    #[default]
    NearestHit,

    /// The last intersecting shape, in insertion order, wins regardless of depth.
    LastHit,
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Intersections further than this from the camera are ignored.
    pub max_distance: f32,

    /// Number of threads used to render a frame.
    pub threads: usize,

    pub compositing: Compositing,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_distance: 10.,
            threads: num_cpus::get(),
            compositing: Compositing::default(),
        }
    }
}

impl RenderConfig {
    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = usize::max(threads, 1);
        self
    }

    pub fn with_compositing(mut self, compositing: Compositing) -> Self {
        self.compositing = compositing;
        self
    }
}

/// A per-frame change to one light: it drifts by `offset` and grows brighter by `intensity_step`.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Index of the animated light.
    pub light: usize,
    pub offset: Vector3<f32>,
    pub intensity_step: f32,
}

#[derive(Debug)]
pub struct Scene {
    pub camera: Camera,
    pub shapes: Vec<Box<dyn Shape>>,
    pub lights: Vec<Light>,
    pub config: RenderConfig,
    pub animation: Option<Animation>,
}

impl Scene {
    /// An empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            shapes: Vec::new(),
            lights: Vec::new(),
            config: RenderConfig::default(),
            animation: None,
        }
    }

    /// A single blue sphere lit by one white light.
    pub fn classic(width: u32, height: u32) -> Self {
        let camera = Camera::new(Point3::origin(), Vector3::z(), width, height, 60.);

        Self::new(camera)
            .add_shape(
                Sphere::new(1., Point3::new(1., 0., 3.))
                    .with_material(Material::new(0.3, 1., 0.8, 20.).with_color(Color::blue())),
            )
            .add_light(Light::new(Point3::new(1., 1.4, 0.), 5., Color::white()))
    }

    /// Three spheres under two colored lights, the first of which drifts every frame.
    pub fn demo(width: u32, height: u32) -> Self {
        let camera = Camera::new(Point3::origin(), Vector3::z(), width, height, 60.);

        Self::new(camera)
            .add_shape(
                Sphere::new(1., Point3::new(1., 0., 4.))
                    .with_material(Material::new(0.3, 1., 0.8, 20.).with_color(Color::blue())),
            )
            .add_shape(
                Sphere::new(0.75, Point3::new(-1.25, 0.25, 3.5)).with_material(
                    Material::new(0.2, 0.9, 0.5, 40.).with_color(Color::new(1., 0.2, 0.2)),
                ),
            )
            .add_shape(
                Sphere::new(0.5, Point3::new(0., -0.75, 2.5)).with_material(
                    Material::new(0.1, 1., 1., 80.).with_color(Color::new(0.2, 1., 0.3)),
                ),
            )
            .add_light(Light::new(Point3::new(-2., 1.4, 0.), 3., Color::white()))
            .add_light(Light::new(
                Point3::new(3., 2., 1.),
                4.,
                Color::new(1., 0.9, 0.6),
            ))
            .with_animation(Animation {
                light: 0,
                offset: Vector3::new(0.01, 0., 0.),
                intensity_step: 0.005,
            })
    }

    pub fn add_shape<S: Shape + 'static>(mut self, shape: S) -> Self {
        self.shapes.push(Box::new(shape));
        self
    }

    pub fn add_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Apply one frame of animation.
    pub fn advance(&mut self) {
        let Some(animation) = &self.animation else {
            return;
        };

        match self.lights.get_mut(animation.light) {
            Some(light) => {
                light.position += animation.offset;
                light.set_intensity(light.intensity() + animation.intensity_step);
            }
            None => {
                warn!(
                    "animated light {} does not exist, disabling animation",
                    animation.light
                );
                self.animation = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_classic_scene() {
        let scene = Scene::classic(600, 600);
        assert_eq!(1, scene.shapes.len());
        assert_eq!(1, scene.lights.len());
        assert_eq!(10., scene.config.max_distance);
        assert!(scene.animation.is_none());
        assert_eq!(Color::blue(), scene.shapes[0].material().color);
    }

    #[test]
    fn test_advance_moves_light() {
        let mut scene = Scene::demo(10, 10);
        let before = scene.lights[0].clone();
        let other = scene.lights[1].clone();

        scene.advance();
        scene.advance();

        assert_abs_diff_eq!(
            before.position + Vector3::new(0.02, 0., 0.),
            scene.lights[0].position,
            epsilon = 1e-6
        );
        assert!(scene.lights[0].intensity() > before.intensity());
        assert_eq!(other, scene.lights[1]);
    }

    #[test]
    fn test_advance_missing_light() {
        let mut scene = Scene::classic(10, 10).with_animation(Animation {
            light: 3,
            offset: Vector3::x(),
            intensity_step: 1.,
        });
        let before = scene.lights[0].clone();

        scene.advance();
        assert!(scene.animation.is_none());
        assert_eq!(before, scene.lights[0]);
    }

    #[test]
    fn test_config_builder() {
        let config = RenderConfig::default()
            .with_threads(0)
            .with_max_distance(20.)
            .with_compositing(Compositing::LastHit);
        assert_eq!(1, config.threads);
        assert_eq!(20., config.max_distance);
        assert_eq!(Compositing::LastHit, config.compositing);
    }
}
