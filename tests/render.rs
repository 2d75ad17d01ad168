use nalgebra::{Point3, Vector3};

use rayshade::{
    camera::Camera,
    canvas::{Canvas, Color},
    controls,
    light::Light,
    render::render,
    scene::{RenderConfig, Scene},
};

const BLACK: u32 = 0xFF000000;

fn draw(scene: &Scene) -> Canvas {
    let mut canvas = Canvas::new(scene.camera.width(), scene.camera.height());
    render(scene, &mut canvas);
    canvas
}

#[test]
fn test_classic_scene() {
    let canvas = draw(&Scene::classic(40, 40));

    // the sphere sits right of center, the corners see nothing
    let sphere = Color::from_argb(canvas.get(31, 20));
    assert!(sphere.b > 0.);
    assert_eq!(0., sphere.r);
    assert_eq!(BLACK, canvas.get(0, 0));
    assert_eq!(BLACK, canvas.get(39, 39));
}

#[test]
fn test_demo_scene() {
    let scene = Scene::demo(48, 32);
    let canvas = draw(&scene);
    assert!(canvas.pixels().iter().any(|&pixel| pixel != BLACK));

    let single = Scene::demo(48, 32).with_config(RenderConfig::default().with_threads(1));
    assert_eq!(canvas.pixels(), draw(&single).pixels());
}

#[test]
fn test_no_shapes_is_black() {
    let camera = Camera::new(Point3::origin(), Vector3::z(), 16, 9, 60.);
    let scene = Scene::new(camera).add_light(Light::new(Point3::new(0., 1., 0.), 5., Color::white()));
    assert!(draw(&scene).pixels().iter().all(|&pixel| pixel == BLACK));
}

#[test]
fn test_moving_light() {
    let mut scene = Scene::classic(40, 40);
    let before = draw(&scene);

    scene.lights[0].position += Vector3::new(0., 0., -1.);
    let after = draw(&scene);

    assert_ne!(before.get(31, 20), after.get(31, 20));
    for (x, y) in [(0, 0), (39, 0), (0, 39), (39, 39)] {
        assert_eq!(BLACK, before.get(x, y));
        assert_eq!(BLACK, after.get(x, y));
    }
}

#[test]
fn test_resize_then_render() {
    let mut scene = Scene::classic(40, 40);
    let mut canvas = draw(&scene);

    controls::resize(&mut scene, &mut canvas, 20, 10);
    render(&scene, &mut canvas);

    assert_eq!(20 * 10, canvas.pixels().len());
    assert_eq!(draw(&Scene::classic(20, 10)).pixels(), canvas.pixels());
}

#[test]
fn test_scene_files_match_builtins() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes");

    let classic = rayshade::parser::load(dir.join("classic.scn"), 32, 24).expect("classic.scn");
    assert_eq!(draw(&Scene::classic(32, 24)).pixels(), draw(&classic).pixels());

    let demo = rayshade::parser::load(dir.join("demo.scn"), 32, 24).expect("demo.scn");
    for (builtin, parsed) in Scene::demo(32, 24).lights.iter().zip(&demo.lights) {
        assert_eq!(builtin.position, parsed.position);
        assert_eq!(builtin.intensity(), parsed.intensity());
    }
    assert_eq!(Scene::demo(32, 24).animation, demo.animation);
    assert_eq!(3, demo.shapes.len());
}
