use crossbeam::thread;
use log::debug;
use nalgebra::Point3;
use std::time::Instant;

use crate::{
    canvas::{Canvas, Color},
    lighting,
    scene::{Compositing, Scene},
    shape::Shape,
};

/// Render every pixel of `canvas` from the scene's camera. The canvas is expected to match the
/// camera's viewport; pixels the camera can't produce a ray for are painted black.
///
/// Rows are split into contiguous bands, one per thread. Each band is written by exactly one
/// thread, so the result doesn't depend on the thread count.
pub fn render(scene: &Scene, canvas: &mut Canvas) {
    let start = Instant::now();

    let width = canvas.width() as usize;
    let height = canvas.height() as usize;
    if width == 0 || height == 0 {
        return;
    }

    let threads = scene.config.threads.clamp(1, height);
    let band_rows = (height + threads - 1) / threads;

    if threads == 1 {
        render_band(scene, 0, width, canvas.pixels_mut());
    } else {
        thread::scope(|s| {
            for (band, pixels) in canvas.pixels_mut().chunks_mut(band_rows * width).enumerate() {
                s.spawn(move |_| render_band(scene, band * band_rows, width, pixels));
            }
        })
        .expect("render thread panicked");
    }

    debug!(
        "rendered {}x{} with {} threads in {:?}",
        width,
        height,
        threads,
        start.elapsed()
    );
}

/// Render a run of whole rows, starting at row `first_row`.
fn render_band(scene: &Scene, first_row: usize, width: usize, pixels: &mut [u32]) {
    for (row_offset, row) in pixels.chunks_mut(width).enumerate() {
        let y = (first_row + row_offset) as u32;
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = trace(scene, x as u32, y).argb();
        }
    }
}

/// The color of pixel `(x, y)`.
pub fn trace(scene: &Scene, x: u32, y: u32) -> Color {
    let ray = match scene.camera.shoot_ray(x, y, scene.config.max_distance) {
        Some(ray) => ray,
        None => return Color::black(),
    };

    let hit = match scene.config.compositing {
        Compositing::LastHit => scene
            .shapes
            .iter()
            .filter_map(|shape| shape.intersection(&ray).map(|point| (shape, point)))
            .last(),

        Compositing::NearestHit => scene
            .shapes
            .iter()
            .filter_map(|shape| shape.intersection(&ray).map(|point| (shape, point)))
            .fold(None, |nearest: Option<(&Box<dyn Shape>, Point3<f32>)>, hit| {
                match nearest {
                    Some(best)
                        if (best.1 - ray.position).norm_squared()
                            <= (hit.1 - ray.position).norm_squared() =>
                    {
                        Some(best)
                    }
                    _ => Some(hit),
                }
            }),
    };

    hit.map_or_else(Color::black, |(shape, point)| {
        shade_point(scene, shape.as_ref(), &point)
    })
}

/// Sum the contribution of every light at a point on `shape`.
fn shade_point(scene: &Scene, shape: &dyn Shape, point: &Point3<f32>) -> Color {
    let mut output = Color::black();

    for light in &scene.lights {
        output += lighting::shade(shape, light, &scene.camera, point);
    }

    output
}
