pub mod camera;
pub mod canvas;
pub mod controls;
pub mod light;
pub mod lighting;
pub mod material;
pub mod math;
pub mod parser;
pub mod ray;
pub mod render;
pub mod scene;
pub mod shape;

#[cfg(feature = "window")]
pub mod viewer;
