//! Input handling, independent of any windowing library. Each event maps onto a state transition
//! of the scene, after which the host redraws.

use log::debug;
use nalgebra::Vector3;

use crate::{camera::Camera, canvas::Canvas, math, scene::Scene};

/// Distance moved per key press, in world units.
pub const MOVE_STEP: f32 = 0.1;

/// Angle turned per key press, in degrees.
pub const TURN_STEP: f32 = 5.;

/// Pitch stops this many degrees short of looking straight up or down.
const POLE_MARGIN: f32 = 5.;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
}

/// Resize the camera viewport and the frame buffer together. Zero sizes are treated as one pixel.
pub fn resize(scene: &mut Scene, canvas: &mut Canvas, width: u32, height: u32) {
    let width = width.max(1);
    let height = height.max(1);
    debug!("resize to {}x{}", width, height);

    scene.camera.set_width(width);
    scene.camera.set_height(height);
    canvas.resize(width, height);
}

/// Move or turn the camera by one step.
pub fn apply(camera: &mut Camera, command: Command) {
    debug!("camera command {:?}", command);

    let turn = math::deg_to_rad(TURN_STEP);
    let margin = math::deg_to_rad(POLE_MARGIN);

    match command {
        Command::Forward => camera.translate(&Vector3::new(0., 0., MOVE_STEP)),
        Command::Backward => camera.translate(&Vector3::new(0., 0., -MOVE_STEP)),
        Command::Left => camera.translate(&Vector3::new(-MOVE_STEP, 0., 0.)),
        Command::Right => camera.translate(&Vector3::new(MOVE_STEP, 0., 0.)),
        Command::Up => camera.translate(&Vector3::new(0., MOVE_STEP, 0.)),
        Command::Down => camera.translate(&Vector3::new(0., -MOVE_STEP, 0.)),

        // positive yaw turns from +z toward +x, which is the camera's right
        Command::YawLeft => camera.rotate(-turn, 0., margin),
        Command::YawRight => camera.rotate(turn, 0., margin),

        // positive pitch around the right vector tips the view downward
        Command::PitchUp => camera.rotate(0., -turn, margin),
        Command::PitchDown => camera.rotate(0., turn, margin),
    }
}
