use anyhow::{Context, Error};
use crossbeam::channel::{self, Receiver};
use log::{debug, info, warn};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

use crate::{
    canvas::Canvas,
    controls::{self, Command},
    parser,
    render::render,
    scene::Scene,
};

/// A resizable window that repeatedly renders a scene until it is closed or `Escape` is pressed.
pub struct Viewer {
    window: Window,
    canvas: Canvas,
}

/// Watches a scene file for modification.
pub struct SceneWatcher {
    path: PathBuf,
    events: Receiver<()>,
    _watcher: RecommendedWatcher,
}

impl SceneWatcher {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path
            .as_ref()
            .canonicalize()
            .with_context(|| format!("failed to resolve `{}`", path.as_ref().display()))?;
        let dir = path
            .parent()
            .context("scene file has no parent directory")?
            .to_path_buf();

        let (send, events) = channel::unbounded();
        let scene_path = path.clone();
        let mut watcher = notify::recommended_watcher(move |event: notify::Result<Event>| match event {
            Ok(Event {
                kind: EventKind::Modify(_) | EventKind::Create(_),
                paths,
                ..
            }) if paths.contains(&scene_path) => {
                // the receiver only goes away when the viewer is shutting down
                let _ = send.send(());
            }
            _ => (),
        })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        info!("watching {} for changes", path.display());

        Ok(Self {
            path,
            events,
            _watcher: watcher,
        })
    }

    /// Whether the file changed since the last call.
    fn changed(&self) -> bool {
        self.events.try_iter().count() > 0
    }

    fn reload(&self, scene: &mut Scene) -> Result<(), Error> {
        reload(&self.path, scene)
    }
}

/// Replace the shapes, lights and animation of `scene` with those of the file at `path`. The camera
/// and render settings are kept. On failure the scene is left untouched.
fn reload(path: &Path, scene: &mut Scene) -> Result<(), Error> {
    let fresh = parser::load(path, scene.camera.width(), scene.camera.height())?;
    scene.shapes = fresh.shapes;
    scene.lights = fresh.lights;
    scene.animation = fresh.animation;
    Ok(())
}

impl Viewer {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, Error> {
        let mut window = Window::new(
            title,
            width as usize,
            height as usize,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .with_context(|| format!("failed to open a {}x{} window", width, height))?;

        // Limit to max ~60 fps update rate
        window.set_target_fps(60);

        info!("opened {}x{} window", width, height);

        Ok(Self {
            window,
            canvas: Canvas::new(width, height),
        })
    }

    /// Run the frame loop: handle resizes and key presses, reload the scene if it changed,
    /// render, present, then advance the animation.
    pub fn run(&mut self, mut scene: Scene, watcher: Option<SceneWatcher>) -> Result<(), Error> {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        controls::resize(&mut scene, &mut self.canvas, width, height);

        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            let (width, height) = self.window.get_size();
            let (width, height) = (width as u32, height as u32);
            if width > 0
                && height > 0
                && (width, height) != (self.canvas.width(), self.canvas.height())
            {
                controls::resize(&mut scene, &mut self.canvas, width, height);
            }

            for key in self.window.get_keys_pressed(KeyRepeat::Yes) {
                if let Some(command) = command(key) {
                    controls::apply(&mut scene.camera, command);
                }
            }

            if let Some(watcher) = &watcher {
                if watcher.changed() {
                    match watcher.reload(&mut scene) {
                        Ok(()) => info!("reloaded {}", watcher.path.display()),
                        Err(err) => warn!("keeping previous scene: {:#}", err),
                    }
                }
            }

            render(&scene, &mut self.canvas);
            self.window
                .update_with_buffer(
                    self.canvas.pixels(),
                    self.canvas.width() as usize,
                    self.canvas.height() as usize,
                )
                .context("failed to present frame")?;

            scene.advance();
        }

        debug!("window closed");
        Ok(())
    }
}

/// The camera command bound to a key.
fn command(key: Key) -> Option<Command> {
    let command = match key {
        Key::W => Command::Forward,
        Key::S => Command::Backward,
        Key::A => Command::Left,
        Key::D => Command::Right,
        Key::Space => Command::Up,
        Key::LeftShift => Command::Down,
        Key::Left => Command::YawLeft,
        Key::Right => Command::YawRight,
        Key::Up => Command::PitchUp,
        Key::Down => Command::PitchDown,
        _ => return None,
    };
    Some(command)
}
