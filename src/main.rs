use anyhow::Error;
use clap::{Parser, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

use rayshade::{
    canvas::Canvas,
    parser,
    render::render,
    scene::{Compositing, Scene},
};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Scene file to render. Without one the built-in demo scene is used.
    scene: Option<PathBuf>,

    #[arg(long, default_value_t = 600)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Render threads, defaults to the number of cpus.
    #[arg(short, long)]
    threads: Option<usize>,

    /// Ignore intersections further than this from the camera.
    #[arg(long)]
    max_distance: Option<f32>,

    #[arg(long, value_enum)]
    compositing: Option<CompositingArg>,

    /// Use the single sphere scene instead of the demo.
    #[arg(long, conflicts_with = "scene")]
    classic: bool,

    /// Render a single frame to this PNG instead of opening a window.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Animation steps to run before rendering to `--output`.
    #[arg(long, default_value_t = 0, requires = "output")]
    frames: u32,

    /// Reload the scene file when it changes.
    #[arg(long, requires = "scene")]
    watch: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompositingArg {
    Nearest,
    Last,
}

impl From<CompositingArg> for Compositing {
    fn from(arg: CompositingArg) -> Self {
        match arg {
            CompositingArg::Nearest => Compositing::NearestHit,
            CompositingArg::Last => Compositing::LastHit,
        }
    }
}

fn load_scene(args: &Args) -> Result<Scene, Error> {
    let mut scene = if let Some(path) = &args.scene {
        info!("loading {}", path.display());
        parser::load(path, args.width, args.height)?
    } else if args.classic {
        Scene::classic(args.width, args.height)
    } else {
        Scene::demo(args.width, args.height)
    };

    let mut config = scene.config.clone();
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Some(max_distance) = args.max_distance {
        config = config.with_max_distance(max_distance);
    }
    if let Some(compositing) = args.compositing {
        config = config.with_compositing(compositing.into());
    }
    scene.config = config;

    Ok(scene)
}

fn snapshot(mut scene: Scene, frames: u32, output: &Path) -> Result<(), Error> {
    for _ in 0..frames {
        scene.advance();
    }

    let mut canvas = Canvas::new(scene.camera.width(), scene.camera.height());
    render(&scene, &mut canvas);
    canvas.save(output)?;

    info!("wrote {}", output.display());
    Ok(())
}

#[cfg(feature = "window")]
fn view(scene: Scene, args: &Args) -> Result<(), Error> {
    use rayshade::viewer::{SceneWatcher, Viewer};

    let watcher = match (&args.scene, args.watch) {
        (Some(path), true) => Some(SceneWatcher::new(path)?),
        _ => None,
    };

    let mut viewer = Viewer::new("Raytracing", args.width, args.height)?;
    viewer.run(scene, watcher)
}

#[cfg(not(feature = "window"))]
fn view(_scene: Scene, _args: &Args) -> Result<(), Error> {
    anyhow::bail!("built without the `window` feature, use --output to render to a file")
}

fn main() -> Result<(), Error> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();
    let scene = load_scene(&args)?;
    info!(
        "{} shapes, {} lights, {} threads",
        scene.shapes.len(),
        scene.lights.len(),
        scene.config.threads
    );

    match &args.output {
        Some(output) => snapshot(scene, args.frames, output),
        None => view(scene, &args),
    }
}
