//! Sandbox runtime driver
//!
//! Builds a small demo scene and runs it headless through a full play session:
//! start, a fixed number of frames, end. Usage:
//!
//! ```text
//! sandbox [scene_config.(toml|ron)] [frames]
//! ```

use rand::Rng;
use scene_engine::foundation::logging;
use scene_engine::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

const DEFAULT_FRAMES: u32 = 120;
const FRAME_TIME: f32 = 1.0 / 60.0;

#[derive(Error, Debug)]
enum SandboxError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid frame count `{0}`")]
    InvalidFrames(String),
}

struct Options {
    config: SceneConfig,
    frames: u32,
}

fn parse_options() -> Result<Options, SandboxError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading scene config from {path}");
            SceneConfig::load_from_file(&path)?
        }
        None => SceneConfig::default(),
    };
    let frames = match args.next() {
        Some(raw) => raw.parse().map_err(|_| SandboxError::InvalidFrames(raw))?,
        None => DEFAULT_FRAMES,
    };
    Ok(Options { config, frames })
}

/// Script classes available to the demo, resolved by script file stem
fn script_host(ticks: Rc<Cell<u32>>) -> NativeScriptHost {
    let mut host = NativeScriptHost::new();
    host.register(
        NativeClass::new("Player")
            .with_field("health", ScriptValue::Int(10))
            .with_field("speed", ScriptValue::Double(1.0))
            .with_method("OnStart", |this, _| {
                let health = this.get("health").and_then(ScriptValue::as_int).unwrap_or_default();
                log::info!("Player ready with {health} health");
                None
            })
            .with_method("OnUpdate", move |_, _| {
                ticks.set(ticks.get() + 1);
                None
            }),
    );
    host
}

fn build_scene(config: SceneConfig) -> Result<Scene, SceneError> {
    let mut rng = rand::thread_rng();
    let mut scene = Scene::with_config("Sandbox", config);

    let camera = scene.create_object("Main Camera");
    scene.add_component(camera, CameraComponent::orthographic(12.0))?;

    let background = scene.create_object("Background");
    *scene.transform_mut(background)?.scale() = Vec2::new(20.0, 12.0);
    scene.add_component(
        background,
        SpriteComponent::from_color(Color::new(0.1, 0.1, 0.2, 1.0)).with_layer(-10),
    )?;

    let runner = scene.create_object("Runner");
    scene.add_component(runner, SpriteComponent::from_texture("sprites/runner.png"))?;
    scene.add_component(runner, AnimationComponent::new(10.0, 4, true))?;

    let player = scene.create_object("Player");
    scene.add_component(player, SpriteComponent::from_color(Color::new(0.2, 0.8, 0.3, 1.0)).with_layer(1))?;
    scene.add_component(
        player,
        ScriptComponent::new("scripts/Player.cs")
            .with_variable("health", ScriptValueType::Int, "100")
            .with_variable("speed", ScriptValueType::Double, "2.5"),
    )?;

    let crate_object = scene.create_object("Crate");
    *scene.transform_mut(crate_object)?.translation() = Vec2::new(0.0, 5.0);
    scene.add_component(crate_object, SpriteComponent::from_color(Color::new(0.6, 0.4, 0.2, 1.0)))?;
    scene.add_component(crate_object, RigidbodyComponent::new(BodyType::Dynamic))?;
    scene.add_component(crate_object, BoxColliderComponent::default())?;
    for _ in 0..3 {
        let copy = scene.duplicate_object(crate_object)?;
        *scene.transform_mut(copy)?.translation() +=
            Vec2::new(rng.gen_range(-4.0..4.0), rng.gen_range(0.0..3.0));
    }

    let ship = scene.create_object("Ship");
    *scene.transform_mut(ship)?.translation() = Vec2::new(-3.0, -2.0);
    scene.add_component(ship, SpriteComponent::from_color(Color::WHITE))?;
    let turret = scene.create_object("Turret");
    *scene.transform_mut(turret)?.translation() = Vec2::new(0.0, 0.5);
    scene.add_component(turret, SpriteComponent::from_color(Color::new(0.8, 0.8, 0.8, 1.0)).with_layer(2))?;
    scene.add_component(turret, CircleColliderComponent::default())?;
    scene.set_parent(turret, ship)?;

    log::info!("Built scene `{}` with {} objects", scene.name(), scene.object_count());
    Ok(scene)
}

fn run(options: Options) -> Result<(), SandboxError> {
    let ticks = Rc::new(Cell::new(0));
    let mut renderer = HeadlessRenderer::new(1280, 720);
    let mut scripts = script_host(Rc::clone(&ticks));
    let mut physics = BasicPhysics2D::default();

    let mut context = EditorContext::new();
    context.open_project(Project::new("Sandbox", "."));
    context.set_active_scene(build_scene(options.config)?)?;

    if let Some(scene) = context.active_scene() {
        let turret = scene.object_by_name("Turret");
        context.select(turret)?;
    }
    context.render_editor_frame(0.0, &mut renderer);
    log::info!("Editor frame recorded {} draw commands", renderer.take_commands().len());

    let Some(scene) = context.active_scene_mut() else {
        return Ok(());
    };
    let mut systems = SceneSystems::new(&mut renderer, &mut scripts, &mut physics);
    let report = scene.on_scene_start(&mut systems)?;
    log::info!("Start report: {report:?}");

    for frame in 1..=options.frames {
        let stats = scene.on_update_runtime(FRAME_TIME, &mut systems);
        if frame % 30 == 0 {
            log::info!("Frame {frame}: {stats:?}");
        }
    }

    let crate_object = scene.object_by_name("Crate");
    if !crate_object.is_null() {
        let y = scene.component::<TransformComponent>(crate_object)?.translation.y;
        log::info!("Crate fell to y = {y:.2}");
    }

    scene.on_scene_end(&mut systems)?;
    log::info!("OnUpdate ran {} times", ticks.get());

    let snapshots = scene.snapshot_all()?;
    log::info!("Captured {} object snapshots", snapshots.len());
    Ok(())
}

fn main() {
    if let Err(e) = logging::init_with_filter("info") {
        eprintln!("Failed to initialize logging: {e}");
    }

    log::info!("Starting sandbox");
    let result = parse_options().and_then(run);
    if let Err(e) = result {
        log::error!("Sandbox failed: {e}");
        std::process::exit(1);
    }
    log::info!("Sandbox finished");
}
