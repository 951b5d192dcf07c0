//! Play mode against the bundled collaborators

use super::{spawn_at, spawn_camera, Harness};
use crate::ecs::components::{
    AnimationComponent, BodyType, RigidbodyComponent, ScriptComponent, SpriteComponent, TransformComponent,
};
use crate::physics::{BasicPhysics2D, BasicPhysicsConfig, NoPhysics};
use crate::foundation::math::{translation_2d, Vec2};
use crate::render::{Color, DrawCommand, QuadFill};
use crate::scene::{PlayState, Scene, SceneError, StartReport};
use crate::scripting::{NativeClass, NativeScriptHost, ScriptValue, ScriptValueType};
use approx::assert_relative_eq;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn test_state_machine() {
    let mut scene = Scene::new("lifecycle");
    let mut harness = Harness::new();
    assert_eq!(scene.state(), PlayState::Stopped);

    assert_eq!(
        scene.on_scene_end(&mut harness.systems()),
        Err(SceneError::NotPlaying("lifecycle".into()))
    );

    scene.on_scene_start(&mut harness.systems()).unwrap();
    assert!(scene.is_playing());
    assert_eq!(
        scene.on_scene_start(&mut harness.systems()).map(|_| ()),
        Err(SceneError::AlreadyPlaying("lifecycle".into()))
    );

    scene.on_scene_end(&mut harness.systems()).unwrap();
    assert_eq!(scene.state(), PlayState::Stopped);
    assert!(scene.active_camera().is_null());
}

#[test]
fn test_script_field_set_before_on_start() {
    let seen_at_start = Rc::new(Cell::new(None));
    let observed = Rc::clone(&seen_at_start);

    let mut host = NativeScriptHost::new();
    host.register(
        NativeClass::new("Player")
            .with_field("health", ScriptValue::Int(0))
            .with_method("OnStart", move |this, _| {
                observed.set(this.get("health").and_then(ScriptValue::as_int));
                None
            }),
    );

    let mut scene = Scene::new("scripts");
    let player = scene.create_object("Player");
    scene
        .add_component(
            player,
            ScriptComponent::new("assets/scripts/Player.cs").with_variable("health", ScriptValueType::Int, "100"),
        )
        .unwrap();

    let mut harness = Harness::with(host, NoPhysics);
    let report = scene.on_scene_start(&mut harness.systems()).unwrap();

    assert_eq!(
        report,
        StartReport {
            scripts_bound: 1,
            scripts_inert: 0,
            fields_failed: 0
        }
    );
    assert_eq!(seen_at_start.get(), Some(100));

    let script = scene.component::<ScriptComponent>(player).unwrap();
    let instance = script.instance().unwrap();
    let owner = harness.scripts.instance(instance).unwrap().ctor_args()[0].clone();
    assert_eq!(owner, ScriptValue::String(scene.uuid_of(player).unwrap().to_string()));
}

#[test]
fn test_unresolved_script_is_inert_and_scene_still_plays() {
    let updates = Rc::new(Cell::new(0));
    let counter = Rc::clone(&updates);

    let mut host = NativeScriptHost::new();
    host.register(NativeClass::new("Known").with_method("OnUpdate", move |_, _| {
        counter.set(counter.get() + 1);
        None
    }));

    let mut scene = Scene::new("scripts");
    spawn_camera(&mut scene, "Camera");
    let known = scene.create_object("Known");
    scene.add_component(known, ScriptComponent::new("Known.cs")).unwrap();
    let missing = scene.create_object("Missing");
    scene.add_component(missing, ScriptComponent::new("Missing.cs")).unwrap();

    let mut harness = Harness::with(host, NoPhysics);
    let report = scene.on_scene_start(&mut harness.systems()).unwrap();
    assert_eq!(report.scripts_bound, 1);
    assert_eq!(report.scripts_inert, 1);
    assert!(scene.component::<ScriptComponent>(missing).unwrap().class().is_none());

    for _ in 0..3 {
        let stats = scene.on_update_runtime(0.016, &mut harness.systems());
        assert_eq!(stats.scripts_updated, 1);
        assert_eq!(stats.script_failures, 0);
    }
    assert_eq!(updates.get(), 3);
}

#[test]
fn test_bad_field_value_keeps_default() {
    let mut host = NativeScriptHost::new();
    host.register(
        NativeClass::new("Enemy")
            .with_field("speed", ScriptValue::Double(1.5))
            .with_field("boss", ScriptValue::Bool(false)),
    );

    let mut scene = Scene::new("scripts");
    let enemy = scene.create_object("Enemy");
    scene
        .add_component(
            enemy,
            ScriptComponent::new("Enemy.cs")
                .with_variable("speed", ScriptValueType::Double, "fast")
                .with_variable("boss", ScriptValueType::Bool, "true"),
        )
        .unwrap();

    let mut harness = Harness::with(host, NoPhysics);
    let report = scene.on_scene_start(&mut harness.systems()).unwrap();
    assert_eq!(report.fields_failed, 1);

    let instance = scene.component::<ScriptComponent>(enemy).unwrap().instance().unwrap();
    assert_eq!(harness.scripts.field_value(instance, "speed"), Some(&ScriptValue::Double(1.5)));
    assert_eq!(harness.scripts.field_value(instance, "boss"), Some(&ScriptValue::Bool(true)));
}

#[test]
fn test_runtime_without_camera_clears_target() {
    let mut scene = Scene::new("no camera");
    let object = scene.create_object("Sprite");
    scene.add_component(object, SpriteComponent::default()).unwrap();
    let mut harness = Harness::new();

    scene.on_scene_start(&mut harness.systems()).unwrap();
    let count = scene.object_count();
    let stats = scene.on_update_runtime(0.016, &mut harness.systems());

    assert!(!stats.rendered);
    assert_eq!(stats.sprites_drawn, 0);
    assert_eq!(harness.renderer.clear_count(), 1);
    assert_eq!(harness.renderer.quads().count(), 0);
    assert_eq!(scene.object_count(), count);
}

#[test]
fn test_animation_wraps_through_runtime() {
    let mut scene = Scene::new("animation");
    spawn_camera(&mut scene, "Camera");
    let object = scene.create_object("Runner");
    scene.add_component(object, SpriteComponent::from_texture("runner.png")).unwrap();
    scene.add_component(object, AnimationComponent::new(10.0, 4, true)).unwrap();

    let mut harness = Harness::new();
    scene.on_scene_start(&mut harness.systems()).unwrap();

    let mut frames = Vec::new();
    for _ in 0..60 {
        scene.on_update_runtime(0.02, &mut harness.systems());
        let sprite = scene.component::<SpriteComponent>(object).unwrap();
        assert!((1..=4).contains(&sprite.current_frame));
        assert_eq!(sprite.total_frames, 4);
        frames.push(sprite.current_frame);
    }
    assert!(frames.windows(2).any(|w| w[1] < w[0]), "never wrapped: {frames:?}");

    match harness.renderer.quads().last() {
        Some((_, QuadFill::Sprite { frame, total_frames, .. })) => {
            assert_eq!(*frame, *frames.last().unwrap());
            assert_eq!(*total_frames, 4);
        }
        other => panic!("expected a sprite quad, got {other:?}"),
    }
}

#[test]
fn test_animations_hold_while_stopped() {
    let mut scene = Scene::new("animation");
    spawn_camera(&mut scene, "Camera");
    let object = scene.create_object("Runner");
    scene.add_component(object, SpriteComponent::from_texture("runner.png")).unwrap();
    scene.add_component(object, AnimationComponent::new(10.0, 4, true)).unwrap();

    let mut harness = Harness::new();
    scene.on_scene_start(&mut harness.systems()).unwrap();
    scene.on_update_runtime(0.15, &mut harness.systems());
    scene.on_scene_end(&mut harness.systems()).unwrap();

    let animation = scene.component::<AnimationComponent>(object).unwrap();
    assert!(animation.play);
    assert_eq!(animation.current_frame, 2);

    for _ in 0..5 {
        let stats = scene.on_update_runtime(0.15, &mut harness.systems());
        assert!(stats.rendered);
    }
    assert_eq!(scene.component::<AnimationComponent>(object).unwrap().current_frame, 2);
    assert_eq!(scene.component::<SpriteComponent>(object).unwrap().current_frame, 2);
}

#[test]
fn test_scene_start_resets_animations() {
    let mut scene = Scene::new("animation");
    let object = scene.create_object("Idle");
    let mut animation = AnimationComponent::new(10.0, 4, true);
    animation.play_on_awake = false;
    animation.play = true;
    animation.current_frame = 3;
    scene.add_component(object, animation).unwrap();

    let mut harness = Harness::new();
    scene.on_scene_start(&mut harness.systems()).unwrap();
    let animation = scene.component::<AnimationComponent>(object).unwrap();
    assert!(!animation.play);
    assert_eq!(animation.current_frame, 1);
}

#[test]
fn test_sprites_drawn_by_layer_then_store_order() {
    let mut scene = Scene::new("layers");
    spawn_camera(&mut scene, "Camera");
    let layers = [2, 1, 2, 1];
    for (i, layer) in layers.iter().enumerate() {
        let object = scene.create_object(&format!("S{i}"));
        #[allow(clippy::cast_precision_loss)]
        let color = Color::new(i as f32, 0.0, 0.0, 1.0);
        scene
            .add_component(object, SpriteComponent::from_color(color).with_layer(*layer))
            .unwrap();
    }

    let mut harness = Harness::new();
    scene.on_scene_start(&mut harness.systems()).unwrap();
    let stats = scene.on_update_runtime(0.016, &mut harness.systems());
    assert!(stats.rendered);
    assert_eq!(stats.sprites_drawn, 4);

    let order: Vec<f32> = harness
        .renderer
        .quads()
        .map(|(_, fill)| match fill {
            QuadFill::Color(color) => color.r,
            QuadFill::Sprite { .. } => -1.0,
        })
        .collect();
    assert_eq!(order, vec![1.0, 3.0, 0.0, 2.0]);

    let commands = harness.renderer.commands();
    assert!(matches!(commands.first(), Some(DrawCommand::BeginScene { .. })));
    assert!(matches!(commands.last(), Some(DrawCommand::EndScene)));
}

#[test]
fn test_first_camera_in_store_order_is_active() {
    let mut scene = Scene::new("cameras");
    let first = spawn_camera(&mut scene, "Main");
    let _second = spawn_camera(&mut scene, "Secondary");
    let mut harness = Harness::new();

    scene.on_scene_start(&mut harness.systems()).unwrap();
    assert_eq!(scene.active_camera(), first);

    scene.delete_object(first).unwrap();
    assert!(scene.active_camera().is_null());
    scene.on_update_runtime(0.016, &mut harness.systems());
    assert_eq!(scene.name_of(scene.active_camera()).unwrap(), "Secondary");
}

#[test]
fn test_camera_view_follows_transform() {
    let mut scene = Scene::new("cameras");
    let camera = spawn_camera(&mut scene, "Camera");
    *scene.transform_mut(camera).unwrap().translation() = Vec2::new(4.0, -1.0);
    let mut harness = Harness::new();

    scene.on_scene_start(&mut harness.systems()).unwrap();
    scene.on_update_runtime(0.016, &mut harness.systems());

    let component = scene.component::<crate::ecs::components::CameraComponent>(camera).unwrap();
    let eye = translation_2d(component.camera.view());
    assert_relative_eq!(eye.x, 4.0);
    assert_relative_eq!(eye.y, -1.0);
    assert_relative_eq!(component.camera.aspect_ratio(), 1600.0 / 900.0);
}

#[test]
fn test_physics_runs_only_while_playing() {
    let mut scene = Scene::new("physics");
    spawn_camera(&mut scene, "Camera");
    let body = spawn_at(&mut scene, "Crate", 0.0, 10.0);
    scene.add_component(body, RigidbodyComponent::new(BodyType::Dynamic)).unwrap();

    let physics = BasicPhysics2D::new(BasicPhysicsConfig {
        gravity: Vec2::new(0.0, -10.0),
        max_substep: 1.0,
    });
    let mut harness = Harness::with(NativeScriptHost::new(), physics);

    // Stopped: rendering only
    scene.on_update_runtime(0.5, &mut harness.systems());
    assert_relative_eq!(scene.component::<TransformComponent>(body).unwrap().translation.y, 10.0);

    scene.on_scene_start(&mut harness.systems()).unwrap();
    assert!(scene.component::<RigidbodyComponent>(body).unwrap().runtime_body().is_some());
    scene.on_update_runtime(0.5, &mut harness.systems());
    assert_relative_eq!(scene.component::<TransformComponent>(body).unwrap().translation.y, 7.5);

    scene.on_scene_end(&mut harness.systems()).unwrap();
    assert!(scene.component::<RigidbodyComponent>(body).unwrap().runtime_body().is_none());
    assert_eq!(harness.physics.body_count(), 0);
}

#[test]
fn test_scene_end_unbinds_scripts() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);

    let mut host = NativeScriptHost::new();
    host.register(NativeClass::new("Logger").with_method("OnStart", move |_, _| {
        sink.borrow_mut().push("start");
        None
    }));

    let mut scene = Scene::new("scripts");
    let object = scene.create_object("Logger");
    scene.add_component(object, ScriptComponent::new("Logger.cs")).unwrap();

    let mut harness = Harness::with(host, NoPhysics);
    scene.on_scene_start(&mut harness.systems()).unwrap();
    assert_eq!(harness.scripts.instance_count(), 1);

    scene.on_scene_end(&mut harness.systems()).unwrap();
    assert_eq!(harness.scripts.instance_count(), 0);
    assert!(!scene.component::<ScriptComponent>(object).unwrap().is_bound());

    // A second session binds again
    scene.on_scene_start(&mut harness.systems()).unwrap();
    assert_eq!(*log.borrow(), vec!["start", "start"]);
}

#[test]
fn test_objects_can_change_during_play() {
    let mut scene = Scene::new("mutation");
    spawn_camera(&mut scene, "Camera");
    let object = scene.create_object("Spawner");
    scene.add_component(object, SpriteComponent::default()).unwrap();
    let mut harness = Harness::new();

    scene.on_scene_start(&mut harness.systems()).unwrap();
    let copy = scene.duplicate_object(object).unwrap();
    let stats = scene.on_update_runtime(0.016, &mut harness.systems());
    assert_eq!(stats.sprites_drawn, 2);

    scene.delete_object(copy).unwrap();
    scene.delete_object(object).unwrap();
    let stats = scene.on_update_runtime(0.016, &mut harness.systems());
    assert_eq!(stats.sprites_drawn, 0);
    assert!(stats.rendered);
}
