use std::sync::{Arc, Mutex};
use std::time::Duration;

use bevy::math::Vec2;
use block_stage::config::StageConfig;
use block_stage::{StageController, StageSignal};

const FRAME: Duration = Duration::from_millis(16);

fn camera_moves(controller: &mut StageController) -> Arc<Mutex<u32>> {
    let moves = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&moves);
    controller.subscribe(move |signal, _| {
        if signal == StageSignal::CameraMove {
            *sink.lock().unwrap() += 1;
        }
    });
    moves
}

#[test]
fn mouse_drift_scenario() {
    let mut controller = StageController::new(&StageConfig::default());
    let moves = camera_moves(&mut controller);

    // Normalized (0.5, -0.5) on the default 1280x720 viewport.
    controller.pointer_moved(Vec2::new(960.0, 540.0));
    assert_eq!(controller.mouse().target, Vec2::new(0.5, -0.5));

    let mut previous_x = controller.camera().target_position.x;
    let mut now = Duration::ZERO;
    for _ in 0..50 {
        controller.tick(now);
        let x = controller.camera().target_position.x;
        assert!(x < previous_x, "target x must keep decreasing");
        assert!(x >= -299.0);
        previous_x = x;
        now += FRAME;
    }

    // Sum of 0.5 * (1 - 0.92^k) for k = 1..=50 is about 19.34.
    let target = controller.camera().target_position;
    assert!((target.x + 19.34).abs() < 0.05, "target x was {}", target.x);
    assert!((target.y - 19.34).abs() < 0.05, "target y was {}", target.y);
    assert_eq!(target.z, 2500.0);

    // The rendered position trails the target.
    let position = controller.camera().position;
    assert!(position.x > target.x && position.x < 0.0);

    controller.tick(now + Duration::from_millis(500));
    assert_eq!(*moves.lock().unwrap(), 0);
}

#[test]
fn sustained_drift_settles_against_the_clamp() {
    let mut controller = StageController::new(&StageConfig::default());
    controller.pointer_moved(Vec2::new(1280.0, 0.0));

    let mut clamped = false;
    controller.run(Duration::ZERO, FRAME, |report| {
        let x = report.camera.target_position.x;
        let y = report.camera.target_position.y;
        if x <= -299.0 {
            clamped = true;
        }
        if clamped {
            assert!((-299.0..=299.0).contains(&x), "x escaped to {x}");
            assert!((-299.0..=299.0).contains(&y), "y escaped to {y}");
        }
        report.frame >= 1000
    });

    assert!(clamped);
    assert!((controller.camera().position.x + 299.0).abs() < 1.0);
}

#[test]
fn five_bucket_changes_in_one_window_fire_one_event() {
    let mut controller = StageController::new(&StageConfig::default());
    let moves = camera_moves(&mut controller);

    let mut now = Duration::ZERO;
    for steps in [4, -4, 4, -4, 4] {
        controller.advance(steps);
        controller.tick(now);
        now += FRAME;
    }
    assert_eq!(*moves.lock().unwrap(), 0);

    controller.tick(Duration::from_millis(100));
    assert_eq!(*moves.lock().unwrap(), 1);
}

#[test]
fn resizing_twice_matches_resizing_once() {
    let mut once = StageController::new(&StageConfig::default());
    let mut twice = StageController::new(&StageConfig::default());

    once.resize(1920.0, 1080.0);
    twice.resize(1920.0, 1080.0);
    twice.resize(1920.0, 1080.0);

    assert_eq!(once.viewport(), twice.viewport());
    assert_eq!(once.take_projection_update(), twice.take_projection_update());
    assert_eq!(twice.take_projection_update(), None);
}
