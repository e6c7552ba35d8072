// Host-side tests for the drag/wheel momentum follower.

use morph_core::*;

const EPS: f32 = 1e-5;

fn follower() -> MomentumFollower {
    MomentumFollower::new(MomentumTuning::default()).unwrap()
}

#[test]
fn wheel_impulse_decays_geometrically_while_coasting() {
    let tuning = MomentumTuning::default();
    let mut f = follower();
    f.wheel(100.0);
    let v0 = 100.0 * tuning.wheel_sensitivity;
    assert!((f.velocity() - v0).abs() < EPS);

    let mut target = 0.0;
    for k in 1..=30 {
        f.step();
        let want = v0 * tuning.friction.powi(k);
        assert!((f.velocity() - want).abs() < EPS, "step {k}");
        target += want;
        assert!((f.target() - target).abs() < 1e-4);
    }
}

#[test]
fn position_eases_toward_the_target() {
    let mut f = follower();
    f.wheel(500.0);
    for _ in 0..5 {
        f.step();
        assert!(f.position() > 0.0 && f.position() < f.target());
    }
    // Once velocity has died out the rendered position catches up
    for _ in 0..2000 {
        f.step();
    }
    assert!(f.velocity().abs() < 1e-6);
    assert!((f.position() - f.target()).abs() < 1e-3);
}

#[test]
fn drag_moves_the_target_and_holds_velocity() {
    let tuning = MomentumTuning::default();
    let mut f = follower();
    f.pointer_down(300.0);
    assert!(f.is_dragging());
    // Dragging up (pointer y decreasing) advances the stack
    f.pointer_move(250.0);
    let target = -50.0 * tuning.drag_sensitivity;
    let velocity = -50.0 * tuning.velocity_sensitivity;
    assert!(target > 0.0);
    assert!((f.target() - target).abs() < EPS);
    assert!((f.velocity() - velocity).abs() < EPS);

    // No friction and no coasting while the pointer is held
    for _ in 0..10 {
        f.step();
    }
    assert!((f.velocity() - velocity).abs() < EPS);
    assert!((f.target() - target).abs() < EPS);

    f.pointer_up();
    assert!(!f.is_dragging());
    f.step();
    assert!((f.velocity() - velocity * tuning.friction).abs() < EPS);
}

#[test]
fn moves_without_a_press_are_ignored() {
    let mut f = follower();
    f.pointer_move(10.0);
    f.pointer_move(400.0);
    assert_eq!(f.target(), 0.0);
    assert_eq!(f.velocity(), 0.0);

    f.pointer_down(0.0);
    f.pointer_move(f32::NAN);
    f.wheel(f32::INFINITY);
    assert_eq!(f.target(), 0.0);
    assert_eq!(f.velocity(), 0.0);
}

#[test]
fn tuning_is_validated() {
    let bad_friction = MomentumTuning {
        friction: 1.0,
        ..MomentumTuning::default()
    };
    assert!(matches!(
        MomentumFollower::new(bad_friction),
        Err(ConfigError::InvalidTuning { name: "friction", .. })
    ));

    let bad_smoothing = MomentumTuning {
        smoothing: 0.0,
        ..MomentumTuning::default()
    };
    assert!(matches!(
        MomentumFollower::new(bad_smoothing),
        Err(ConfigError::InvalidTuning { name: "smoothing", .. })
    ));
}
