// Host-side tests for the scroll-phase animator: blending, phase boundaries,
// held frames and the spin accumulator.

use glam::Vec3;
use morph_core::*;

const EPS: f32 = 1e-4;
const N: usize = 1200;

fn frame_at(progress: f32) -> FrameInput {
    FrameInput {
        progress: Some(progress),
        dt: 1.0 / 60.0,
        elapsed: 0.0,
        hovered: false,
    }
}

fn three_keyframes() -> KeyframeSet {
    KeyframeSet::new()
        .with("a", generate(&Layout::Sphere(SphereParams::default()), N, 1))
        .unwrap()
        .with("b", generate(&Layout::Spiral(SpiralParams::default()), N, 2))
        .unwrap()
        .with("c", generate(&Layout::Disc(DiscParams::default()), N, 3))
        .unwrap()
}

/// sphere -> tunnel -> disc without oscillation, so positions are a pure
/// function of progress.
fn plain_animator() -> Animator {
    let phases = PhaseTable::new([
        Phase::new("blob", 0.0, 0.4, Blend::Morph { from: "a", to: "b" }),
        Phase::new("tunnel", 0.4, 0.85, Blend::Hold("b")),
        Phase::new("disc", 0.85, 1.0, Blend::Morph { from: "b", to: "c" }),
    ])
    .unwrap();
    Animator::new(three_keyframes(), phases, AnimatorTuning::default()).unwrap()
}

fn assert_matches_cloud(state: &FrameState, cloud: &PointCloud) {
    for i in 0..cloud.len() {
        let got = state.position(i).unwrap();
        let want = cloud.get(i).unwrap();
        assert!(
            (got - want).length() < EPS,
            "point {i}: got {got}, want {want}"
        );
    }
}

#[test]
fn progress_zero_is_first_keyframe_and_one_is_last() {
    let mut anim = plain_animator();
    let a = anim.keyframes().by_name("a").unwrap().clone();
    let c = anim.keyframes().by_name("c").unwrap().clone();

    let state = anim.frame(&frame_at(0.0));
    assert_matches_cloud(state, &a);

    let state = anim.frame(&frame_at(1.0));
    assert_eq!(state.phase, 2);
    assert_matches_cloud(state, &c);
}

#[test]
fn quarter_of_first_phase_blends_to_the_midpoint() {
    // progress 0.2 in [0, 0.4) -> local 0.5 -> smoothstep 0.5
    let mut anim = plain_animator();
    let a = anim.keyframes().by_name("a").unwrap().clone();
    let b = anim.keyframes().by_name("b").unwrap().clone();
    let state = anim.frame(&frame_at(0.2));
    assert_eq!(state.point_count(), N);
    for i in 0..N {
        let want = (a.get(i).unwrap() + b.get(i).unwrap()) * 0.5;
        assert!((state.position(i).unwrap() - want).length() < EPS);
    }
}

#[test]
fn positions_stay_finite_across_the_whole_range() {
    let mut anim = plain_animator();
    for step in 0..=200 {
        let p = step as f32 / 200.0;
        let state = anim.frame(&frame_at(p));
        assert!(state.positions.iter().all(|v| v.is_finite()), "progress {p}");
        assert_eq!(state.positions.len(), 3 * N);
    }
}

#[test]
fn positions_are_continuous_at_phase_boundaries() {
    let mut anim = plain_animator();
    for boundary in [0.4_f32, 0.85] {
        let before = anim.frame(&frame_at(boundary - 1e-4)).positions.clone();
        let after = anim.frame(&frame_at(boundary)).positions.clone();
        let worst = before
            .iter()
            .zip(&after)
            .map(|(x, y)| (x - y).abs())
            .fold(0.0_f32, f32::max);
        assert!(worst < 1e-2, "jump of {worst} at {boundary}");
    }
}

#[test]
fn unavailable_progress_holds_the_last_frame() {
    let mut anim = plain_animator();
    let held = anim.frame(&frame_at(0.3)).clone();
    for missing in [None, Some(f32::NAN), Some(f32::INFINITY)] {
        let state = anim.frame(&FrameInput {
            progress: missing,
            dt: 0.5,
            elapsed: 10.0,
            hovered: true,
        });
        assert_eq!(state.positions, held.positions);
        assert_eq!(state.rotation, held.rotation);
        assert_eq!(state.progress, held.progress);
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    let mut anim = plain_animator();
    let below = anim.frame(&frame_at(-3.0)).positions.clone();
    let zero = anim.frame(&frame_at(0.0)).positions.clone();
    assert_eq!(below, zero);
    let above = anim.frame(&frame_at(4.0)).clone();
    assert_eq!(above.progress, 1.0);
    assert_eq!(above.phase, 2);
}

#[test]
fn frames_flag_their_buffers_dirty() {
    let mut anim = plain_animator();
    anim.frame(&frame_at(0.1));
    let state = anim.state_mut();
    assert!(state.take_dirty());
    assert!(!state.take_dirty());
    anim.frame(&FrameInput::default());
    assert!(!anim.state().is_dirty(), "held frame must not re-upload");
}

fn spin_up(_: &PhaseInput) -> Vec3 {
    Vec3::new(0.0, 0.0, 0.5)
}

#[test]
fn spin_angle_never_decreases_with_non_negative_speed() {
    let keyframes = KeyframeSet::new()
        .with("a", generate(&Layout::Disc(DiscParams::default()), 64, 0))
        .unwrap();
    let phases = PhaseTable::new([Phase::new("spin", 0.0, 1.0, Blend::Hold("a")).with_motion(
        Motion {
            spin: spin_up,
            ..Motion::default()
        },
    )])
    .unwrap();
    let mut anim = Animator::new(keyframes, phases, AnimatorTuning::default()).unwrap();
    let mut prev = anim.spin().angle().z;
    for step in 0..300 {
        // Scrub progress back and forth; spin must keep accumulating
        let p = ((step as f32) * 0.37).sin().abs();
        anim.frame(&frame_at(p));
        let z = anim.spin().angle().z;
        assert!(z >= prev, "angle went backwards at step {step}");
        prev = z;
    }
    assert!(prev > 0.0);
    // Speed approaches the target geometrically
    assert!(anim.spin().speed().z > 0.0 && anim.spin().speed().z <= 0.5);
}

#[test]
fn held_ripple_fades_in_and_settles_back_onto_the_keyframe() {
    let keyframes = KeyframeSet::new()
        .with("a", generate(&Layout::Sphere(SphereParams::default()), 400, 0))
        .unwrap();
    let phases = PhaseTable::new([Phase::new("blob", 0.0, 1.0, Blend::Hold("a"))
        .with_oscillation(Oscillation::SphereRipple {
            amplitude: 1.0,
            settle: 1.0,
        })])
    .unwrap();
    let mut anim = Animator::new(keyframes, phases, AnimatorTuning::default()).unwrap();
    let a = anim.keyframes().by_name("a").unwrap().clone();
    let at = |progress: f32| FrameInput {
        progress: Some(progress),
        dt: 0.016,
        elapsed: 3.7,
        hovered: false,
    };

    assert_matches_cloud(anim.frame(&at(0.0)), &a);

    let state = anim.frame(&at(0.5));
    let moved = (0..a.len())
        .map(|i| (state.position(i).unwrap() - a.get(i).unwrap()).length())
        .fold(0.0_f32, f32::max);
    assert!(moved > 1e-2, "ripple should displace the sphere mid-phase");

    assert_matches_cloud(anim.frame(&at(1.0)), &a);
}

#[test]
fn oscillation_is_only_allowed_on_held_phases() {
    let sway = Oscillation::VerticalSway {
        amplitude: 0.1,
        frequency: 3.0,
        spatial: 2.0,
        settle: 1.0,
    };
    let err = PhaseTable::new([
        Phase::new("blob", 0.0, 1.0, Blend::Morph { from: "a", to: "b" }).with_oscillation(sway)
    ])
    .unwrap_err();
    assert_eq!(err, ConfigError::OscillationOnMorph("blob".into()));

    // A held phase followed by another must come fully to rest
    let restless = Oscillation::SphereRipple {
        amplitude: 1.0,
        settle: 0.5,
    };
    let err = PhaseTable::new([
        Phase::new("hold", 0.0, 0.5, Blend::Hold("a")).with_oscillation(restless),
        Phase::new("morph", 0.5, 1.0, Blend::Morph { from: "a", to: "b" }),
    ]);
    assert!(matches!(err, Err(ConfigError::InvalidTuning { name: "settle", .. })));

    // The last phase may keep moving
    assert!(PhaseTable::new([
        Phase::new("morph", 0.0, 0.5, Blend::Morph { from: "a", to: "b" }),
        Phase::new("hold", 0.5, 1.0, Blend::Hold("b")).with_oscillation(restless),
    ])
    .is_ok());
}

#[test]
fn construction_rejects_bad_configuration() {
    let phases = || {
        PhaseTable::new([Phase::new("only", 0.0, 1.0, Blend::Morph { from: "a", to: "z" })])
            .unwrap()
    };
    let err = Animator::new(three_keyframes(), phases(), AnimatorTuning::default()).err();
    assert_eq!(
        err,
        Some(ConfigError::UnknownKeyframe {
            phase: "only".into(),
            keyframe: "z".into()
        })
    );

    let err = Animator::new(KeyframeSet::new(), phases(), AnimatorTuning::default()).err();
    assert_eq!(err, Some(ConfigError::NoKeyframes));

    let tuning = AnimatorTuning {
        spin_smoothing: 0.0,
        ..AnimatorTuning::default()
    };
    let ok_phases =
        PhaseTable::new([Phase::new("only", 0.0, 1.0, Blend::Hold("a"))]).unwrap();
    assert!(matches!(
        Animator::new(three_keyframes(), ok_phases, tuning),
        Err(ConfigError::InvalidTuning { name: "spin_smoothing", .. })
    ));
}

#[test]
fn transform_smoothing_chases_the_target() {
    fn grow(p: &PhaseInput) -> f32 {
        1.0 + p.progress
    }
    let keyframes = KeyframeSet::new()
        .with("a", generate(&Layout::Disc(DiscParams::default()), 64, 0))
        .unwrap();
    let phases = PhaseTable::new([Phase::new("spin", 0.0, 1.0, Blend::Hold("a")).with_motion(
        Motion {
            scale: grow,
            ..Motion::default()
        },
    )])
    .unwrap();
    let tuning = AnimatorTuning {
        transform_smoothing: Some(0.5),
        ..AnimatorTuning::default()
    };
    let mut anim = Animator::new(keyframes, phases, tuning).unwrap();
    // First frame snaps, later frames ease halfway each time
    assert!((anim.frame(&frame_at(0.0)).scale - 1.0).abs() < EPS);
    assert!((anim.frame(&frame_at(1.0)).scale - 1.5).abs() < EPS);
    assert!((anim.frame(&frame_at(1.0)).scale - 1.75).abs() < EPS);
}
