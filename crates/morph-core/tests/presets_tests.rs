// Host-side tests for the ready-made scroll scenes.

use morph_core::constants::{SOUND_PHASE_END, TUNNEL_PHASE_END};
use morph_core::*;

const PRESETS: [Preset; 3] = [Preset::SoundToVinyl, Preset::WaveToVinyl, Preset::SpinningDisc];

fn frame_at(progress: f32, hovered: bool) -> FrameInput {
    FrameInput {
        progress: Some(progress),
        dt: 1.0 / 60.0,
        elapsed: progress * 10.0,
        hovered,
    }
}

#[test]
fn names_resolve_to_presets() {
    assert_eq!(Preset::from_name("sound"), Some(Preset::SoundToVinyl));
    assert_eq!(Preset::from_name("morph"), Some(Preset::SoundToVinyl));
    assert_eq!(Preset::from_name("wave"), Some(Preset::WaveToVinyl));
    assert_eq!(Preset::from_name("disc"), Some(Preset::SpinningDisc));
    assert_eq!(Preset::from_name("stack"), None);
}

#[test]
fn every_preset_builds_and_stays_finite() {
    for preset in PRESETS {
        let mut scene = preset.build(Some(600), 42).unwrap();
        assert_eq!(scene.animator.point_count(), 600);
        assert!(!scene.accent.is_empty());
        for step in 0..=100 {
            let state = scene.animator.frame(&frame_at(step as f32 / 100.0, false));
            assert!(
                state.positions.iter().all(|v| v.is_finite()),
                "{preset:?} at step {step}"
            );
            assert!(state.camera.eye.is_finite());
            assert!(state.rotation.is_finite());
            assert!((0.0..=1.0).contains(&state.opacity));
            assert!((0.0..=1.0).contains(&state.accent_opacity));
        }
    }
}

#[test]
fn default_point_counts_are_used_without_an_override() {
    let scene = Preset::SpinningDisc.build(None, 1).unwrap();
    assert_eq!(
        scene.animator.point_count(),
        Preset::SpinningDisc.default_point_count()
    );
}

#[test]
fn sound_scene_runs_sphere_tunnel_vinyl() {
    let mut scene = Preset::SoundToVinyl.build(Some(300), 7).unwrap();
    let names: Vec<_> = scene
        .animator
        .phases()
        .phases()
        .iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["sound", "tunnel", "vinyl"]);
    assert_eq!(scene.travel, Travel::Viewports(3.0));

    // The label only shows once the record has formed
    assert_eq!(scene.animator.frame(&frame_at(0.5, false)).accent_opacity, 0.0);
    let end = scene.animator.frame(&frame_at(1.0, false));
    assert_eq!(end.phase, 2);
    assert!(end.accent_opacity > 0.0);
    assert!(end.accent_scale > 0.0);
}

#[test]
fn wave_scene_uses_a_wider_lens() {
    let scene = Preset::WaveToVinyl.build(Some(300), 7).unwrap();
    assert_eq!(scene.lens.fovy_degrees, 50.0);
    assert!(scene.pins.is_empty());
}

#[test]
fn hovering_the_disc_slows_its_spin() {
    let mut idle = Preset::SpinningDisc.build(Some(300), 3).unwrap();
    let mut hovered = Preset::SpinningDisc.build(Some(300), 3).unwrap();
    assert_eq!(idle.pins.len(), DEFAULT_TRACK_PINS.len());
    for _ in 0..200 {
        idle.animator.frame(&frame_at(0.5, false));
        hovered.animator.frame(&frame_at(0.5, true));
    }
    let idle_speed = idle.animator.spin().speed().y;
    let hover_speed = hovered.animator.spin().speed().y;
    assert!(hover_speed < idle_speed);
    assert!(hover_speed < 0.15, "hover should brake below the start speed");
}

#[test]
fn pins_sit_on_the_disc() {
    for pin in DEFAULT_TRACK_PINS {
        let p = pin.position(1.8);
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!((r - pin.radius * 1.8).abs() < 1e-4);
        assert_eq!(p.y, PIN_LIFT);
    }
}

fn max_deviation(state: &FrameState, want: impl Fn(usize) -> glam::Vec3) -> f32 {
    (0..state.point_count())
        .map(|i| (state.position(i).unwrap() - want(i)).length())
        .fold(0.0_f32, f32::max)
}

#[test]
fn sound_scene_starts_exactly_on_the_sphere() {
    let mut scene = Preset::SoundToVinyl.build(Some(1200), 42).unwrap();
    let sphere = scene.animator.keyframes().by_name("sphere").unwrap().clone();
    let state = scene.animator.frame(&FrameInput {
        progress: Some(0.0),
        dt: 1.0 / 60.0,
        elapsed: 0.0,
        hovered: false,
    });
    let worst = max_deviation(state, |i| sphere.get(i).unwrap());
    assert!(worst < 1e-5, "deviation {worst} from the sphere");
}

#[test]
fn sound_scene_is_an_even_blend_halfway_through_the_first_phase() {
    // 0.2 / 0.4 = 0.5 and smoothstep(0.5) = 0.5
    let mut scene = Preset::SoundToVinyl.build(Some(1200), 42).unwrap();
    let sphere = scene.animator.keyframes().by_name("sphere").unwrap().clone();
    let spiral = scene.animator.keyframes().by_name("spiral").unwrap().clone();
    let state = scene.animator.frame(&frame_at(0.2, false));
    let worst = max_deviation(state, |i| {
        (sphere.get(i).unwrap() + spiral.get(i).unwrap()) * 0.5
    });
    assert!(worst < 1e-4, "deviation {worst} from the even blend");
}

#[test]
fn every_preset_starts_on_its_first_keyframe() {
    for preset in PRESETS {
        let mut scene = preset.build(Some(600), 9).unwrap();
        let first = scene.animator.keyframes().get(0).unwrap().clone();
        let state = scene.animator.frame(&frame_at(0.0, false));
        let worst = max_deviation(state, |i| first.get(i).unwrap());
        assert!(worst < 1e-5, "{preset:?} deviates by {worst}");
    }
}

#[test]
fn sound_camera_and_tilt_are_continuous_at_phase_boundaries() {
    let mut scene = Preset::SoundToVinyl.build(Some(300), 5).unwrap();
    // dt 0 keeps the spin still so rotation reflects the tilt alone
    let at = |progress: f32| FrameInput {
        progress: Some(progress),
        dt: 0.0,
        elapsed: 2.5,
        hovered: false,
    };
    for boundary in [SOUND_PHASE_END, TUNNEL_PHASE_END] {
        let before = scene.animator.frame(&at(boundary - 1e-5)).clone();
        let after = scene.animator.frame(&at(boundary)).clone();
        assert_ne!(before.phase, after.phase);
        let eye_jump = (before.camera.eye - after.camera.eye).length();
        let look_jump = (before.camera.target - after.camera.target).length();
        let tilt_jump = (before.rotation - after.rotation).length();
        assert!(eye_jump < 1e-3, "eye jumps {eye_jump} at {boundary}");
        assert!(look_jump < 1e-3, "look-at jumps {look_jump} at {boundary}");
        assert!(tilt_jump < 1e-3, "tilt jumps {tilt_jump} at {boundary}");
    }
}

#[test]
fn sound_points_are_continuous_through_the_swaying_tunnel() {
    let mut scene = Preset::SoundToVinyl.build(Some(300), 5).unwrap();
    for boundary in [SOUND_PHASE_END, TUNNEL_PHASE_END] {
        let before = scene.animator.frame(&frame_at(boundary - 1e-5, false)).positions.clone();
        let after = scene.animator.frame(&frame_at(boundary, false)).positions.clone();
        let worst = before
            .iter()
            .zip(&after)
            .map(|(x, y)| (x - y).abs())
            .fold(0.0_f32, f32::max);
        assert!(worst < 1e-2, "points jump {worst} at {boundary}");
    }
}
