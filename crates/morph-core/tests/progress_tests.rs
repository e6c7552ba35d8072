// Host-side tests for scroll progress, ray picking and the camera.

use glam::Vec3;
use morph_core::*;

#[test]
fn progress_is_clamped_to_unit_range() {
    assert_eq!(scroll_progress(-40.0, 100.0), Some(0.0));
    assert_eq!(scroll_progress(50.0, 100.0), Some(0.5));
    assert_eq!(scroll_progress(500.0, 100.0), Some(1.0));
}

#[test]
fn non_finite_inputs_give_no_progress() {
    assert_eq!(scroll_progress(f32::NAN, 100.0), None);
    assert_eq!(scroll_progress(10.0, f32::INFINITY), None);
}

#[test]
fn zero_travel_does_not_divide_by_zero() {
    assert_eq!(scroll_progress(0.0, 0.0), Some(0.0));
    assert_eq!(scroll_progress(1.0, 0.0), Some(1.0));
    assert_eq!(scroll_progress(1.0, -5.0), Some(1.0));
}

#[test]
fn travel_resolves_against_viewport_or_section() {
    let sample = ScrollSample {
        scrolled_px: 900.0,
        viewport_height: 600.0,
        section_height: 2400.0,
    };
    assert_eq!(Travel::Viewports(3.0).distance_px(600.0, 2400.0), 1800.0);
    assert_eq!(sample.progress(Travel::Viewports(3.0)), Some(0.5));
    assert_eq!(sample.progress(Travel::SectionFraction(0.5)), Some(0.75));
    assert_eq!(sample.progress(Travel::Pixels(300.0)), Some(1.0));
}

#[test]
fn ray_hits_sphere_in_front_only() {
    let origin = Vec3::new(0.0, 0.0, 5.0);
    let dir = Vec3::NEG_Z;
    let t = ray_sphere(origin, dir, Vec3::ZERO, 1.0).unwrap();
    assert!((t - 4.0).abs() < 1e-5);
    assert_eq!(ray_sphere(origin, dir, Vec3::new(5.0, 0.0, 0.0), 1.0), None);
    assert_eq!(ray_sphere(origin, dir, Vec3::new(0.0, 0.0, 10.0), 1.0), None);
}

#[test]
fn pick_nearest_prefers_the_closest_hit() {
    let origin = Vec3::new(0.0, 0.0, 5.0);
    let centers = [
        Vec3::new(0.0, 0.0, -3.0),
        Vec3::ZERO,
        Vec3::new(5.0, 0.0, 0.0),
    ];
    assert_eq!(pick_nearest(origin, Vec3::NEG_Z, centers, 0.5), Some(1));
    assert_eq!(pick_nearest(origin, Vec3::X, centers, 0.5), None);
    assert_eq!(pick_nearest(origin, Vec3::NEG_Z, Vec::new(), 0.5), None);
}

#[test]
fn screen_ray_through_a_projected_point_hits_it() {
    let cam = Camera::new(CameraPose::default(), Lens::default(), 1.5);
    let (w, h) = (900.0, 600.0);

    let (origin, dir) = cam.screen_ray(w * 0.5, h * 0.5, w, h);
    assert_eq!(origin, cam.eye);
    assert!((dir - Vec3::NEG_Z).length() < 1e-4);

    let target = Vec3::new(0.7, -0.4, 0.5);
    let ndc = cam.view_projection().project_point3(target);
    let sx = (ndc.x + 1.0) * 0.5 * w;
    let sy = (1.0 - ndc.y) * 0.5 * h;
    let (origin, dir) = cam.screen_ray(sx, sy, w, h);
    assert!(ray_sphere(origin, dir, target, 0.01).is_some());
}

#[test]
fn degenerate_aspect_falls_back_to_square() {
    let cam = Camera::new(CameraPose::default(), Lens::default(), 0.0);
    assert_eq!(cam.aspect, 1.0);
}

#[test]
fn model_and_accent_matrices_compose() {
    let mut state = FrameState::new(1);
    state.scale = 2.0;
    state.offset = Vec3::new(0.0, 1.0, 0.0);
    state.accent_scale = 0.5;
    let p = state.model_matrix().transform_point3(Vec3::X);
    assert!((p - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-5);
    let q = state.accent_matrix().transform_point3(Vec3::X);
    assert!((q - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
}
