use glam::Vec3;

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Index of the closest sphere hit by the ray, if any.
pub fn pick_nearest(
    ray_origin: Vec3,
    ray_dir: Vec3,
    centers: impl IntoIterator<Item = Vec3>,
    radius: f32,
) -> Option<usize> {
    let mut best = None::<(usize, f32)>;
    for (i, center) in centers.into_iter().enumerate() {
        if let Some(t) = ray_sphere(ray_origin, ray_dir, center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}
