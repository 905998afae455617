use nalgebra::Vector3;

// Arithmetic mean of two points. Addition is commutative in IEEE arithmetic, so swapping
// the arguments gives a bit-identical result.
pub fn midpoint(v1: &Vector3<f64>, v2: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(
        (v1.x + v2.x) / 2.,
        (v1.y + v2.y) / 2.,
        (v1.z + v2.z) / 2.,
    )
}

// Moves a point along its ray from the origin until it lies at distance `radius`.
// Returns None for the zero vector and for non-finite points, whose direction is undefined.
pub fn scale_to_radius(vec: &Vector3<f64>, radius: f64) -> Option<Vector3<f64>> {
    if *vec == Vector3::zeros() || !vec.iter().all(|x| x.is_finite()) {
        return None;
    }
    // Dividing by the largest component first keeps the squared norm away from overflow and
    // underflow, so huge and subnormal coordinates still have a direction.
    let largest = vec.iter().fold(0f64, |m, x| m.max(x.abs()));
    let unit = vec / largest;
    Some(unit * (radius / unit.magnitude()))
}

// Rescales every vector in place. Vectors without a direction are left as they are, so callers
// must rule them out first.
pub fn scale_all_to_radius(mut slice: impl AsMut<[Vector3<f64>]>, radius: f64) {
    for x in slice.as_mut().iter_mut() {
        if let Some(scaled) = scale_to_radius(x, radius) {
            *x = scaled;
        }
    }
}
