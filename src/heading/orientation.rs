//! Rotation-vector to compass azimuth conversion.
//!
//! The rotation vector is the `x, y, z` part of a unit quaternion describing
//! the device frame relative to the east-north-up world frame, optionally
//! followed by the scalar part `w`.

/// Row-major 3x3 rotation matrix
pub type RotationMatrix = [f64; 9];

/// Convert a rotation vector into a rotation matrix
///
/// Returns `None` when fewer than three components are supplied. When the
/// scalar part is missing it is recovered from the unit-norm constraint.
pub fn rotation_matrix_from_vector(values: &[f32]) -> Option<RotationMatrix> {
    if values.len() < 3 {
        return None;
    }

    let q1 = values[0] as f64;
    let q2 = values[1] as f64;
    let q3 = values[2] as f64;
    let q0 = match values.get(3) {
        Some(&w) => w as f64,
        None => {
            let w2 = 1.0 - q1 * q1 - q2 * q2 - q3 * q3;
            if w2 > 0.0 { w2.sqrt() } else { 0.0 }
        }
    };

    let sq_q1 = 2.0 * q1 * q1;
    let sq_q2 = 2.0 * q2 * q2;
    let sq_q3 = 2.0 * q3 * q3;
    let q1_q2 = 2.0 * q1 * q2;
    let q3_q0 = 2.0 * q3 * q0;
    let q1_q3 = 2.0 * q1 * q3;
    let q2_q0 = 2.0 * q2 * q0;
    let q2_q3 = 2.0 * q2 * q3;
    let q1_q0 = 2.0 * q1 * q0;

    Some([
        1.0 - sq_q2 - sq_q3,
        q1_q2 - q3_q0,
        q1_q3 + q2_q0,
        q1_q2 + q3_q0,
        1.0 - sq_q1 - sq_q3,
        q2_q3 - q1_q0,
        q1_q3 - q2_q0,
        q2_q3 + q1_q0,
        1.0 - sq_q1 - sq_q2,
    ])
}

/// Extract `[azimuth, pitch, roll]` in radians from a rotation matrix
pub fn orientation_from_matrix(r: &RotationMatrix) -> [f64; 3] {
    [
        r[1].atan2(r[4]),
        (-r[7]).clamp(-1.0, 1.0).asin(),
        (-r[6]).atan2(r[8]),
    ]
}

/// Heading in degrees reported for an orientation, in `[0, 360)`
///
/// The raw azimuth is wrapped to `[0, 360)`, the roll angle is subtracted
/// and the result is wrapped again. Both wraps are load-bearing: the
/// intermediate difference can be negative.
pub fn corrected_azimuth_degrees(orientation: &[f64; 3]) -> f64 {
    let azimuth = (orientation[0].to_degrees() + 360.0) % 360.0;
    ((azimuth - orientation[2].to_degrees()) + 360.0) % 360.0
}

/// Rotation vector (`x, y, z, w`) of a level device whose azimuth is `azimuth_degrees`
pub fn rotation_vector_for_azimuth(azimuth_degrees: f64) -> [f32; 4] {
    let half = azimuth_degrees.to_radians() / 2.0;
    [0.0, 0.0, (-half.sin()) as f32, half.cos() as f32]
}
