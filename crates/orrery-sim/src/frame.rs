//! Perifocal to world-frame rotation

use nalgebra::{Matrix3, Vector3};

/// Rotation matrix from the perifocal (orbital-plane) frame to the world
/// frame: R_z(Ω) · R_x(i) · R_z(ω), the standard classical-elements
/// convention. No singular configurations for the supported input ranges.
pub fn perifocal_to_world(inclination: f64, raan: f64, arg_periapsis: f64) -> Matrix3<f64> {
    let cos_o = raan.cos();
    let sin_o = raan.sin();
    let cos_i = inclination.cos();
    let sin_i = inclination.sin();
    let cos_w = arg_periapsis.cos();
    let sin_w = arg_periapsis.sin();

    Matrix3::new(
        cos_o * cos_w - sin_o * sin_w * cos_i,
        -cos_o * sin_w - sin_o * cos_w * cos_i,
        sin_o * sin_i,

        sin_o * cos_w + cos_o * sin_w * cos_i,
        -sin_o * sin_w + cos_o * cos_w * cos_i,
        -cos_o * sin_i,

        sin_w * sin_i,
        cos_w * sin_i,
        cos_i,
    )
}

/// Rotate an orbital-plane position (x toward periapsis) into the world frame
pub fn to_world(x: f64, y: f64, inclination: f64, raan: f64, arg_periapsis: f64) -> Vector3<f64> {
    perifocal_to_world(inclination, raan, arg_periapsis) * Vector3::new(x, y, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_vec_eq(v: Vector3<f64>, expected: (f64, f64, f64)) {
        assert!((v.x - expected.0).abs() < 1e-12, "x: {} vs {}", v.x, expected.0);
        assert!((v.y - expected.1).abs() < 1e-12, "y: {} vs {}", v.y, expected.1);
        assert!((v.z - expected.2).abs() < 1e-12, "z: {} vs {}", v.z, expected.2);
    }

    #[test]
    fn test_identity_when_all_angles_zero() {
        assert_vec_eq(to_world(1.0, 0.0, 0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        assert_vec_eq(to_world(0.0, 1.0, 0.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    }

    #[test]
    fn test_arg_periapsis_rotates_in_plane() {
        // ω = 90°: periapsis direction moves from +x to +y
        assert_vec_eq(to_world(1.0, 0.0, 0.0, 0.0, FRAC_PI_2), (0.0, 1.0, 0.0));
    }

    #[test]
    fn test_raan_rotates_about_z() {
        // Ω = 90° with everything else zero also takes +x to +y
        assert_vec_eq(to_world(1.0, 0.0, 0.0, FRAC_PI_2, 0.0), (0.0, 1.0, 0.0));
    }

    #[test]
    fn test_inclination_tilts_out_of_plane() {
        // i = 90°: the in-plane +y direction becomes +z, the node line stays put
        assert_vec_eq(to_world(1.0, 0.0, FRAC_PI_2, 0.0, 0.0), (1.0, 0.0, 0.0));
        assert_vec_eq(to_world(0.0, 1.0, FRAC_PI_2, 0.0, 0.0), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let r = perifocal_to_world(0.7, 1.9, -0.4);
        let should_be_identity = r * r.transpose();
        for row in 0..3 {
            for col in 0..3 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert!((should_be_identity[(row, col)] - expected).abs() < 1e-12);
            }
        }
        assert!((r.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_preserved() {
        let v = to_world(0.3, -1.2, 1.1, 2.7, PI / 3.0);
        let len = (0.3f64 * 0.3 + 1.2 * 1.2).sqrt();
        assert!((v.norm() - len).abs() < 1e-12);
    }
}
