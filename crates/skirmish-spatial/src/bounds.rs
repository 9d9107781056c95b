//! Arena geometry helpers.

use glam::DVec3;

/// Point on a horizontal circle of `radius` around `center` at `angle`
/// (measured from +x toward +z). Keeps the center's height.
pub fn ring_point(center: DVec3, angle: f64, radius: f64) -> DVec3 {
    DVec3::new(
        center.x + angle.cos() * radius,
        center.y,
        center.z + angle.sin() * radius,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_point() {
        let center = DVec3::new(1.0, 2.0, 3.0);
        let p = ring_point(center, 0.0, 10.0);
        assert!((p - DVec3::new(11.0, 2.0, 3.0)).length() < 1e-12);
        let q = ring_point(center, std::f64::consts::FRAC_PI_2, 10.0);
        assert!((q - DVec3::new(1.0, 2.0, 13.0)).length() < 1e-9);
    }
}
