//! Small numeric helpers shared by the noise and terrain code.

/// Floors a double to an `i32`, matching the legacy `MathHelper.floor`.
#[inline]
#[must_use]
pub fn floor(value: f64) -> i32 {
    let truncated = value as i32;
    if value < f64::from(truncated) {
        truncated - 1
    } else {
        truncated
    }
}

/// Floors a double to an `i64`.
#[inline]
#[must_use]
pub fn lfloor(value: f64) -> i64 {
    let truncated = value as i64;
    if value < truncated as f64 {
        truncated - 1
    } else {
        truncated
    }
}

/// Linear interpolation: `start + delta * (end - start)`.
#[inline]
#[must_use]
pub fn lerp(delta: f64, start: f64, end: f64) -> f64 {
    start + delta * (end - start)
}

/// Bilinear interpolation over the four corners of a unit square.
#[inline]
#[must_use]
pub fn lerp2(dx: f64, dy: f64, x0y0: f64, x1y0: f64, x0y1: f64, x1y1: f64) -> f64 {
    lerp(dy, lerp(dx, x0y0, x1y0), lerp(dx, x0y1, x1y1))
}

/// Trilinear interpolation over the eight corners of a unit cube.
///
/// Corner naming follows `x?y?z?`, the argument order is x-fastest.
#[inline]
#[must_use]
#[expect(clippy::too_many_arguments, reason = "one argument per cube corner")]
pub fn lerp3(
    dx: f64,
    dy: f64,
    dz: f64,
    x0y0z0: f64,
    x1y0z0: f64,
    x0y1z0: f64,
    x1y1z0: f64,
    x0y0z1: f64,
    x1y0z1: f64,
    x0y1z1: f64,
    x1y1z1: f64,
) -> f64 {
    lerp(
        dz,
        lerp2(dx, dy, x0y0z0, x1y0z0, x0y1z0, x1y1z0),
        lerp2(dx, dy, x0y0z1, x1y0z1, x0y1z1, x1y1z1),
    )
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3` used by improved noise.
#[inline]
#[must_use]
pub fn smoothstep(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_rounds_towards_negative_infinity() {
        assert_eq!(floor(1.5), 1);
        assert_eq!(floor(-1.5), -2);
        assert_eq!(floor(-2.0), -2);
        assert_eq!(lfloor(-0.25), -1);
    }

    #[test]
    fn lerp3_hits_corners() {
        let corners = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let at = |dx, dy, dz| {
            lerp3(
                dx, dy, dz, corners[0], corners[1], corners[2], corners[3], corners[4],
                corners[5], corners[6], corners[7],
            )
        };
        assert!((at(0.0, 0.0, 0.0) - 1.0).abs() < 1e-12);
        assert!((at(1.0, 0.0, 0.0) - 2.0).abs() < 1e-12);
        assert!((at(0.0, 1.0, 0.0) - 3.0).abs() < 1e-12);
        assert!((at(1.0, 1.0, 1.0) - 8.0).abs() < 1e-12);
        assert!((at(0.5, 0.5, 0.5) - 4.5).abs() < 1e-12);
    }

    #[test]
    fn smoothstep_endpoints() {
        assert!(smoothstep(0.0).abs() < 1e-12);
        assert!((smoothstep(1.0) - 1.0).abs() < 1e-12);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-12);
    }
}
