//! Launch Angle and Time of Flight
//!
//! Numeric core shared by the profile and the angle solver. Works in the
//! line-of-sight frame: the projectile leaves along the sight line tilted
//! up by the launch offset, and gravity pulls it back onto the line.
//!
//! Unreachable inputs produce NaN rather than an error; callers map that
//! to an absent arc.

/// Gravity-compensating pitch offset for a straight-line `distance`.
///
/// `asin(-gravity · distance / (2 · speed²))`. NaN when the target is beyond
/// range, which includes any non-zero distance at zero speed.
pub fn launch_offset(speed: f64, gravity: f64, distance: f64) -> f64 {
    if distance == 0.0 {
        return 0.0;
    }
    if speed == 0.0 {
        return f64::NAN;
    }

    let arg = -gravity * distance / (2.0 * speed * speed);
    if !(-1.0..=1.0).contains(&arg) {
        return f64::NAN;
    }
    arg.asin()
}

/// Ticks until the projectile closes back onto the sight line.
///
/// Zero gravity is linear travel. Otherwise the closure quadratic
/// `½·g·t² + v·sin(offset)·t = 0` is solved and the first positive arrival
/// taken; the trivial `t = 0` root is never an arrival. A projectile with
/// no speed never arrives anywhere but where it starts.
pub fn flight_time(speed: f64, gravity: f64, offset: f64, distance: f64) -> f64 {
    if distance == 0.0 {
        return 0.0;
    }
    if speed == 0.0 {
        return f64::NAN;
    }
    if gravity == 0.0 {
        return distance / speed;
    }
    if !offset.is_finite() {
        return f64::NAN;
    }

    let roots = solve_quadratic(0.5 * gravity, speed * offset.sin(), 0.0);
    first_arrival(&roots).unwrap_or(f64::NAN)
}

/// Largest straight-line distance reachable at `speed` under `gravity`.
///
/// Where the launch-offset argument reaches 1. Infinite without gravity.
pub fn max_range(speed: f64, gravity: f64) -> f64 {
    if gravity == 0.0 {
        return f64::INFINITY;
    }
    2.0 * speed * speed / gravity.abs()
}

/// Real roots of `a·t² + b·t + c = 0`.
///
/// Degenerates to the linear root when `a == 0`. Uses the cancellation-free
/// form of the quadratic formula.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> [Option<f64>; 2] {
    if a == 0.0 {
        if b == 0.0 {
            return [None, None];
        }
        return [Some(-c / b), None];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || !discriminant.is_finite() {
        return [None, None];
    }

    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let r1 = q / a;
    let r2 = if q != 0.0 { c / q } else { r1 };
    [Some(r1), Some(r2)]
}

/// Smallest strictly positive, finite root.
pub fn first_arrival(roots: &[Option<f64>]) -> Option<f64> {
    roots
        .iter()
        .flatten()
        .copied()
        .filter(|t| t.is_finite() && *t > 0.0)
        .fold(None, |best: Option<f64>, t| match best {
            Some(b) if b <= t => Some(b),
            _ => Some(t),
        })
}
