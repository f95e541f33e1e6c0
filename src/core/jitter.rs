//! Idle jitter: a small looping wobble on every shape while the workspace
//! is still disorganized. Independent of the proximity simulation.

use crate::shapes::{Point, Shape};

const JITTER_X: [f32; 7] = [0.0, 0.8, -0.5, 0.3, -0.8, 0.5, 0.0];
const JITTER_Y: [f32; 7] = [0.0, -0.6, 0.7, -0.4, 0.6, -0.7, 0.0];

/// Seconds for one loop at jitter speed 1.
pub const BASE_CYCLE_S: f32 = 2.5;

pub fn cycle_duration(shape: &Shape) -> f32 {
    if shape.jitter_speed > 0.0 {
        BASE_CYCLE_S / shape.jitter_speed
    } else {
        f32::INFINITY
    }
}

/// CSS `ease-in-out`, i.e. `cubic-bezier(0.42, 0, 0.58, 1)`.
fn ease_in_out(x: f32) -> f32 {
    cubic_bezier(0.42, 0.0, 0.58, 1.0, x)
}

/// One axis of a unit cubic bezier with control values `a1`, `a2`.
fn bezier_axis(a1: f32, a2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
}

fn bezier_slope(a1: f32, a2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
}

/// Evaluate a CSS timing curve: solve x(t) = `x` for t, return y(t).
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton first, bisection if it stalls.
    let mut t = x;
    for _ in 0..8 {
        let err = bezier_axis(x1, x2, t) - x;
        if err.abs() < 1e-6 {
            return bezier_axis(y1, y2, t);
        }
        let d = bezier_slope(x1, x2, t);
        if d.abs() < 1e-6 {
            break;
        }
        t = (t - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = x;
    for _ in 0..32 {
        if bezier_axis(x1, x2, t) < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    bezier_axis(y1, y2, t)
}

fn sample(keys: &[f32; 7], phase: f32) -> f32 {
    let segments = (keys.len() - 1) as f32;
    let pos = phase * segments;
    let i = (pos.floor() as usize).min(keys.len() - 2);
    let local = ease_in_out((pos - i as f32).clamp(0.0, 1.0));
    keys[i] + (keys[i + 1] - keys[i]) * local
}

/// Pixel offset at `elapsed_s` seconds. Zero once the workspace is complete.
pub fn jitter_offset(shape: &Shape, elapsed_s: f32, complete: bool) -> Point {
    let duration = cycle_duration(shape);
    if complete || !duration.is_finite() || !elapsed_s.is_finite() {
        return Point::default();
    }
    let phase = (elapsed_s / duration).rem_euclid(1.0);
    Point::new(sample(&JITTER_X, phase), sample(&JITTER_Y, phase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::SHAPES;

    #[test]
    fn faster_shapes_loop_sooner() {
        let slow = &SHAPES[1]; // 0.9
        let fast = &SHAPES[14]; // 2.0
        assert!(cycle_duration(fast) < cycle_duration(slow));
        assert!((cycle_duration(fast) - 1.25).abs() < 1e-6);
    }

    #[test]
    fn hits_keyframes_and_loops() {
        let s = &SHAPES[14];
        let d = cycle_duration(s);
        assert_eq!(jitter_offset(s, 0.0, false), Point::new(0.0, 0.0));

        let first = jitter_offset(s, d / 6.0, false);
        assert!((first.x - 0.8).abs() < 1e-4 && (first.y + 0.6).abs() < 1e-4);

        let a = jitter_offset(s, 0.3, false);
        let b = jitter_offset(s, 0.3 + d, false);
        assert!((a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4);
    }

    #[test]
    fn stays_within_keyframe_bounds() {
        let s = &SHAPES[3];
        for k in 0..500 {
            let p = jitter_offset(s, k as f32 * 0.013, false);
            assert!(p.x.abs() <= 0.8 + 1e-6 && p.y.abs() <= 0.7 + 1e-6);
        }
    }

    #[test]
    fn easing_matches_css_ease_in_out() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-4);
        // Slow start, symmetric finish.
        assert!(ease_in_out(0.1) < 0.1);
        for k in 1..20 {
            let x = k as f32 / 20.0;
            assert!((ease_in_out(x) + ease_in_out(1.0 - x) - 1.0).abs() < 1e-4);
            assert!(ease_in_out(x) >= ease_in_out(x - 0.05));
        }
        // Softer than a cubic polynomial near the ends.
        assert!(ease_in_out(0.2) > 4.0 * 0.2 * 0.2 * 0.2);
    }

    #[test]
    fn stops_when_complete() {
        let s = &SHAPES[0];
        assert_eq!(jitter_offset(s, 0.7, true), Point::default());
    }
}
