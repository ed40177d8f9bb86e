//! Distance-to-center color ramp
//!
//! red (center) -> yellow -> cyan -> blue-violet (wall)

use glam::Vec3;

// Segments meet with a 0.01 step on the rising channel at each break
const FIRST_BREAK: f32 = 0.33;
const SECOND_BREAK: f32 = 0.66;

/// Color for a normalized distance `t = distance / boundary_radius`.
///
/// `t` is clamped to [0, 1] and so is every output channel.
pub fn distance_color(t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);

    let (r, g, b) = if t < FIRST_BREAK {
        // Red to yellow
        (1.0, t * 3.0, 0.0)
    } else if t < SECOND_BREAK {
        // Yellow to cyan
        let u = (t - FIRST_BREAK) * 3.0;
        (1.0 - u, 1.0, u)
    } else {
        // Cyan to blue-violet
        let u = (t - SECOND_BREAK) * 3.0;
        (u, 1.0 - u, 1.0)
    };

    Vec3::new(r, g, b).clamp(Vec3::ZERO, Vec3::ONE)
}

/// Recolor from a distance, keeping `previous` if the input is not finite
pub fn recolor(previous: Vec3, distance: f32, boundary_radius: f32) -> Vec3 {
    let t = distance / boundary_radius;
    if t.is_finite() {
        distance_color(t)
    } else {
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn test_center_is_red() {
        assert_eq!(distance_color(0.0), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_wall_is_blue_violet() {
        let c = distance_color(1.0);
        assert!(close(c, Vec3::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(distance_color(1.3), distance_color(1.0));
        assert_eq!(distance_color(-0.2), distance_color(0.0));
    }

    #[test]
    fn test_breaks_step_by_a_hundredth() {
        // Red to yellow tops out at 0.99 green; yellow to cyan starts at full green
        let below = distance_color(FIRST_BREAK - 1e-6);
        let at = distance_color(FIRST_BREAK);
        assert!(close(below, Vec3::new(1.0, 0.99, 0.0)));
        assert!(close(at, Vec3::new(1.0, 1.0, 0.0)));

        // Yellow to cyan ends at (0.01, 1, 0.99); the last segment starts at cyan
        let below = distance_color(SECOND_BREAK - 1e-6);
        let at = distance_color(SECOND_BREAK);
        assert!(close(below, Vec3::new(0.01, 1.0, 0.99)));
        assert!(close(at, Vec3::new(0.0, 1.0, 1.0)));
        assert!((below - at).abs().max_element() < 0.0101);
    }

    #[test]
    fn test_mid_segment_values() {
        assert!(close(distance_color(0.1), Vec3::new(1.0, 0.3, 0.0)));
        assert!(close(distance_color(0.5), Vec3::new(0.49, 1.0, 0.51)));
        assert!(close(distance_color(0.8), Vec3::new(0.42, 0.58, 1.0)));
    }

    #[test]
    fn test_recolor_keeps_previous_on_nan() {
        let prev = Vec3::new(0.2, 0.3, 0.4);
        assert_eq!(recolor(prev, f32::NAN, 0.9), prev);
        assert_eq!(recolor(prev, 0.0, 0.9), Vec3::new(1.0, 0.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_channels_in_unit_range(t in -2.0f32..3.0) {
            let c = distance_color(t);
            prop_assert!(c.min_element() >= 0.0);
            prop_assert!(c.max_element() <= 1.0);
        }

        #[test]
        fn prop_small_steps_small_changes(t in 0.0f32..0.999) {
            let a = distance_color(t);
            let b = distance_color(t + 0.001);
            // 0.003 of slope plus at most the 0.01 step at a break
            prop_assert!((a - b).abs().max_element() < 0.0135);
        }
    }
}
