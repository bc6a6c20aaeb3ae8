//! Easing curves for clip interpolation
//!
//! Every curve maps normalized clip time `t ∈ [0, 1]` to an interpolation factor,
//! with `apply(0) == 0` and `apply(1) == 1`.

/// Interpolation curve applied to a clip's normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Cubic ease-in
    Power2In,
    /// Cubic ease-out, fast start and soft landing
    Power2Out,
    /// Cubic ease-in-out
    Power2InOut,
    /// Ball dropping onto a hard floor, settling in three bounces
    BounceOut,
}

impl Easing {
    /// Evaluates the curve; `t` is clamped to `[0, 1]`
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power2In => t * t * t,
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::BounceOut => bounce_out(t),
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Power2In,
        Easing::Power2Out,
        Easing::Power2InOut,
        Easing::BounceOut,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert_relative_eq!(easing.apply(0.0), 0.0, epsilon = 1e-6);
            assert_relative_eq!(easing.apply(1.0), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_out_curves_lead_linear() {
        assert!(Easing::Power2Out.apply(0.25) > 0.25);
        assert!(Easing::Power2In.apply(0.25) < 0.25);
        assert_relative_eq!(Easing::Power2InOut.apply(0.5), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_bounce_touches_floor_between_bounces() {
        // First contact with the floor happens at t = 1 / 2.75
        assert_relative_eq!(Easing::BounceOut.apply(1.0 / 2.75), 1.0, epsilon = 1e-5);
        // Mid-bounce the value lifts off again
        assert!(Easing::BounceOut.apply(1.5 / 2.75) < 1.0);
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::Power2Out.apply(-3.0), 0.0);
        assert_relative_eq!(Easing::BounceOut.apply(7.0), 1.0, epsilon = 1e-5);
    }
}
