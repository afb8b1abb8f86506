//! Unit conversion for the unitless light strengths in the config.
//!
//! The config keeps the 0..2 style intensities the scene was tuned with, Bevy
//! wants photometric units. The factors put a strength of 1.0 near a clear-day
//! exposure at Bevy's default camera settings.

const AMBIENT_NITS_PER_UNIT: f32 = 400.0;
const LUX_PER_UNIT: f32 = 5_000.0;
const LUMENS_PER_UNIT: f32 = 4_000_000.0;

pub fn ambient_brightness(intensity: f32) -> f32 {
    intensity * AMBIENT_NITS_PER_UNIT
}

pub fn directional_illuminance(intensity: f32) -> f32 {
    intensity * LUX_PER_UNIT
}

pub fn point_lumens(intensity: f32) -> f32 {
    intensity * LUMENS_PER_UNIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(0.5)]
    #[case(1.5)]
    fn conversions_are_linear(#[case] intensity: f32) {
        assert_eq!(ambient_brightness(intensity * 2.0), ambient_brightness(intensity) * 2.0);
        assert_eq!(directional_illuminance(intensity * 2.0), directional_illuminance(intensity) * 2.0);
        assert_eq!(point_lumens(intensity * 2.0), point_lumens(intensity) * 2.0);
    }
}
