//! Physical angle to fractional grid index, with lateral symmetry folding

use crate::profile::{HorizontalSymmetry, PhotometricProfile};

/// Neighbouring angles closer than this are treated as one sample
const MIN_ANGLE_SPAN: f32 = 0.0001;

/// Fractional position of `value` in an ascending angle table.
///
/// Values below the first angle (and NaN) clamp to 0 and values above the last
/// angle clamp to the last index. In between, the integer part is the index of the
/// bracketing lower angle and the fraction is the linear position towards the
/// next one.
pub fn locate(value: f32, angles: &[f32]) -> f32 {
    let Some(&last) = angles.last() else {
        return 0.0;
    };
    let end = angles.len() - 1;

    if value.is_nan() || value < angles[0] {
        return 0.0;
    }
    if value > last {
        return end as f32;
    }

    // Last index whose angle is <= value
    let start = angles.partition_point(|&angle| angle <= value) - 1;

    let fraction = match angles.get(start + 1) {
        Some(&right) => {
            let left = angles[start];
            let span = right - left;
            if span > MIN_ANGLE_SPAN {
                (value - left) / span
            } else {
                0.0
            }
        }
        None => 0.0,
    };

    start as f32 + fraction
}

impl HorizontalSymmetry {
    /// Reduce a lateral angle in [0, 360) to the range the luminaire was measured over.
    pub fn fold(self, angle: f32) -> f32 {
        match self {
            HorizontalSymmetry::Full => 0.0,
            HorizontalSymmetry::Quadrant => 90.0 - ((angle - 180.0).abs() - 90.0).abs(),
            HorizontalSymmetry::Bilateral => 180.0 - (angle - 180.0).abs(),
            HorizontalSymmetry::Asymmetric => angle,
        }
    }
}

impl PhotometricProfile {
    /// Fractional vertical index of a vertical angle in degrees
    pub fn compute_vertical_position(&self, angle: f32) -> f32 {
        locate(angle, &self.vertical_angles)
    }

    /// Fractional horizontal index for Type A and B grids, `angle` in [-180, 180].
    /// Tables starting at 0 cover one half-plane and are mirrored.
    pub fn compute_type_ab_horizontal_position(&self, angle: f32) -> f32 {
        let angle = if self.first_horizontal_angle == 0.0 {
            angle.abs()
        } else {
            angle
        };
        locate(angle, &self.horizontal_angles)
    }

    /// Fractional horizontal index for Type C grids, `angle` in [0, 360).
    pub fn compute_type_c_horizontal_position(&self, angle: f32) -> f32 {
        locate(
            self.horizontal_symmetry.fold(angle),
            &self.horizontal_angles,
        )
    }
}
