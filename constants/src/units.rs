/// Feet to meters, for luminous dimensions declared in feet
pub const FEET_TO_METERS: f32 = 0.3048;

/// `total_lumens` value marking absolute photometry
pub const ABSOLUTE_PHOTOMETRY_LUMENS: f32 = -1.0;

/// Upper bound of the smallest vertical step, used before any pair is read
pub const MAX_VERTICAL_ANGLE_DELTA: f32 = 180.0;

/// Upper bound of the smallest horizontal step, used before any pair is read
pub const MAX_HORIZONTAL_ANGLE_DELTA: f32 = 360.0;
