//! Bilinear sampling of the candela grid at fractional indices

use crate::profile::PhotometricProfile;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl PhotometricProfile {
    /// Sample the candela grid at a fractional (horizontal, vertical) position.
    ///
    /// Neighbour indices wrap around both tables, so positions on or past the
    /// last row or column blend with the first one. Returns raw candelas.
    pub fn interpolate_bilinear(&self, horizontal: f32, vertical: f32) -> f32 {
        let h_floor = horizontal.floor();
        let v_floor = vertical.floor();
        let h_fraction = horizontal - h_floor;
        let v_fraction = vertical - v_floor;

        let h = h_floor as i64;
        let v = v_floor as i64;

        let p00 = self.wrapped_candela(h, v);
        let p10 = self.wrapped_candela(h + 1, v);
        let p01 = self.wrapped_candela(h, v + 1);
        let p11 = self.wrapped_candela(h + 1, v + 1);

        let p0 = lerp(p00, p01, v_fraction);
        let p1 = lerp(p10, p11, v_fraction);

        lerp(p0, p1, h_fraction)
    }

    fn wrapped_candela(&self, horizontal: i64, vertical: i64) -> f32 {
        let h = horizontal.rem_euclid(self.horizontal_angles.len() as i64) as usize;
        let v = vertical.rem_euclid(self.vertical_angles.len() as i64) as usize;
        self.candela(h, v)
    }
}
