/// Perspective (gnomonic) projection of a cone of directions onto a square cookie
use super::{HALF_PI, TWO_PI, normalized_intensity};
use crate::pixel_buffer::PixelBuffer;
use crate::profile::{PhotometricProfile, PhotometricType};
use tracing::trace;

/// Texture plane coordinates with the squared length of the ray through them
#[derive(Clone, Copy)]
struct PlanePoint {
    u: f32,
    v: f32,
    ray_length_squared: f32,
}

pub struct GnomonicTextureGenerator<'a> {
    profile: &'a PhotometricProfile,
}

impl<'a> GnomonicTextureGenerator<'a> {
    pub fn new(profile: &'a PhotometricProfile) -> Self {
        Self { profile }
    }

    /// Generate a `size` by `size` cookie for a spot cone of `cone_angle` degrees.
    /// The one pixel border is left transparent black.
    pub fn generate(&self, cone_angle: f32, size: u32, apply_attenuation: bool) -> PixelBuffer {
        trace!(
            "Building {}x{} gnomonic texture, cone {} degrees, attenuation {}",
            size,
            size,
            cone_angle,
            apply_attenuation
        );

        let mut buffer = PixelBuffer::new(size, size);
        if size < 3 {
            return buffer;
        }

        let limit = (0.5 * cone_angle).to_radians().tan();
        let step = 2.0 * limit / size.saturating_sub(3).max(1) as f32;

        for y in 1..size - 1 {
            let v = (y - 1) as f32 * step - limit;

            for x in 1..size - 1 {
                let u = (x - 1) as f32 * step - limit;
                let point = PlanePoint {
                    u,
                    v,
                    ray_length_squared: u * u + v * v + 1.0,
                };

                let (horizontal_position, vertical_position) = self.grid_position(point);
                let mut candela = self
                    .profile
                    .interpolate_bilinear(horizontal_position, vertical_position);

                if apply_attenuation {
                    candela /= point.ray_length_squared;
                }

                buffer.set_intensity(
                    x,
                    y,
                    normalized_intensity(candela, self.profile.max_candelas()),
                );
            }
        }

        buffer
    }

    /// Fractional (horizontal, vertical) grid position seen through a plane point
    fn grid_position(&self, point: PlanePoint) -> (f32, f32) {
        let PlanePoint {
            u,
            v,
            ray_length_squared,
        } = point;

        match self.profile.photometric_type() {
            PhotometricType::A => {
                let longitude = u.atan().to_degrees();
                let latitude = (v / ray_length_squared.sqrt()).asin().to_degrees();
                (
                    self.profile.compute_type_c_horizontal_position(longitude),
                    self.profile.compute_vertical_position(latitude),
                )
            }
            PhotometricType::B => {
                let longitude = v.atan().to_degrees();
                let latitude = (u / ray_length_squared.sqrt()).asin().to_degrees();
                (
                    self.profile.compute_type_c_horizontal_position(longitude),
                    self.profile.compute_vertical_position(latitude),
                )
            }
            PhotometricType::C => {
                // Azimuth measured from +v, polar angle from the optical axis
                let longitude = (v.atan2(u) - HALF_PI + TWO_PI) % TWO_PI;
                let latitude = (u * u + v * v).sqrt().atan();
                (
                    self.profile
                        .compute_type_c_horizontal_position(longitude.to_degrees()),
                    self.profile.compute_vertical_position(latitude.to_degrees()),
                )
            }
        }
    }
}
