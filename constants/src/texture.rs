/// Cookie resolutions a light can be baked at
pub const COOKIE_RESOLUTIONS: &[u32] = &[16, 32, 64, 128, 256, 512, 1024, 2048, 4096];

/// Resolution used when none is requested
pub const DEFAULT_COOKIE_RESOLUTION: u32 = 128;

/// Full cone angle (degrees) used for spot cookies when none is requested
pub const DEFAULT_SPOT_ANGLE: f32 = 120.0;

/// Spot cookies fall off with the squared ray length unless disabled
pub const DEFAULT_APPLY_ATTENUATION: bool = true;

/// Largest value of an 8-bit colour channel
pub const CHANNEL_MAX: f32 = 255.0;

/// Bytes per RGBA8 pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Check a requested resolution against the supported list
pub fn is_supported_resolution(size: u32) -> bool {
    COOKIE_RESOLUTIONS.contains(&size)
}
