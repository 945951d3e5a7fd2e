//! IES LM-63 photometric profile parsing and light cookie projection.
//!
//! A [`PhotometricProfile`] is parsed once from the text of an IES file and is
//! read-only afterwards. Cookies are built from it on the CPU:
//!
//! - [`PhotometricProfile::build_cylindrical`]: full-sphere equirectangular texture
//! - [`PhotometricProfile::build_gnomonic`]: perspective cone texture for spot lights
//! - [`PhotometricProfile::build_cubemap`]: six cube faces for point lights
//!
//! Every builder returns an owned [`PixelBuffer`] of RGBA8 pixels where all four
//! channels carry the same normalised intensity.
//!
//! ```no_run
//! use ies_photometry::PhotometricProfile;
//!
//! let profile = PhotometricProfile::from_file("downlight.ies")?;
//! let spot_cookie = profile.build_gnomonic(120.0, 128, true);
//! let point_cookie = profile.build_cubemap(128);
//! # Ok::<(), ies_photometry::IesError>(())
//! ```

pub mod error;
pub mod interpolation;
pub mod locator;
mod parser;
pub mod pixel_buffer;
pub mod profile;
pub mod projection;

pub use error::{AngleAxis, DataField, FieldFailure, IesError, MissingInput, Result};
pub use pixel_buffer::PixelBuffer;
pub use profile::{
    FileFormatVersion, HorizontalSymmetry, IntensityUnit, LuminousUnit, PhotometricProfile,
    PhotometricType,
};
pub use projection::{CubemapGenerator, CylindricalTextureGenerator, GnomonicTextureGenerator};
