//! Parsed photometric profile and its query surface

use crate::error::{IesError, Result};
use crate::parser;
use constants::units::{ABSOLUTE_PHOTOMETRY_LUMENS, FEET_TO_METERS};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// LM-63 revision, selected from the literal first line of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormatVersion {
    /// No version line; the first line is already part of the keyword block
    Lm63_1986,
    Lm63_1991,
    Lm63_1995,
    Lm63_2002,
    Lm63_2019,
}

impl FileFormatVersion {
    /// Match an explicit version line. `None` means the file predates version lines.
    pub fn from_header_line(line: &str) -> Option<Self> {
        match line.trim() {
            "IESNA91" => Some(Self::Lm63_1991),
            "IESNA:LM-63-1995" => Some(Self::Lm63_1995),
            "IESNA:LM-63-2002" => Some(Self::Lm63_2002),
            "IES:LM-63-2019" => Some(Self::Lm63_2019),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lm63_1986 => "LM-63-1986",
            Self::Lm63_1991 => "LM-63-1991",
            Self::Lm63_1995 => "LM-63-1995",
            Self::Lm63_2002 => "LM-63-2002",
            Self::Lm63_2019 => "LM-63-2019",
        }
    }
}

impl fmt::Display for FileFormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Angular coordinate convention of the measurement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotometricType {
    /// Automotive: horizontal polar axis, lateral angles in [-180, 180]
    A,
    /// Floodlight: the luminaire is turned on its side
    B,
    /// Architectural: vertical polar axis, aimed at nadir
    C,
}

impl PhotometricType {
    /// Decode the file value (1 = C, 2 = B, 3 = A)
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::C),
            2 => Some(Self::B),
            3 => Some(Self::A),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::C => 1,
            Self::B => 2,
            Self::A => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::A => "Type A",
            Self::B => "Type B",
            Self::C => "Type C",
        }
    }
}

impl fmt::Display for PhotometricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unit of the luminous opening dimensions as declared in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LuminousUnit {
    Feet,
    Meters,
}

impl LuminousUnit {
    /// Decode the file value (1 = feet, 2 = meters)
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Feet),
            2 => Some(Self::Meters),
            _ => None,
        }
    }

    /// Factor converting a dimension in this unit to meters
    pub fn meters_factor(self) -> f32 {
        match self {
            Self::Feet => FEET_TO_METERS,
            Self::Meters => 1.0,
        }
    }
}

/// Lateral symmetry class implied by the last horizontal angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalSymmetry {
    /// Last angle 0: symmetric in all lateral planes
    Full,
    /// Last angle 90: symmetric in each quadrant
    Quadrant,
    /// Last angle 180: symmetric about the 0-180 degree plane
    Bilateral,
    /// Any other last angle: no lateral symmetry
    Asymmetric,
}

impl HorizontalSymmetry {
    pub fn from_last_angle(last_horizontal_angle: f32) -> Self {
        if last_horizontal_angle == 0.0 {
            Self::Full
        } else if last_horizontal_angle == 90.0 {
            Self::Quadrant
        } else if last_horizontal_angle == 180.0 {
            Self::Bilateral
        } else {
            Self::Asymmetric
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Quadrant => "quadrant",
            Self::Bilateral => "bilateral",
            Self::Asymmetric => "asymmetric",
        }
    }
}

/// Unit reported alongside the maximum intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntensityUnit {
    Candelas,
}

impl IntensityUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Candelas => "Candelas",
        }
    }
}

impl fmt::Display for IntensityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated candela distribution of a luminaire.
///
/// Only [`PhotometricProfile::parse`] (and the helpers delegating to it) can
/// create one, so every profile satisfies:
/// - both angle tables are non-empty and strictly ascending
/// - `candela_values.len() == vertical_angles.len() * horizontal_angles.len()`
/// - `max_candelas` is the maximum of the scaled candela values
#[derive(Debug, Clone, PartialEq)]
pub struct PhotometricProfile {
    pub(crate) file_format_version: FileFormatVersion,
    pub(crate) total_lumens: f32,
    pub(crate) max_candelas: f32,
    pub(crate) photometric_type: PhotometricType,
    pub(crate) dimension_width: f32,
    pub(crate) dimension_length: f32,
    pub(crate) dimension_height: f32,
    pub(crate) keywords: HashMap<String, String>,
    pub(crate) vertical_angles: Vec<f32>,
    pub(crate) horizontal_angles: Vec<f32>,
    /// Row-major by horizontal angle: `[h * vertical_count + v]`
    pub(crate) candela_values: Vec<f32>,
    pub(crate) min_delta_vertical_angle: f32,
    pub(crate) min_delta_horizontal_angle: f32,
    pub(crate) first_horizontal_angle: f32,
    pub(crate) last_horizontal_angle: f32,
    pub(crate) horizontal_symmetry: HorizontalSymmetry,
}

impl PhotometricProfile {
    /// Parse the text of an IES file.
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse(text)
    }

    /// Read and parse an IES file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IesError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn file_format_version(&self) -> &'static str {
        self.file_format_version.as_str()
    }

    pub fn version(&self) -> FileFormatVersion {
        self.file_format_version
    }

    /// Lamp count times lumens per lamp, or -1 for absolute photometry
    pub fn total_lumens(&self) -> f32 {
        self.total_lumens
    }

    pub fn is_absolute_photometry(&self) -> bool {
        self.total_lumens == ABSOLUTE_PHOTOMETRY_LUMENS
    }

    pub fn max_candelas(&self) -> f32 {
        self.max_candelas
    }

    pub fn photometric_type(&self) -> PhotometricType {
        self.photometric_type
    }

    /// Luminous opening width in meters
    pub fn dimension_width(&self) -> f32 {
        self.dimension_width
    }

    /// Luminous opening length in meters
    pub fn dimension_length(&self) -> f32 {
        self.dimension_length
    }

    /// Luminous opening height in meters
    pub fn dimension_height(&self) -> f32 {
        self.dimension_height
    }

    /// Value of a `[KEYWORD]`, or an empty string when the file does not declare it.
    pub fn keyword_value(&self, keyword: &str) -> &str {
        self.keywords.get(keyword).map_or("", String::as_str)
    }

    /// All declared keywords, in no particular order
    pub fn keywords(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keywords
            .iter()
            .map(|(keyword, value)| (keyword.as_str(), value.as_str()))
    }

    /// Peak intensity of the distribution.
    ///
    /// Always reported in candelas, absolute photometry or not.
    pub fn maximum_intensity(&self) -> (f32, IntensityUnit) {
        (self.max_candelas, IntensityUnit::Candelas)
    }

    pub fn vertical_angles(&self) -> &[f32] {
        &self.vertical_angles
    }

    pub fn horizontal_angles(&self) -> &[f32] {
        &self.horizontal_angles
    }

    pub fn candela_values(&self) -> &[f32] {
        &self.candela_values
    }

    /// Scaled candela value at a grid cell
    pub fn candela(&self, horizontal_index: usize, vertical_index: usize) -> f32 {
        self.candela_values[horizontal_index * self.vertical_angles.len() + vertical_index]
    }

    pub fn min_delta_vertical_angle(&self) -> f32 {
        self.min_delta_vertical_angle
    }

    pub fn min_delta_horizontal_angle(&self) -> f32 {
        self.min_delta_horizontal_angle
    }

    pub fn first_horizontal_angle(&self) -> f32 {
        self.first_horizontal_angle
    }

    pub fn last_horizontal_angle(&self) -> f32 {
        self.last_horizontal_angle
    }

    pub fn horizontal_symmetry(&self) -> HorizontalSymmetry {
        self.horizontal_symmetry
    }

    /// Smallest cylindrical texture height that does not skip a tabulated angle.
    /// Type B is rotated onto its side, so its horizontal step drives the height.
    pub fn min_vertical_sample_count(&self) -> u32 {
        let delta = match self.photometric_type {
            PhotometricType::B => self.min_delta_horizontal_angle,
            PhotometricType::A | PhotometricType::C => self.min_delta_vertical_angle,
        };
        1u32.saturating_add((360.0 / delta).ceil() as u32)
    }

    /// Smallest cylindrical texture width that does not skip a tabulated angle.
    pub fn min_horizontal_sample_count(&self) -> u32 {
        let delta = match self.photometric_type {
            PhotometricType::A => self.min_delta_horizontal_angle,
            PhotometricType::B => self.min_delta_vertical_angle,
            PhotometricType::C => self
                .min_delta_horizontal_angle
                .min(self.min_delta_vertical_angle),
        };
        1u32.saturating_add((720.0 / delta).ceil() as u32)
    }
}

impl FromStr for PhotometricProfile {
    type Err = IesError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPE_B_FLOOD: &str = "IESNA:LM-63-2002
[TEST] FLOOD-7
[MANUFAC] Example Lighting
TILT=NONE
1 -1 1 3 5 2 1 1.0 2.0 0.5
1 1 120
-45 0 45
-90 -45 0 45 90
10 20 10
20 40 20
30 80 30
20 40 20
10 20 10
";

    #[test]
    fn test_version_headers() {
        assert_eq!(
            FileFormatVersion::from_header_line("IESNA91"),
            Some(FileFormatVersion::Lm63_1991)
        );
        assert_eq!(
            FileFormatVersion::from_header_line("  IES:LM-63-2019 "),
            Some(FileFormatVersion::Lm63_2019)
        );
        assert_eq!(FileFormatVersion::from_header_line("[TEST] 42"), None);
        assert_eq!(FileFormatVersion::Lm63_1986.as_str(), "LM-63-1986");
    }

    #[test]
    fn test_photometric_type_codes() {
        assert_eq!(PhotometricType::from_code(1), Some(PhotometricType::C));
        assert_eq!(PhotometricType::from_code(2), Some(PhotometricType::B));
        assert_eq!(PhotometricType::from_code(3), Some(PhotometricType::A));
        assert_eq!(PhotometricType::from_code(4), None);
        assert_eq!(PhotometricType::A.name(), "Type A");
        assert_eq!(PhotometricType::B.code(), 2);
    }

    #[test]
    fn test_symmetry_from_last_angle() {
        assert_eq!(HorizontalSymmetry::from_last_angle(0.0), HorizontalSymmetry::Full);
        assert_eq!(
            HorizontalSymmetry::from_last_angle(90.0),
            HorizontalSymmetry::Quadrant
        );
        assert_eq!(
            HorizontalSymmetry::from_last_angle(180.0),
            HorizontalSymmetry::Bilateral
        );
        assert_eq!(
            HorizontalSymmetry::from_last_angle(350.0),
            HorizontalSymmetry::Asymmetric
        );
    }

    #[test]
    fn test_type_b_queries() {
        let profile: PhotometricProfile = TYPE_B_FLOOD.parse().unwrap();

        assert_eq!(profile.photometric_type(), PhotometricType::B);
        assert!(profile.is_absolute_photometry());
        assert_eq!(profile.total_lumens(), -1.0);
        assert!((profile.dimension_width() - 0.3048).abs() < 1e-6);
        assert!((profile.dimension_length() - 0.6096).abs() < 1e-6);
        assert!((profile.dimension_height() - 0.1524).abs() < 1e-6);
        assert_eq!(profile.keyword_value("MANUFAC"), "Example Lighting");
        assert_eq!(profile.keyword_value("LAMP"), "");
        assert_eq!(profile.keywords().count(), 2);
        assert_eq!(profile.maximum_intensity(), (80.0, IntensityUnit::Candelas));
        assert_eq!(profile.candela(2, 1), 80.0);
        assert_eq!(profile.first_horizontal_angle(), -90.0);
        assert_eq!(profile.last_horizontal_angle(), 90.0);
        assert_eq!(profile.horizontal_symmetry(), HorizontalSymmetry::Quadrant);
    }

    #[test]
    fn test_sample_counts_follow_type_axes() {
        let profile = PhotometricProfile::parse(TYPE_B_FLOOD).unwrap();

        // min vertical step 45, min horizontal step 45
        assert_eq!(profile.min_vertical_sample_count(), 1 + 8);
        assert_eq!(profile.min_horizontal_sample_count(), 1 + 16);
    }

    #[test]
    fn test_sample_counts_saturate_on_tiny_steps() {
        let profile = PhotometricProfile::parse(
            "IESNA:LM-63-2002\nTILT=NONE\n1 -1 1 2 1 1 2 0 0 0\n1 1 0\n0 0.00000005\n0\n10 10\n",
        )
        .unwrap();

        assert_eq!(profile.min_vertical_sample_count(), u32::MAX);
        assert_eq!(profile.min_horizontal_sample_count(), u32::MAX);
    }

    #[test]
    fn test_from_file_missing_path() {
        let error = PhotometricProfile::from_file("/definitely/not/here.ies").unwrap_err();
        assert!(matches!(error, IesError::FileNotFound { .. }));
    }

    #[test]
    fn test_from_file_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flood.ies");
        fs::write(&path, TYPE_B_FLOOD).unwrap();

        let profile = PhotometricProfile::from_file(&path).unwrap();
        assert_eq!(profile.file_format_version(), "LM-63-2002");
        assert_eq!(profile.keyword_value("TEST"), "FLOOD-7");
    }
}
