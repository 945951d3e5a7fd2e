/// Cookie manifest describing a baked IES profile and the textures written for it.
use ies_photometry::PhotometricProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Top level manifest written next to the baked textures.
#[derive(Serialize, Deserialize, Debug)]
pub struct CookieManifest {
    /// File name of the IES profile the cookies were baked from.
    pub source: String,
    pub photometry: PhotometryInfo,
    pub bake: BakeInfo,
    pub textures: CookieTextureFiles,
}

/// Photometric summary of the source profile.
#[derive(Serialize, Deserialize, Debug)]
pub struct PhotometryInfo {
    pub file_format_version: String,
    pub photometric_type: String,
    pub maximum_intensity: f32,
    pub intensity_unit: String,
    /// -1 for absolute photometry.
    pub total_lumens: f32,
    pub dimensions: LuminousDimensions,
    pub horizontal_symmetry: String,
    /// Smallest cylindrical texture that keeps every tabulated angle.
    pub min_vertical_sample_count: u32,
    pub min_horizontal_sample_count: u32,
    pub keywords: BTreeMap<String, String>,
}

/// Luminous opening in meters.
#[derive(Serialize, Deserialize, Debug)]
pub struct LuminousDimensions {
    pub width: f32,
    pub length: f32,
    pub height: f32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BakeInfo {
    pub resolution: u32,
    pub spot_angle: f32,
    pub attenuation: bool,
    pub format: String,
}

/// Texture paths relative to the manifest.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct CookieTextureFiles {
    /// Full-sphere equirectangular texture.
    pub cylindrical: String,
    /// Gnomonic 2D cookie for spot lights.
    pub spot: Option<String>,
    /// Cube cookie for point lights: one file per face for PNG, one cubemap for DDS.
    pub point: Vec<String>,
}

impl CookieTextureFiles {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.cylindrical.as_str())
            .chain(self.spot.as_deref())
            .chain(self.point.iter().map(String::as_str))
    }
}

impl PhotometryInfo {
    pub fn from_profile(profile: &PhotometricProfile) -> Self {
        let (maximum_intensity, unit) = profile.maximum_intensity();

        Self {
            file_format_version: profile.file_format_version().to_string(),
            photometric_type: profile.photometric_type().name().to_string(),
            maximum_intensity,
            intensity_unit: unit.as_str().to_string(),
            total_lumens: profile.total_lumens(),
            dimensions: LuminousDimensions {
                width: profile.dimension_width(),
                length: profile.dimension_length(),
                height: profile.dimension_height(),
            },
            horizontal_symmetry: profile.horizontal_symmetry().as_str().to_string(),
            min_vertical_sample_count: profile.min_vertical_sample_count(),
            min_horizontal_sample_count: profile.min_horizontal_sample_count(),
            keywords: profile
                .keywords()
                .map(|(keyword, value)| (keyword.to_string(), value.to_string()))
                .collect(),
        }
    }
}

/// Writes `<name>_ies_manifest.json` into the output directory.
pub struct ManifestGenerator {
    output_dir: PathBuf,
    output_name: String,
}

impl ManifestGenerator {
    pub fn new(output_dir: &Path, output_name: &str) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            output_name: output_name.to_string(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_ies_manifest.json", self.output_name))
    }

    pub fn generate(
        &self,
        manifest: &CookieManifest,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let manifest_path = self.manifest_path();
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(&manifest_path, manifest_json)?;

        info!("Generated cookie manifest: {}", manifest_path.display());
        self.log_manifest_summary(manifest);

        Ok(manifest_path)
    }

    fn log_manifest_summary(&self, manifest: &CookieManifest) {
        let photometry = &manifest.photometry;
        info!(
            "  {} {}, peak {} {}",
            photometry.file_format_version,
            photometry.photometric_type,
            photometry.maximum_intensity,
            photometry.intensity_unit
        );
        info!(
            "  {}x{} {} cookies, {} files",
            manifest.bake.resolution,
            manifest.bake.resolution,
            manifest.bake.format,
            manifest.textures.iter().count()
        );
    }
}
