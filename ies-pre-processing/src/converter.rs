/// IES profile converter orchestrating cookie builds, texture output and the manifest.
use crate::args::{BakeArgs, LightType, TextureFormat};
use crate::dds_writer::{write_cookie_dds, write_cubemap_dds};
use crate::manifest::{
    BakeInfo, CookieManifest, CookieTextureFiles, ManifestGenerator, PhotometryInfo,
};
use crate::png_writer::write_cookie_png;
use constants::cubemap::{CUBE_FACE_COUNT, CUBE_FACE_NAMES};
use ies_photometry::{PhotometricProfile, PixelBuffer};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Cookies built for one profile.
struct CookieSet {
    cylindrical: PixelBuffer,
    spot: Option<PixelBuffer>,
    point: Option<[PixelBuffer; CUBE_FACE_COUNT]>,
}

/// Bake settings taken from the command line.
#[derive(Clone, Copy, Debug)]
struct BakeSettings {
    resolution: u32,
    spot_angle: f32,
    attenuation: bool,
    light_type: LightType,
    format: TextureFormat,
}

pub struct IesConverter {
    /// IES file to bake.
    input_path: PathBuf,
    /// Directory receiving textures and manifest.
    output_dir: PathBuf,
    /// Programmatic output name derived from the input filename.
    output_name: String,
    settings: BakeSettings,
}

impl IesConverter {
    /// Create a converter and the output directory.
    /// Output defaults to the directory holding the input file.
    pub fn new(args: &BakeArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let output_dir = match &args.output_dir {
            Some(dir) => dir.clone(),
            None => args
                .input
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf(),
        };
        fs::create_dir_all(&output_dir)?;

        let stem = args
            .input
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(Self {
            input_path: args.input.clone(),
            output_dir,
            output_name: generate_programmatic_name(&stem),
            settings: BakeSettings {
                resolution: args.resolution,
                spot_angle: args.spot_angle,
                attenuation: args.attenuation,
                light_type: args.light_type,
                format: args.format,
            },
        })
    }

    /// Parse the profile, bake every requested cookie and write the manifest.
    /// Returns the path of the written manifest.
    pub fn convert(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        info!(
            "Converting {} to {}x{} light cookies...",
            self.input_path.display(),
            self.settings.resolution,
            self.settings.resolution
        );

        let profile = PhotometricProfile::from_file(&self.input_path)?;
        self.log_profile_info(&profile);
        self.check_sample_counts(&profile);

        let cookies = self.build_cookies(&profile);
        let textures = self.save_cookies(&cookies)?;

        let manifest = CookieManifest {
            source: self
                .input_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
            photometry: PhotometryInfo::from_profile(&profile),
            bake: BakeInfo {
                resolution: self.settings.resolution,
                spot_angle: self.settings.spot_angle,
                attenuation: self.settings.attenuation,
                format: self.settings.format.extension().to_string(),
            },
            textures,
        };

        let manifest_path =
            ManifestGenerator::new(&self.output_dir, &self.output_name).generate(&manifest)?;

        info!("Conversion complete!");
        Ok(manifest_path)
    }

    fn log_profile_info(&self, profile: &PhotometricProfile) {
        let (intensity, unit) = profile.maximum_intensity();
        info!(
            "{} {} profile, {} vertical x {} horizontal angles",
            profile.file_format_version(),
            profile.photometric_type(),
            profile.vertical_angles().len(),
            profile.horizontal_angles().len()
        );
        info!(
            "Peak intensity {} {}, {} lateral symmetry",
            intensity,
            unit.as_str(),
            profile.horizontal_symmetry().as_str()
        );

        let luminaire = profile.keyword_value("LUMINAIRE");
        if !luminaire.is_empty() {
            info!("Luminaire: {}", luminaire);
        }
    }

    /// Warn when the cylindrical cookie is too coarse to reach every tabulated angle.
    fn check_sample_counts(&self, profile: &PhotometricProfile) {
        let width = 2 * self.settings.resolution;
        let height = self.settings.resolution;
        let min_width = profile.min_horizontal_sample_count();
        let min_height = profile.min_vertical_sample_count();

        if width < min_width || height < min_height {
            warn!(
                "{}x{} cylindrical cookie skips tabulated angles, {}x{} recommended",
                width, height, min_width, min_height
            );
        }
    }

    /// Build the requested cookies in parallel from the shared profile.
    fn build_cookies(&self, profile: &PhotometricProfile) -> CookieSet {
        let BakeSettings {
            resolution,
            spot_angle,
            attenuation,
            light_type,
            ..
        } = self.settings;

        let jobs = 1 + light_type.bakes_spot() as u64 + light_type.bakes_point() as u64;
        let pb = ProgressBar::new(jobs);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} cookies ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("▉▊▋▌▍▎▏ "),
        );
        pb.set_message("Building cookies");

        let finished = |cookie: PixelBuffer| {
            pb.inc(1);
            cookie
        };

        let (cylindrical, (spot, point)) = rayon::join(
            || finished(profile.build_cylindrical(resolution)),
            || {
                rayon::join(
                    || {
                        light_type.bakes_spot().then(|| {
                            finished(profile.build_gnomonic(spot_angle, resolution, attenuation))
                        })
                    },
                    || {
                        light_type.bakes_point().then(|| {
                            let faces = profile.build_cubemap(resolution);
                            pb.inc(1);
                            faces
                        })
                    },
                )
            },
        );

        pb.finish_with_message("Cookies built");

        CookieSet {
            cylindrical,
            spot,
            point,
        }
    }

    /// Write every cookie and return the paths relative to the output directory.
    fn save_cookies(
        &self,
        cookies: &CookieSet,
    ) -> Result<CookieTextureFiles, Box<dyn std::error::Error>> {
        let mut textures = CookieTextureFiles {
            cylindrical: self.save_2d(&cookies.cylindrical, "cylindrical")?,
            ..Default::default()
        };

        if let Some(spot) = &cookies.spot {
            textures.spot = Some(self.save_2d(spot, "spot")?);
        }

        if let Some(faces) = &cookies.point {
            textures.point = match self.settings.format {
                TextureFormat::Png => CUBE_FACE_NAMES
                    .iter()
                    .zip(faces)
                    .map(|(face_name, face)| self.save_2d(face, &format!("point_{}", face_name)))
                    .collect::<Result<Vec<_>, _>>()?,
                TextureFormat::Dds => {
                    let file_name = self.texture_file_name("point");
                    write_cubemap_dds(&self.output_dir.join(&file_name), faces)?;
                    vec![file_name]
                }
            };
        }

        for file_name in textures.iter() {
            info!("Wrote {}", self.output_dir.join(file_name).display());
        }

        Ok(textures)
    }

    fn save_2d(
        &self,
        buffer: &PixelBuffer,
        kind: &str,
    ) -> Result<String, Box<dyn std::error::Error>> {
        let file_name = self.texture_file_name(kind);
        let path = self.output_dir.join(&file_name);

        match self.settings.format {
            TextureFormat::Png => write_cookie_png(&path, buffer)?,
            TextureFormat::Dds => write_cookie_dds(&path, buffer)?,
        }

        Ok(file_name)
    }

    fn texture_file_name(&self, kind: &str) -> String {
        format!(
            "{}_{}.{}",
            self.output_name,
            kind,
            self.settings.format.extension()
        )
    }
}

/// Convert a snake or kebab case file stem to an upper camel case output name.
pub fn generate_programmatic_name(input: &str) -> String {
    input
        .split(['_', '-', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const DOWNLIGHT: &str = "IESNA:LM-63-2002\n[LUMINAIRE] Recessed downlight\nTILT=NONE\n\
                             1 1500 1 4 3 1 1 0.5 0.5 0.25\n1 1 18\n0 30 60 90\n0 45 90\n\
                             900 700 200 0\n900 690 190 0\n900 680 180 0\n";

    fn write_profile(directory: &Path) -> PathBuf {
        let path = directory.join("recessed_downlight.ies");
        fs::write(&path, DOWNLIGHT).unwrap();
        path
    }

    fn converter(input: &Path, output: &Path, extra: &[&str]) -> IesConverter {
        let mut argv = vec![
            "ies-pre-processing".to_string(),
            input.display().to_string(),
            "--output-dir".to_string(),
            output.display().to_string(),
            "--resolution".to_string(),
            "32".to_string(),
        ];
        argv.extend(extra.iter().map(|arg| arg.to_string()));
        IesConverter::new(&BakeArgs::try_parse_from(argv).unwrap()).unwrap()
    }

    fn read_manifest(path: &Path) -> CookieManifest {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_programmatic_name() {
        assert_eq!(generate_programmatic_name("recessed_downlight"), "RecessedDownlight");
        assert_eq!(generate_programmatic_name("wall-washer 2"), "WallWasher2");
        assert_eq!(generate_programmatic_name("Spot"), "Spot");
    }

    #[test]
    fn test_png_bake_writes_every_texture() {
        let directory = tempfile::tempdir().unwrap();
        let input = write_profile(directory.path());
        let output = directory.path().join("baked");

        let manifest_path = converter(&input, &output, &[]).convert().unwrap();
        assert_eq!(
            manifest_path,
            output.join("RecessedDownlight_ies_manifest.json")
        );

        let manifest = read_manifest(&manifest_path);
        assert_eq!(manifest.source, "recessed_downlight.ies");
        assert_eq!(manifest.textures.cylindrical, "RecessedDownlight_cylindrical.png");
        assert_eq!(manifest.textures.spot.as_deref(), Some("RecessedDownlight_spot.png"));
        assert_eq!(manifest.textures.point.len(), 6);
        assert_eq!(manifest.textures.point[0], "RecessedDownlight_point_px.png");

        for file_name in manifest.textures.iter() {
            assert!(output.join(file_name).exists(), "{} missing", file_name);
        }

        let cylindrical = image::open(output.join(&manifest.textures.cylindrical))
            .unwrap()
            .to_rgba8();
        assert_eq!(cylindrical.dimensions(), (64, 32));
    }

    #[test]
    fn test_dds_spot_only_bake() {
        let directory = tempfile::tempdir().unwrap();
        let input = write_profile(directory.path());

        let manifest_path = converter(
            &input,
            directory.path(),
            &["--format", "dds", "--light-type", "spot"],
        )
        .convert()
        .unwrap();

        let manifest = read_manifest(&manifest_path);
        assert_eq!(manifest.bake.format, "dds");
        assert!(manifest.textures.point.is_empty());
        assert_eq!(manifest.textures.iter().count(), 2);
        for file_name in manifest.textures.iter() {
            assert!(file_name.ends_with(".dds"));
            assert!(directory.path().join(file_name).exists());
        }
    }

    #[test]
    fn test_dds_point_bake_writes_one_cubemap() {
        let directory = tempfile::tempdir().unwrap();
        let input = write_profile(directory.path());

        let manifest_path = converter(
            &input,
            directory.path(),
            &["--format", "dds", "--light-type", "point"],
        )
        .convert()
        .unwrap();

        let manifest = read_manifest(&manifest_path);
        assert_eq!(manifest.textures.spot, None);
        assert_eq!(manifest.textures.point, ["RecessedDownlight_point.dds"]);
    }

    #[test]
    fn test_missing_input_fails() {
        let directory = tempfile::tempdir().unwrap();
        let input = directory.path().join("absent.ies");

        let error = converter(&input, directory.path(), &[]).convert().unwrap_err();
        assert!(error.to_string().contains("does not exist"));
    }
}
