/// Command line configuration for a cookie bake
use clap::{ArgAction, Parser, ValueEnum};
use constants::texture::{
    COOKIE_RESOLUTIONS, DEFAULT_APPLY_ATTENUATION, DEFAULT_COOKIE_RESOLUTION, DEFAULT_SPOT_ANGLE,
    is_supported_resolution,
};
use std::path::PathBuf;

/// Which light kinds to bake cookies for.
/// Point lights take the cubemap cookie, spot lights the gnomonic 2D cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LightType {
    Point,
    Spot,
    Both,
}

impl LightType {
    pub fn bakes_point(self) -> bool {
        matches!(self, LightType::Point | LightType::Both)
    }

    pub fn bakes_spot(self) -> bool {
        matches!(self, LightType::Spot | LightType::Both)
    }
}

/// Container written for every cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TextureFormat {
    /// One RGBA8 PNG per 2D cookie and per cube face
    Png,
    /// One RGBA8 DDS per 2D cookie and a single DDS cubemap
    Dds,
}

impl TextureFormat {
    pub fn extension(self) -> &'static str {
        match self {
            TextureFormat::Png => "png",
            TextureFormat::Dds => "dds",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "ies-pre-processing",
    about = "Bake IES photometric profiles into light cookie textures"
)]
pub struct BakeArgs {
    /// IES file to bake
    pub input: PathBuf,

    /// Output directory, defaults to the directory of the input file
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Cookie resolution in pixels
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_COOKIE_RESOLUTION,
        value_parser = parse_resolution
    )]
    pub resolution: u32,

    /// Full cone angle of the spot cookie in degrees
    #[arg(long, default_value_t = DEFAULT_SPOT_ANGLE, value_parser = parse_spot_angle)]
    pub spot_angle: f32,

    /// Divide spot cookie intensity by the squared ray length
    #[arg(long, default_value_t = DEFAULT_APPLY_ATTENUATION, action = ArgAction::Set)]
    pub attenuation: bool,

    #[arg(long, value_enum, default_value_t = LightType::Both)]
    pub light_type: LightType,

    #[arg(long, value_enum, default_value_t = TextureFormat::Png)]
    pub format: TextureFormat,
}

fn parse_resolution(value: &str) -> Result<u32, String> {
    let resolution: u32 = value
        .parse()
        .map_err(|_| format!("'{}' is not a resolution", value))?;

    if is_supported_resolution(resolution) {
        Ok(resolution)
    } else {
        Err(format!(
            "{} is not a supported cookie resolution, expected one of {:?}",
            resolution, COOKIE_RESOLUTIONS
        ))
    }
}

fn parse_spot_angle(value: &str) -> Result<f32, String> {
    let angle: f32 = value
        .parse()
        .map_err(|_| format!("'{}' is not an angle", value))?;

    // tan(angle / 2) must stay finite and positive
    if angle > 0.0 && angle < 180.0 {
        Ok(angle)
    } else {
        Err(format!("spot angle must be between 0 and 180 degrees, got {}", angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        BakeArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args =
            BakeArgs::try_parse_from(["ies-pre-processing", "lights/downlight.ies"]).unwrap();

        assert_eq!(args.input, PathBuf::from("lights/downlight.ies"));
        assert_eq!(args.output_dir, None);
        assert_eq!(args.resolution, 128);
        assert_eq!(args.spot_angle, 120.0);
        assert!(args.attenuation);
        assert_eq!(args.light_type, LightType::Both);
        assert_eq!(args.format, TextureFormat::Png);
    }

    #[test]
    fn test_explicit_options() {
        let args = BakeArgs::try_parse_from([
            "ies-pre-processing",
            "downlight.ies",
            "--output-dir",
            "baked",
            "--resolution",
            "256",
            "--spot-angle",
            "60",
            "--attenuation",
            "false",
            "--light-type",
            "spot",
            "--format",
            "dds",
        ])
        .unwrap();

        assert_eq!(args.output_dir, Some(PathBuf::from("baked")));
        assert_eq!(args.resolution, 256);
        assert_eq!(args.spot_angle, 60.0);
        assert!(!args.attenuation);
        assert!(args.light_type.bakes_spot());
        assert!(!args.light_type.bakes_point());
        assert_eq!(args.format.extension(), "dds");
    }

    #[test]
    fn test_rejects_unsupported_resolution() {
        for resolution in ["100", "8", "8192", "big"] {
            let result =
                BakeArgs::try_parse_from(["ies-pre-processing", "a.ies", "-r", resolution]);
            assert!(result.is_err(), "{} accepted", resolution);
        }
    }

    #[test]
    fn test_rejects_degenerate_spot_angle() {
        for angle in ["0", "180", "-10", "wide"] {
            let result =
                BakeArgs::try_parse_from(["ies-pre-processing", "a.ies", "--spot-angle", angle]);
            assert!(result.is_err(), "{} accepted", angle);
        }
    }

    #[test]
    fn test_light_type_mapping() {
        assert!(LightType::Both.bakes_point() && LightType::Both.bakes_spot());
        assert!(LightType::Point.bakes_point() && !LightType::Point.bakes_spot());
    }
}
