//! LM-63 text grammar: version line, keyword block, `TILT=NONE`, then a
//! strictly positional stream of numbers separated by whitespace or commas.

use crate::error::{AngleAxis, DataField, FieldFailure, IesError, MissingInput, Result};
use crate::profile::{
    FileFormatVersion, HorizontalSymmetry, LuminousUnit, PhotometricProfile, PhotometricType,
};
use constants::units::{
    ABSOLUTE_PHOTOMETRY_LUMENS, MAX_HORIZONTAL_ANGLE_DELTA, MAX_VERTICAL_ANGLE_DELTA,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::iter::Peekable;
use tracing::{debug, warn};

static KEYWORD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\[(?P<keyword>\w+)\]\s*(?P<data>.*)").expect("keyword pattern is valid")
});

static TILT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"TILT=(?P<data>.*)").expect("tilt pattern is valid"));

const MORE_KEYWORD: &str = "MORE";
const BYTE_ORDER_MARK: char = '\u{feff}';

pub(crate) fn parse(text: &str) -> Result<PhotometricProfile> {
    let mut lines = text.lines();

    let version_line = lines
        .next()
        .ok_or(IesError::missing(MissingInput::EmptyFile))?;
    let explicit_version =
        FileFormatVersion::from_header_line(version_line.trim_start_matches(BYTE_ORDER_MARK));
    let file_format_version = explicit_version.unwrap_or(FileFormatVersion::Lm63_1986);
    debug!("IES file format {}", file_format_version);

    // Without a version line the first line already belongs to the keyword block.
    let replayed = explicit_version.is_none().then_some(version_line);
    let keywords = read_keyword_block(replayed.into_iter().chain(&mut lines))?;
    debug!("Read {} keywords", keywords.len());

    let mut tokens = Tokens::new(lines.flat_map(split_data_line));
    if tokens.is_exhausted() {
        return Err(IesError::missing(MissingInput::IesData));
    }

    let lamp_count = tokens.next_int(DataField::LampCount)?.max(1);

    let lumens_per_lamp = tokens.next_float(DataField::LumensPerLamp)?;
    let total_lumens = if lumens_per_lamp < 0.0 {
        ABSOLUTE_PHOTOMETRY_LUMENS
    } else {
        lamp_count as f32 * lumens_per_lamp
    };

    let candela_multiplier = tokens.next_float(DataField::CandelaMultiplier)?.max(0.0);
    let vertical_count = tokens.next_count(DataField::VerticalAngleCount)?;
    let horizontal_count = tokens.next_count(DataField::HorizontalAngleCount)?;

    let type_code = tokens.next_int(DataField::PhotometricType)?;
    let photometric_type = PhotometricType::from_code(type_code)
        .ok_or_else(|| IesError::out_of_range(DataField::PhotometricType, type_code))?;

    let unit_code = tokens.next_int(DataField::LuminousDimensionUnitType)?;
    let unit = LuminousUnit::from_code(unit_code).ok_or_else(|| {
        IesError::out_of_range(DataField::LuminousDimensionUnitType, unit_code)
    })?;
    let to_meters = unit.meters_factor();

    let dimension_width = tokens.next_float(DataField::LuminousDimensionWidth)? * to_meters;
    let dimension_length = tokens.next_float(DataField::LuminousDimensionLength)? * to_meters;
    let dimension_height = tokens.next_float(DataField::LuminousDimensionHeight)? * to_meters;

    let ballast_factor = tokens.next_float(DataField::BallastFactor)?.max(0.0);
    tokens.skip(DataField::FutureUse)?;
    tokens.skip(DataField::InputWatts)?;

    debug!(
        "{} grid: {} vertical x {} horizontal angles",
        photometric_type, vertical_count, horizontal_count
    );

    let (vertical_angles, min_delta_vertical_angle) = read_ascending_angles(
        &mut tokens,
        vertical_count,
        AngleAxis::Vertical,
        MAX_VERTICAL_ANGLE_DELTA,
    )?;
    let (horizontal_angles, min_delta_horizontal_angle) = read_ascending_angles(
        &mut tokens,
        horizontal_count,
        AngleAxis::Horizontal,
        MAX_HORIZONTAL_ANGLE_DELTA,
    )?;

    let scale = candela_multiplier * ballast_factor;
    let mut candela_values = Vec::new();
    let mut max_candelas = 0.0f32;

    for _ in 0..horizontal_count.saturating_mul(vertical_count) {
        let value = tokens.next_float(DataField::CandelaValue)? * scale;
        max_candelas = max_candelas.max(value);
        candela_values.push(value);
    }

    let first_horizontal_angle = horizontal_angles[0];
    let last_horizontal_angle = horizontal_angles[horizontal_angles.len() - 1];
    let horizontal_symmetry = HorizontalSymmetry::from_last_angle(last_horizontal_angle);
    debug!(
        "Max candelas {}, {} lateral symmetry",
        max_candelas,
        horizontal_symmetry.as_str()
    );

    Ok(PhotometricProfile {
        file_format_version,
        total_lumens,
        max_candelas,
        photometric_type,
        dimension_width,
        dimension_length,
        dimension_height,
        keywords,
        vertical_angles,
        horizontal_angles,
        candela_values,
        min_delta_vertical_angle,
        min_delta_horizontal_angle,
        first_horizontal_angle,
        last_horizontal_angle,
        horizontal_symmetry,
    })
}

/// Accumulate `[KEYWORD] data` lines until `TILT=NONE`.
/// A repeated keyword or `[MORE]` continues the current keyword's value.
fn read_keyword_block<'a>(
    lines: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, String>> {
    let mut keywords: HashMap<String, String> = HashMap::new();
    let mut current: Option<String> = None;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(captures) = KEYWORD_LINE.captures(line) {
            let keyword = &captures["keyword"];
            let data = captures["data"].trim();

            let continues = keyword == MORE_KEYWORD || current.as_deref() == Some(keyword);
            if continues {
                match &current {
                    Some(active) => {
                        let value = keywords.entry(active.clone()).or_default();
                        value.push(' ');
                        value.push_str(data);
                    }
                    None => warn!("Ignoring [MORE] line with no preceding keyword"),
                }
            } else {
                keywords.insert(keyword.to_owned(), data.to_owned());
                current = Some(keyword.to_owned());
            }
            continue;
        }

        if let Some(captures) = TILT_LINE.captures(line) {
            let tilt = captures["data"].trim();
            if tilt == "NONE" {
                return Ok(keywords);
            }
            return Err(IesError::MalformedHeader {
                tilt: tilt.to_owned(),
            });
        }
    }

    Err(IesError::missing(MissingInput::Tilt))
}

fn read_ascending_angles<'a, I>(
    tokens: &mut Tokens<I>,
    count: usize,
    axis: AngleAxis,
    max_delta: f32,
) -> Result<(Vec<f32>, f32)>
where
    I: Iterator<Item = &'a str>,
{
    let field = match axis {
        AngleAxis::Vertical => DataField::VerticalAngle,
        AngleAxis::Horizontal => DataField::HorizontalAngle,
    };

    let mut angles = Vec::new();
    let mut previous = f32::NEG_INFINITY;
    let mut min_delta = max_delta;

    for _ in 0..count {
        let angle = tokens.next_float(field)?;
        if angle <= previous {
            return Err(IesError::OrderingViolation { axis, value: angle });
        }

        min_delta = min_delta.min(angle - previous);
        previous = angle;
        angles.push(angle);
    }

    Ok((angles, min_delta))
}

fn split_data_line(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}

/// Positional reader over the numeric block.
struct Tokens<I: Iterator> {
    inner: Peekable<I>,
}

impl<'a, I> Tokens<I>
where
    I: Iterator<Item = &'a str>,
{
    fn new(inner: I) -> Self {
        Self {
            inner: inner.peekable(),
        }
    }

    fn is_exhausted(&mut self) -> bool {
        self.inner.peek().is_none()
    }

    fn next_token(&mut self, field: DataField) -> Result<&'a str> {
        self.inner
            .next()
            .ok_or(IesError::missing(MissingInput::Field(field)))
    }

    fn skip(&mut self, field: DataField) -> Result<()> {
        self.next_token(field).map(|_| ())
    }

    fn next_int(&mut self, field: DataField) -> Result<i32> {
        let token = self.next_token(field)?;
        token
            .parse::<i32>()
            .map_err(|_| IesError::invalid(field, token))
    }

    /// Integer that must be at least 1
    fn next_count(&mut self, field: DataField) -> Result<usize> {
        let count = self.next_int(field)?;
        if count < 1 {
            return Err(IesError::out_of_range(field, count));
        }
        Ok(count as usize)
    }

    fn next_float(&mut self, field: DataField) -> Result<f32> {
        let token = self.next_token(field)?;
        match token.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(IesError::invalid(field, token)),
        }
    }
}
