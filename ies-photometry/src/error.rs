//! Error types for IES parsing

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Positional field of the numeric block that follows `TILT=NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataField {
    LampCount,
    LumensPerLamp,
    CandelaMultiplier,
    VerticalAngleCount,
    HorizontalAngleCount,
    PhotometricType,
    LuminousDimensionUnitType,
    LuminousDimensionWidth,
    LuminousDimensionLength,
    LuminousDimensionHeight,
    BallastFactor,
    FutureUse,
    InputWatts,
    VerticalAngle,
    HorizontalAngle,
    CandelaValue,
}

impl DataField {
    /// Human-readable field name used in error messages
    pub fn description(self) -> &'static str {
        match self {
            DataField::LampCount => "lamp count",
            DataField::LumensPerLamp => "lumens per lamp",
            DataField::CandelaMultiplier => "candela multiplier",
            DataField::VerticalAngleCount => "vertical angle count",
            DataField::HorizontalAngleCount => "horizontal angle count",
            DataField::PhotometricType => "photometric type",
            DataField::LuminousDimensionUnitType => "luminous dimension unit type",
            DataField::LuminousDimensionWidth => "luminous dimension width",
            DataField::LuminousDimensionLength => "luminous dimension length",
            DataField::LuminousDimensionHeight => "luminous dimension height",
            DataField::BallastFactor => "ballast factor",
            DataField::FutureUse => "future use",
            DataField::InputWatts => "input watts",
            DataField::VerticalAngle => "vertical angle",
            DataField::HorizontalAngle => "horizontal angle",
            DataField::CandelaValue => "candela",
        }
    }
}

impl DataField {
    /// Field name used when a readable value falls outside the accepted range
    pub fn range_description(self) -> &'static str {
        match self {
            DataField::VerticalAngleCount => "number of vertical angles",
            DataField::HorizontalAngleCount => "number of horizontal angles",
            other => other.description(),
        }
    }
}

impl fmt::Display for DataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Why a positional token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFailure {
    /// Not a finite number of the field's kind
    Unreadable,
    OutOfRange,
}

fn field_failure_message(field: &DataField, failure: &FieldFailure, value: &str) -> String {
    match failure {
        FieldFailure::Unreadable => format!("Invalid {} value: {}", field, value),
        FieldFailure::OutOfRange => format!("Invalid {}: {}", field.range_description(), value),
    }
}

/// Angle table of the candela grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleAxis {
    Vertical,
    Horizontal,
}

impl fmt::Display for AngleAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleAxis::Vertical => f.write_str("Vertical"),
            AngleAxis::Horizontal => f.write_str("Horizontal"),
        }
    }
}

/// What the parser was still waiting for when the input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingInput {
    /// Not even a version line
    EmptyFile,
    /// Keyword block never reached `TILT=NONE`
    Tilt,
    /// Nothing at all after `TILT=NONE`
    IesData,
    Field(DataField),
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingInput::EmptyFile => f.write_str("empty file"),
            MissingInput::Tilt => f.write_str("missing TILT=NONE"),
            MissingInput::IesData => f.write_str("missing IES data"),
            MissingInput::Field(field) => write!(f, "missing {} value", field),
        }
    }
}

/// Errors produced while loading a photometric profile
#[derive(Debug, Error)]
pub enum IesError {
    /// The IES file path does not exist
    #[error("IES file does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be read as text
    #[error("Failed to read IES file: {0}")]
    Io(#[from] std::io::Error),

    /// `TILT=` names something other than `NONE`
    #[error("TILT format not supported: TILT={tilt}")]
    MalformedHeader { tilt: String },

    /// A token could not be read as its field, or is out of range
    #[error("{}", field_failure_message(.field, .failure, .value))]
    FieldParse {
        field: DataField,
        failure: FieldFailure,
        value: String,
    },

    /// An angle table is not strictly ascending
    #[error("{axis} angles are not in ascending order near: {value}")]
    OrderingViolation { axis: AngleAxis, value: f32 },

    /// Input ended before the grammar was complete
    #[error("Premature end of file ({expected})")]
    PrematureEndOfFile { expected: MissingInput },
}

impl IesError {
    pub(crate) fn invalid(field: DataField, value: impl fmt::Display) -> Self {
        IesError::FieldParse {
            field,
            failure: FieldFailure::Unreadable,
            value: value.to_string(),
        }
    }

    pub(crate) fn out_of_range(field: DataField, value: impl fmt::Display) -> Self {
        IesError::FieldParse {
            field,
            failure: FieldFailure::OutOfRange,
            value: value.to_string(),
        }
    }

    pub(crate) fn missing(expected: MissingInput) -> Self {
        IesError::PrematureEndOfFile { expected }
    }
}

/// Result type for profile loading
pub type Result<T> = std::result::Result<T, IesError>;
