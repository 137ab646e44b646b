use std::fmt::{Display, Formatter, Result as FmtResult};

/// The columns of a course record, named as they appear on the wire and in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CourseNumber,
    Dept,
    Level,
    Hours,
    Name,
    Description,
}

impl Field {
    pub fn column(self) -> &'static str {
        match self {
            Self::CourseNumber => "Course_Number",
            Self::Dept => "Dept",
            Self::Level => "Level",
            Self::Hours => "Hours",
            Self::Name => "Name",
            Self::Description => "Description",
        }
    }

    /// Width of the backing VARCHAR column, if the field is a string
    pub fn max_len(self) -> Option<usize> {
        match self {
            Self::CourseNumber => Some(45),
            Self::Dept => Some(25),
            Self::Name => Some(45),
            Self::Description => Some(255),
            Self::Level | Self::Hours => None,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.column())
    }
}

/// Reasons a course payload is rejected before it reaches the database
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field was absent, null, or blank
    Missing(Field),
    /// A string field exceeds its column width
    TooLong { field: Field, max: usize },
    /// An update tried to change the primary key
    KeyChange,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Missing(field) => write!(f, "{field} is required"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::KeyChange => write!(f, "Course_Number cannot be changed"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Canonical form of `Course_Number` and `Dept` values: trimmed and upper-cased
pub fn normalize_code(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Rejects absent or blank values for a required field
pub fn require(field: Field, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ValidationError::Missing(field)),
    }
}

/// Checks a string value against the column width of `field`
pub fn check_len(field: Field, value: &str) -> Result<(), ValidationError> {
    match field.max_len() {
        Some(max) if value.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}
