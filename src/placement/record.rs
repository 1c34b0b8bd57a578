//! One parsed placement line.

use crate::error::FormatErrorKind;
use crate::geometry::Point;

/// An identifier and its placed coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Opaque cell or pad name.
    pub id: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Record {
    /// Create a record.
    #[must_use]
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self { id: id.into(), x, y }
    }

    /// The coordinate as a point.
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Parse `<id> <x> <y>` separated by arbitrary whitespace.
///
/// Returns `Ok(None)` for blank or whitespace-only lines.
///
/// # Example
///
/// ```
/// use placement_viz::placement::parse_line;
///
/// let record = parse_line("p12\t40  7.5").unwrap().unwrap();
/// assert_eq!(record.id, "p12");
/// assert_eq!((record.x, record.y), (40.0, 7.5));
/// assert!(parse_line("   ").unwrap().is_none());
/// ```
pub fn parse_line(line: &str) -> Result<Option<Record>, FormatErrorKind> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let [id, x, y] = tokens.as_slice() else {
        if tokens.is_empty() {
            return Ok(None);
        }
        return Err(FormatErrorKind::TokenCount { found: tokens.len() });
    };

    Ok(Some(Record::new(*id, parse_coordinate('x', x)?, parse_coordinate('y', y)?)))
}

fn parse_coordinate(axis: char, token: &str) -> Result<f64, FormatErrorKind> {
    token
        .parse::<f64>()
        .map_err(|_| FormatErrorKind::InvalidNumber { axis, token: token.to_string() })
}
