use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MAX_COLUMN: u8 = 9;
pub const MAX_ROW: u8 = 26;

/// A cell of the delivery grid: column 1..=9, row A..=Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    column: u8,
    row: u8, // 1-based alphabet position
}

impl Coordinate {
    pub fn new(column: u8, row: u8) -> Result<Self, ValidationError> {
        if !(1..=MAX_COLUMN).contains(&column) || !(1..=MAX_ROW).contains(&row) {
            return Err(ValidationError::InvalidCoordinate(format!("{column},{row}")));
        }
        Ok(Self { column, row })
    }

    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidCoordinate(token.to_string());
        let mut chars = token.chars();
        let (Some(col), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let column = match col {
            '1'..='9' => col as u8 - b'0',
            _ => return Err(invalid()),
        };
        if !row.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let row = row.to_ascii_uppercase() as u8 - b'A' + 1;
        Ok(Self { column, row })
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn row_letter(&self) -> char {
        (b'A' + self.row - 1) as char
    }

    /// Euclidean distance on the unit grid, in km.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let dx = f64::from(other.column) - f64::from(self.column);
        let dy = f64::from(other.row) - f64::from(self.row);
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row_letter())
    }
}

impl FromStr for Coordinate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Coordinate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Coordinate> for String {
    fn from(c: Coordinate) -> Self {
        c.to_string()
    }
}

pub fn validate(token: &str) -> bool {
    Coordinate::parse(token).is_ok()
}

/// Distance between two raw location tokens.
pub fn distance(a: &str, b: &str) -> Result<f64, ValidationError> {
    let a = Coordinate::parse(a)?;
    let b = Coordinate::parse(b)?;
    Ok(a.distance_to(&b))
}
