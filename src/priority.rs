use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Priority {
	Low = 1,
	Medium = 2,
	High = 3,
}

impl Priority {
	pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

	pub fn rank(self) -> u8 {
		self as u8
	}

	pub fn label(self) -> &'static str {
		match self {
			Priority::Low => "Low",
			Priority::Medium => "Medium",
			Priority::High => "High",
		}
	}
}

impl fmt::Display for Priority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

impl FromStr for Priority {
	type Err = ValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"low" | "baixa" => Ok(Priority::Low),
			"medium" | "media" | "média" => Ok(Priority::Medium),
			"high" | "alta" => Ok(Priority::High),
			_ => Err(ValidationError::InvalidPriority(s.to_string())),
		}
	}
}

impl TryFrom<String> for Priority {
	type Error = ValidationError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Priority> for String {
	fn from(p: Priority) -> Self {
		p.label().to_lowercase()
	}
}
