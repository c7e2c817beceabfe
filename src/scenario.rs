use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coords::Coordinate;
use crate::drones::Drone;
use crate::engine::Engine;
use crate::error::ScenarioError;
use crate::orders::Order;
use crate::priority::Priority;

pub const SCENARIO_VERSION: u32 = 1;

/// A fixed set of drones and orders, as loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
	pub version: u32,
	pub drones: Vec<DroneSpec>,
	#[serde(default)]
	pub orders: Vec<OrderSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneSpec {
	pub capacity: f64,
	#[serde(alias = "range")]
	pub max_range: f64,
	pub origin: Coordinate,
	pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSpec {
	pub location: Coordinate,
	pub weight: f64,
	pub priority: Priority,
}

impl Scenario {
	pub fn from_json_str(s: &str) -> Result<Self, ScenarioError> {
		Ok(serde_json::from_str(s)?)
	}

	pub fn from_file(path: &Path) -> Result<Self, ScenarioError> {
		let contents = fs::read_to_string(path)?;
		Self::from_json_str(&contents)
	}

	/// Registers drones first, then orders, both in file order.
	pub fn build_engine(&self) -> Result<Engine, ScenarioError> {
		if self.version != SCENARIO_VERSION {
			return Err(ScenarioError::UnsupportedVersion(self.version));
		}
		let mut engine = Engine::new();
		for d in &self.drones {
			engine.add_drone(Drone::with_origin(d.capacity, d.max_range, d.origin, d.speed)?)?;
		}
		for o in &self.orders {
			engine.add_order(Order::with_priority(o.location, o.weight, o.priority)?)?;
		}
		Ok(engine)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ValidationError;
	use serde_json::json;

	#[test]
	fn parse_and_build() {
		let scenario_json = json!({
			"version": 1,
			"drones": [
				{ "capacity": 30, "range": 20, "origin": "3c", "speed": 15 }
			],
			"orders": [
				{ "location": "5A", "weight": 10, "priority": "alta" },
				{ "location": "2b", "weight": 2.5, "priority": "Low" }
			]
		});
		let scenario: Scenario = serde_json::from_value(scenario_json).unwrap();
		let engine = scenario.build_engine().unwrap();
		assert_eq!(engine.drones().len(), 1);
		assert_eq!(engine.orders().len(), 2);
		assert_eq!(engine.orders()[1].location().to_string(), "2B");
		assert_eq!(engine.orders()[1].priority(), Priority::Low);
		assert_eq!(engine.drones()[0].max_range(), 20.0);
	}

	#[test]
	fn bad_tokens_fail_at_parse_time() {
		let bad_location = r#"{ "version": 1, "drones": [], "orders": [{ "location": "0A", "weight": 1, "priority": "alta" }] }"#;
		assert!(matches!(Scenario::from_json_str(bad_location), Err(ScenarioError::Json(_))));
		let bad_priority = r#"{ "version": 1, "drones": [], "orders": [{ "location": "1A", "weight": 1, "priority": "now" }] }"#;
		assert!(matches!(Scenario::from_json_str(bad_priority), Err(ScenarioError::Json(_))));
	}

	#[test]
	fn build_rejects_invalid_values() {
		let s = Scenario::from_json_str(
			r#"{ "version": 1, "drones": [{ "capacity": 0, "max_range": 5, "origin": "1A", "speed": 5 }] }"#,
		)
		.unwrap();
		assert!(matches!(
			s.build_engine(),
			Err(ScenarioError::Validation(ValidationError::NonPositiveCapacity(_)))
		));
	}

	#[test]
	fn unknown_version() {
		let s = Scenario::from_json_str(r#"{ "version": 2, "drones": [] }"#).unwrap();
		assert!(matches!(s.build_engine(), Err(ScenarioError::UnsupportedVersion(2))));
	}
}
