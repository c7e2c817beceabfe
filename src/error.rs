use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
	#[error("Invalid coordinate: {0:?}")]
	InvalidCoordinate(String),
	#[error("Weight must be greater than 0 kg (got {0})")]
	NonPositiveWeight(f64),
	#[error("Capacity must be greater than 0 kg (got {0})")]
	NonPositiveCapacity(f64),
	#[error("Max range must be greater than 0 km (got {0})")]
	NonPositiveRange(f64),
	#[error("Average speed must be greater than 0 km/h (got {0})")]
	NonPositiveSpeed(f64),
	#[error("Invalid priority: {0:?} (expected low, medium or high)")]
	InvalidPriority(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripError {
	#[error("Drone #{0} has no orders to deliver")]
	EmptyQueue(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
	#[error("Order #{0} is already registered")]
	DuplicateOrder(u32),
	#[error("Drone #{0} is already registered")]
	DuplicateDrone(u32),
	#[error(transparent)]
	Trip(#[from] TripError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Cannot read config: {0}")]
	Io(#[from] std::io::Error),
	#[error("Malformed config: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Invalid span for {field}: min {min} must be > 0 and <= max {max}")]
	InvalidSpan { field: &'static str, min: u32, max: u32 },
}

#[derive(Debug, Error)]
pub enum GeneratorError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error(transparent)]
	Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum ScenarioError {
	#[error("Cannot read scenario: {0}")]
	Io(#[from] std::io::Error),
	#[error("Malformed scenario: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Unsupported scenario version: {0}")]
	UnsupportedVersion(u32),
	#[error(transparent)]
	Validation(#[from] ValidationError),
	#[error(transparent)]
	Engine(#[from] EngineError),
}
