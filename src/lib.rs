pub mod config;
pub mod coords;
pub mod drones;
pub mod engine;
pub mod error;
pub mod generator;
pub mod orders;
pub mod priority;
pub mod report;
pub mod scenario;

// Re-exports for convenience in tests and integration users.
pub use config::{GeneratorConfig, SimulationConfig, Span};
pub use coords::{Coordinate, distance, validate};
pub use drones::{Drone, DroneStatus, Leg, TripSummary};
pub use engine::{AllocationOutcome, Assignment, Engine, EngineState};
pub use error::{ConfigError, EngineError, GeneratorError, ScenarioError, TripError, ValidationError};
pub use generator::{generate_fleet, generate_orders};
pub use orders::Order;
pub use priority::Priority;
pub use report::{FleetSummary, OrderSort, format_drone_report, format_order_report, format_summary, sorted_orders};
pub use scenario::Scenario;
