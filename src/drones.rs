use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;
use tracing::{debug, info};

use crate::coords::Coordinate;
use crate::error::{TripError, ValidationError};
use crate::orders::Order;

pub const BATTERY_FULL: u8 = 100;
/// Orders are only accepted while the battery is strictly above this level.
pub const MIN_BATTERY_TO_ACCEPT: u8 = 30;
/// A leg ending at or below this level triggers an immediate recharge.
pub const RECHARGE_AT: u8 = 30;
pub const DRAIN_DISTANCE_KM: f64 = 5.0;
pub const DRAIN_AMOUNT: u8 = 10;
/// Slack on the capacity check so float residue in `load` cannot reject an
/// order that fits exactly.
const LOAD_EPSILON_KG: f64 = 1e-9;

static NEXT_DRONE_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DroneStatus {
	Idle,
	Loaded,
	InFlight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
	pub order_id: u32,
	pub from: Coordinate,
	pub to: Coordinate,
	pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
	pub drone_id: u32,
	pub delivered: u32,
	pub legs: Vec<Leg>,
	pub hours: f64,
	pub recharges: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Drone {
	id: u32,
	status: DroneStatus,
	capacity: f64,
	max_range: f64,
	origin: Coordinate,
	location: Coordinate,
	battery: u8,
	speed: f64,
	queue: VecDeque<Order>,
	load: f64,
	delivered_count: u32,
	cumulative_time: f64,
}

impl Drone {
	pub fn new(capacity: f64, max_range: f64, origin: &str, speed: f64) -> Result<Self, ValidationError> {
		Self::with_origin(capacity, max_range, Coordinate::parse(origin)?, speed)
	}

	pub fn with_origin(
		capacity: f64,
		max_range: f64,
		origin: Coordinate,
		speed: f64,
	) -> Result<Self, ValidationError> {
		if !(capacity > 0.0) {
			return Err(ValidationError::NonPositiveCapacity(capacity));
		}
		if !(max_range > 0.0) {
			return Err(ValidationError::NonPositiveRange(max_range));
		}
		if !(speed > 0.0) {
			return Err(ValidationError::NonPositiveSpeed(speed));
		}
		Ok(Self {
			id: NEXT_DRONE_ID.fetch_add(1, Ordering::Relaxed),
			status: DroneStatus::Idle,
			capacity,
			max_range,
			origin,
			location: origin,
			battery: BATTERY_FULL,
			speed,
			queue: VecDeque::new(),
			load: 0.0,
			delivered_count: 0,
			cumulative_time: 0.0,
		})
	}

	pub fn can_reach(&self, target: Coordinate) -> bool {
		target.distance_to(&self.origin) <= self.max_range
	}

	pub fn can_accept(&self, order: &Order) -> bool {
		!order.is_delivered()
			&& self.can_reach(order.location())
			&& self.remaining_capacity() + LOAD_EPSILON_KG >= order.weight()
			&& self.battery > MIN_BATTERY_TO_ACCEPT
	}

	/// Queues the order at the tail. Returns false and leaves the drone
	/// untouched when the order is not acceptable right now.
	pub fn accept(&mut self, order: &Order) -> bool {
		if !self.can_accept(order) {
			return false;
		}
		self.load = (self.load + order.weight()).min(self.capacity);
		self.queue.push_back(order.clone());
		self.status = DroneStatus::Loaded;
		debug!(
			drone = self.id,
			order = order.id(),
			remaining_kg = self.remaining_capacity(),
			"order accepted"
		);
		true
	}

	/// Flies every queued order in FIFO order and returns to base.
	///
	/// A mid-trip recharge also snaps the location back to the origin, so the
	/// next leg is measured from the base rather than the last stop, while the
	/// drain check keeps measuring from the last stop.
	// FIXME: split recharging from returning to base; a mid-trip recharge
	// understates the distance actually flown.
	pub fn execute_trip(&mut self) -> Result<TripSummary, TripError> {
		if self.queue.is_empty() {
			return Err(TripError::EmptyQueue(self.id));
		}
		self.status = DroneStatus::InFlight;
		let mut summary = TripSummary {
			drone_id: self.id,
			delivered: 0,
			legs: Vec::with_capacity(self.queue.len()),
			hours: 0.0,
			recharges: 0,
		};
		let mut previous_stop = self.origin;
		while let Some(order) = self.queue.pop_front() {
			let target = order.location();
			let leg_km = self.location.distance_to(&target);
			let hours = leg_km / self.speed;
			self.cumulative_time += hours;
			summary.hours += hours;
			summary.legs.push(Leg { order_id: order.id(), from: self.location, to: target, distance_km: leg_km });
			self.location = target;
			self.load -= order.weight();
			self.delivered_count += 1;
			summary.delivered += 1;
			if previous_stop.distance_to(&self.location) >= DRAIN_DISTANCE_KM {
				self.battery = self.battery.saturating_sub(DRAIN_AMOUNT);
			}
			previous_stop = self.location;
			debug!(drone = self.id, order = order.id(), km = leg_km, battery = self.battery, "leg flown");
			if self.battery <= RECHARGE_AT {
				debug!(drone = self.id, battery = self.battery, "recharging mid-trip");
				self.recharge();
				summary.recharges += 1;
			}
		}
		// Empty queue means empty hold; drop float residue from the subtractions.
		self.load = 0.0;
		self.recharge();
		self.status = DroneStatus::Idle;
		info!(
			drone = self.id,
			delivered = summary.delivered,
			hours = summary.hours,
			"trip finished"
		);
		Ok(summary)
	}

	/// Resets the battery to full and puts the drone back at its origin.
	pub fn recharge(&mut self) {
		self.battery = BATTERY_FULL;
		self.location = self.origin;
	}

	pub fn id(&self) -> u32 {
		self.id
	}
	pub fn status(&self) -> DroneStatus {
		self.status
	}
	pub fn capacity(&self) -> f64 {
		self.capacity
	}
	pub fn remaining_capacity(&self) -> f64 {
		self.capacity - self.load
	}
	pub fn load(&self) -> f64 {
		self.load
	}
	pub fn max_range(&self) -> f64 {
		self.max_range
	}
	pub fn origin(&self) -> Coordinate {
		self.origin
	}
	pub fn location(&self) -> Coordinate {
		self.location
	}
	pub fn battery(&self) -> u8 {
		self.battery
	}
	pub fn speed(&self) -> f64 {
		self.speed
	}
	pub fn queue_len(&self) -> usize {
		self.queue.len()
	}
	pub fn queued_order_ids(&self) -> Vec<u32> {
		self.queue.iter().map(Order::id).collect()
	}
	pub fn delivered_count(&self) -> u32 {
		self.delivered_count
	}
	/// Hours spent flying across all trips.
	pub fn cumulative_time(&self) -> f64 {
		self.cumulative_time
	}
}

impl fmt::Display for Drone {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Drone #{} | Capacity: {}kg | Max range: {}km | Location: {} | Avg speed: {}km/h | Battery: {}%",
			self.id, self.capacity, self.max_range, self.location, self.speed, self.battery
		)
	}
}
