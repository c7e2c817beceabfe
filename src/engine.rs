use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::coords::Coordinate;
use crate::drones::{Drone, TripSummary};
use crate::error::EngineError;
use crate::orders::Order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineState {
	Idle,
	Running,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
	pub drone_id: u32,
	pub order_ids: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocationOutcome {
	/// False when there was nothing to do (no drones, or no undelivered orders).
	pub performed: bool,
	pub assignments: Vec<Assignment>,
	pub trips: Vec<TripSummary>,
}

impl AllocationOutcome {
	pub fn accepted(&self) -> usize {
		self.assignments.iter().map(|a| a.order_ids.len()).sum()
	}
}

/// Owns every registered order and drone and runs allocation passes over them.
#[derive(Debug)]
pub struct Engine {
	orders: Vec<Order>,
	drones: Vec<Drone>,
	state: EngineState,
}

impl Default for Engine {
	fn default() -> Self {
		Self::new()
	}
}

impl Engine {
	pub fn new() -> Self {
		Self { orders: Vec::new(), drones: Vec::new(), state: EngineState::Idle }
	}

	pub fn add_order(&mut self, order: Order) -> Result<u32, EngineError> {
		let id = order.id();
		if self.orders.iter().any(|o| o.id() == id) {
			return Err(EngineError::DuplicateOrder(id));
		}
		self.orders.push(order);
		Ok(id)
	}

	pub fn add_drone(&mut self, drone: Drone) -> Result<u32, EngineError> {
		let id = drone.id();
		if self.drones.iter().any(|d| d.id() == id) {
			return Err(EngineError::DuplicateDrone(id));
		}
		self.drones.push(drone);
		Ok(id)
	}

	pub fn orders(&self) -> &[Order] {
		&self.orders
	}

	pub fn drones(&self) -> &[Drone] {
		&self.drones
	}

	pub fn order(&self, id: u32) -> Option<&Order> {
		self.orders.iter().find(|o| o.id() == id)
	}

	pub fn drone(&self, id: u32) -> Option<&Drone> {
		self.drones.iter().find(|d| d.id() == id)
	}

	pub fn state(&self) -> EngineState {
		self.state
	}

	pub fn pending_count(&self) -> usize {
		self.orders.iter().filter(|o| !o.is_delivered()).count()
	}

	/// Base used for the proximity tie-break: the first registered drone's origin.
	pub fn reference_origin(&self) -> Option<Coordinate> {
		self.drones.first().map(Drone::origin)
	}

	/// Runs one allocation pass: matches pending orders to drones and flies
	/// every drone that ended up with a non-empty queue.
	pub fn allocate(&mut self) -> Result<AllocationOutcome, EngineError> {
		let Some(base) = self.reference_origin() else {
			warn!("allocation skipped: no drones registered");
			return Ok(AllocationOutcome::default());
		};
		if self.orders.iter().all(Order::is_delivered) {
			warn!(orders = self.orders.len(), "allocation skipped: no pending orders");
			return Ok(AllocationOutcome::default());
		}

		self.state = EngineState::Running;
		let result = self.run_pass(base);
		self.state = EngineState::Idle;
		result
	}

	fn run_pass(&mut self, base: Coordinate) -> Result<AllocationOutcome, EngineError> {
		let drone_order = self.drones_by_priority();
		let mut pending = self.pending_by_priority(base);
		let Self { orders, drones, .. } = self;
		let mut outcome = AllocationOutcome { performed: true, ..Default::default() };

		for di in drone_order {
			let drone = &mut drones[di];
			let eligible: Vec<usize> = pending
				.iter()
				.copied()
				.filter(|&oi| drone.can_accept(&orders[oi]))
				.collect();

			let mut claimed = Vec::new();
			for oi in eligible {
				if drone.accept(&orders[oi]) {
					orders[oi].mark_delivered();
					claimed.push(oi);
				}
			}
			// Dropping an index from `pending` is what makes the claim exclusive.
			let claimed_set: HashSet<usize> = claimed.iter().copied().collect();
			pending.retain(|oi| !claimed_set.contains(oi));

			if !claimed.is_empty() {
				outcome.assignments.push(Assignment {
					drone_id: drone.id(),
					order_ids: claimed.iter().map(|&oi| orders[oi].id()).collect(),
				});
			}
			if drone.queue_len() > 0 {
				outcome.trips.push(drone.execute_trip()?);
			}
		}

		info!(
			accepted = outcome.accepted(),
			trips = outcome.trips.len(),
			still_pending = pending.len(),
			"allocation pass finished"
		);
		Ok(outcome)
	}

	/// Capacity descending, then range ascending. Stable, so equal drones keep
	/// registration order.
	fn drones_by_priority(&self) -> Vec<usize> {
		let mut idx: Vec<usize> = (0..self.drones.len()).collect();
		idx.sort_by(|&a, &b| {
			let (a, b) = (&self.drones[a], &self.drones[b]);
			b.capacity()
				.total_cmp(&a.capacity())
				.then_with(|| a.max_range().total_cmp(&b.max_range()))
		});
		idx
	}

	/// Undelivered orders: priority descending, weight ascending, then distance
	/// from `base` ascending.
	fn pending_by_priority(&self, base: Coordinate) -> Vec<usize> {
		let mut idx: Vec<usize> = (0..self.orders.len()).filter(|&i| !self.orders[i].is_delivered()).collect();
		idx.sort_by(|&a, &b| compare_pending(&self.orders[a], &self.orders[b], base));
		idx
	}

	/// Repeats `allocate` until a pass has nothing to do or accepts nothing.
	/// Returns how many passes delivered at least one order.
	pub fn run_until_idle(&mut self, max_rounds: usize) -> Result<usize, EngineError> {
		let mut productive = 0;
		for _ in 0..max_rounds {
			let outcome = self.allocate()?;
			if !outcome.performed || outcome.accepted() == 0 {
				break;
			}
			productive += 1;
		}
		Ok(productive)
	}
}

fn compare_pending(a: &Order, b: &Order, base: Coordinate) -> Ordering {
	b.priority()
		.cmp(&a.priority())
		.then_with(|| a.weight().total_cmp(&b.weight()))
		.then_with(|| a.location().distance_to(&base).total_cmp(&b.location().distance_to(&base)))
}
