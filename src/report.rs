use serde::Serialize;

use crate::coords::Coordinate;
use crate::drones::Drone;
use crate::orders::Order;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopDrone {
	pub id: u32,
	pub delivered: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSummary {
	pub total_delivered: u32,
	pub total_hours: f64,
	pub average_hours_per_delivery: Option<f64>,
	pub top_drone: Option<TopDrone>,
}

impl FleetSummary {
	pub fn from_drones(drones: &[Drone]) -> Self {
		let total_delivered: u32 = drones.iter().map(Drone::delivered_count).sum();
		let total_hours: f64 = drones.iter().map(Drone::cumulative_time).sum();
		let average_hours_per_delivery = (total_delivered > 0).then(|| total_hours / f64::from(total_delivered));
		// First registered drone wins ties.
		let mut top: Option<&Drone> = None;
		for d in drones {
			if d.delivered_count() > top.map_or(0, Drone::delivered_count) {
				top = Some(d);
			}
		}
		Self {
			total_delivered,
			total_hours,
			average_hours_per_delivery,
			top_drone: top.map(|d| TopDrone { id: d.id(), delivered: d.delivered_count() }),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderSort {
	/// Highest priority first.
	Priority,
	/// Lightest first.
	Weight,
	/// Closest to the given base first.
	Distance(Coordinate),
}

pub fn sorted_orders(orders: &[Order], by: OrderSort) -> Vec<&Order> {
	let mut out: Vec<&Order> = orders.iter().collect();
	match by {
		OrderSort::Priority => out.sort_by(|a, b| b.priority().cmp(&a.priority())),
		OrderSort::Weight => out.sort_by(|a, b| a.weight().total_cmp(&b.weight())),
		OrderSort::Distance(base) => {
			out.sort_by(|a, b| a.location().distance_to(&base).total_cmp(&b.location().distance_to(&base)))
		}
	}
	out
}

pub fn format_order_report<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Vec<String> {
	let mut out = vec!["[Orders]".to_string()];
	out.extend(orders.into_iter().map(Order::to_string));
	out
}

pub fn format_drone_report(drones: &[Drone]) -> Vec<String> {
	let mut out = vec!["[Drones]".to_string()];
	for d in drones {
		out.push(format!(
			"{} | Delivered: {} | Flight time: {:.2}h",
			d,
			d.delivered_count(),
			d.cumulative_time()
		));
	}
	out
}

pub fn format_summary(summary: &FleetSummary) -> Vec<String> {
	let mut out = vec![
		"[Summary]".to_string(),
		format!("Deliveries made: {}", summary.total_delivered),
		format!("Total flight time: {:.2}h", summary.total_hours),
	];
	match summary.average_hours_per_delivery {
		Some(avg) => out.push(format!("Average time per delivery: {avg:.2}h")),
		None => out.push("Average time per delivery: n/a".to_string()),
	}
	match summary.top_drone {
		Some(top) => out.push(format!("Most efficient drone: #{} ({} deliveries)", top.id, top.delivered)),
		None => out.push("Most efficient drone: none".to_string()),
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn delivered_fleet() -> Vec<Drone> {
		let mut a = Drone::new(10.0, 10.0, "1A", 10.0).unwrap();
		let mut b = Drone::new(10.0, 10.0, "1A", 10.0).unwrap();
		a.accept(&Order::new("1E", 1.0, "alta").unwrap());
		a.execute_trip().unwrap();
		b.accept(&Order::new("1B", 1.0, "alta").unwrap());
		b.accept(&Order::new("1C", 1.0, "alta").unwrap());
		b.execute_trip().unwrap();
		vec![a, b]
	}

	#[test]
	fn summary_totals() {
		let fleet = delivered_fleet();
		let s = FleetSummary::from_drones(&fleet);
		assert_eq!(s.total_delivered, 3);
		// 4 km + (1 + 1) km at 10 km/h
		assert!((s.total_hours - 0.6).abs() < 1e-9);
		assert!((s.average_hours_per_delivery.unwrap() - 0.2).abs() < 1e-9);
		assert_eq!(s.top_drone.unwrap().id, fleet[1].id());
	}

	#[test]
	fn summary_of_idle_fleet() {
		let fleet = vec![Drone::new(10.0, 10.0, "1A", 10.0).unwrap()];
		let s = FleetSummary::from_drones(&fleet);
		assert_eq!(s.total_delivered, 0);
		assert!(s.average_hours_per_delivery.is_none());
		assert!(s.top_drone.is_none());
		assert!(format_summary(&s).iter().any(|l| l.contains("n/a")));
	}

	#[test]
	fn sorting_orders() {
		let orders = vec![
			Order::new("9Z", 3.0, "baixa").unwrap(),
			Order::new("2B", 7.0, "alta").unwrap(),
			Order::new("5E", 1.0, "media").unwrap(),
		];
		let ids = |v: Vec<&Order>| v.iter().map(|o| o.id()).collect::<Vec<_>>();
		assert_eq!(
			ids(sorted_orders(&orders, OrderSort::Priority)),
			vec![orders[1].id(), orders[2].id(), orders[0].id()]
		);
		assert_eq!(
			ids(sorted_orders(&orders, OrderSort::Weight)),
			vec![orders[2].id(), orders[0].id(), orders[1].id()]
		);
		let base = Coordinate::parse("1A").unwrap();
		assert_eq!(
			ids(sorted_orders(&orders, OrderSort::Distance(base))),
			vec![orders[1].id(), orders[2].id(), orders[0].id()]
		);
	}

	#[test]
	fn reports_list_entries() {
		let fleet = delivered_fleet();
		let lines = format_drone_report(&fleet);
		assert_eq!(lines[0], "[Drones]");
		assert!(lines.iter().any(|l| l.contains(&format!("Drone #{}", fleet[0].id()))));
		let orders = vec![Order::new("3C", 2.5, "media").unwrap()];
		let lines = format_order_report(&orders);
		assert!(lines[1].contains("Weight: 2.5kg"));
		assert!(lines[1].contains("Location: 3C"));
	}
}
