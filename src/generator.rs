use rand::Rng;

use crate::config::{GeneratorConfig, Span};
use crate::coords::{Coordinate, MAX_COLUMN, MAX_ROW};
use crate::drones::Drone;
use crate::error::{GeneratorError, ValidationError};
use crate::orders::Order;
use crate::priority::Priority;

pub fn random_coordinate<R: Rng + ?Sized>(rng: &mut R) -> Result<Coordinate, ValidationError> {
    Coordinate::new(rng.gen_range(1..=MAX_COLUMN), rng.gen_range(1..=MAX_ROW))
}

fn draw<R: Rng + ?Sized>(rng: &mut R, span: Span) -> f64 {
    f64::from(rng.gen_range(span.min..=span.max))
}

/// A fleet that shares one randomly placed base.
pub fn generate_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GeneratorConfig,
) -> Result<Vec<Drone>, GeneratorError> {
    config.validate()?;
    let base = random_coordinate(rng)?;
    let mut fleet = Vec::with_capacity(config.drone_count);
    for _ in 0..config.drone_count {
        let capacity = draw(rng, config.capacity);
        let max_range = draw(rng, config.max_range);
        let speed = draw(rng, config.speed);
        fleet.push(Drone::with_origin(capacity, max_range, base, speed)?);
    }
    Ok(fleet)
}

/// Random orders, none of them placed on `base`.
pub fn generate_orders<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GeneratorConfig,
    base: Coordinate,
) -> Result<Vec<Order>, GeneratorError> {
    config.validate()?;
    let mut orders = Vec::with_capacity(config.order_count);
    for _ in 0..config.order_count {
        let location = loop {
            let c = random_coordinate(rng)?;
            if c != base {
                break c;
            }
        };
        let weight = draw(rng, config.weight);
        let priority = Priority::ALL[rng.gen_range(0..Priority::ALL.len())];
        orders.push(Order::with_priority(location, weight, priority)?);
    }
    Ok(orders)
}
