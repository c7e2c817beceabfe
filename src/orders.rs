use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

use crate::coords::Coordinate;
use crate::error::ValidationError;
use crate::priority::Priority;

static NEXT_ORDER_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: u32,
    location: Coordinate,
    weight: f64,
    priority: Priority,
    delivered: bool,
}

impl Order {
    pub fn new(location: &str, weight: f64, priority: &str) -> Result<Self, ValidationError> {
        let location = Coordinate::parse(location)?;
        let priority = priority.parse::<Priority>()?;
        Self::with_priority(location, weight, priority)
    }

    pub fn with_priority(
        location: Coordinate,
        weight: f64,
        priority: Priority,
    ) -> Result<Self, ValidationError> {
        // `!(w > 0)` also rejects NaN
        if !(weight > 0.0) {
            return Err(ValidationError::NonPositiveWeight(weight));
        }
        Ok(Self {
            id: NEXT_ORDER_ID.fetch_add(1, Ordering::Relaxed),
            location,
            weight,
            priority,
            delivered: false,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn rank(&self) -> u8 {
        self.priority.rank()
    }

    pub fn is_delivered(&self) -> bool {
        self.delivered
    }

    pub fn mark_delivered(&mut self) {
        self.delivered = true;
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order #{} | Priority: {} | Weight: {}kg | Location: {} | Delivered: {}",
            self.id,
            self.priority,
            self.weight,
            self.location,
            if self.delivered { "yes" } else { "no" }
        )
    }
}
