use serde::{Deserialize, Serialize};

use crate::kitchen::constants::{DEFAULT_FUEL_CAPACITY, DEFAULT_FUEL_PER_TICK};

/// Heat source a pot cooks over.
pub trait FuelSource {
    fn has_fuel(&self) -> bool;

    /// Called once for every tick the pot actually cooked.
    fn notify_consumed_this_tick(&mut self);
}

/// A refuelable burner that spends a fixed amount of fuel per cooking tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelTank {
    pub fuel: f64,
    pub capacity: f64,
    pub consumption_per_tick: f64,
}

impl Default for FuelTank {
    fn default() -> Self {
        Self {
            fuel: 0.0,
            capacity: DEFAULT_FUEL_CAPACITY,
            consumption_per_tick: DEFAULT_FUEL_PER_TICK,
        }
    }
}

impl FuelTank {
    /// A tank filled to capacity.
    pub fn full() -> Self {
        let mut tank = Self::default();
        tank.fuel = tank.capacity;
        tank
    }

    /// Add fuel, clamped to capacity. Returns the amount accepted.
    pub fn refuel(&mut self, amount: f64) -> f64 {
        if amount <= 0.0 {
            return 0.0;
        }
        let accepted = amount.min(self.capacity - self.fuel).max(0.0);
        self.fuel += accepted;
        accepted
    }

    pub fn drain(&mut self) {
        self.fuel = 0.0;
    }

    pub fn fuel_percent(&self) -> f64 {
        if self.capacity > 0.0 {
            self.fuel / self.capacity
        } else {
            0.0
        }
    }
}

impl FuelSource for FuelTank {
    fn has_fuel(&self) -> bool {
        self.fuel > 0.0
    }

    fn notify_consumed_this_tick(&mut self) {
        self.fuel = (self.fuel - self.consumption_per_tick).max(0.0);
    }
}
