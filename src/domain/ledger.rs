//! Cash and position-value ledger.
//!
//! Portfolio value is derived, never stored: it is always cash plus the
//! mark-to-market value of the open positions, so it cannot drift out of
//! sync with its parts.

#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    cash: f64,
    position_value: f64,
}

impl Ledger {
    pub fn new(initial_cash: f64) -> Self {
        Ledger {
            cash: initial_cash,
            position_value: 0.0,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn position_value(&self) -> f64 {
        self.position_value
    }

    pub fn portfolio_value(&self) -> f64 {
        self.cash + self.position_value
    }

    pub fn can_afford(&self, cost: f64) -> bool {
        self.cash >= cost
    }

    /// Replace position value with the freshly marked values of the open
    /// positions. Must run before any other per-tick read of valuation.
    pub fn mark_to_market(&mut self, marks: impl IntoIterator<Item = f64>) {
        self.position_value = marks.into_iter().sum();
    }

    /// Reserve cash for a newly opened position at its entry cost.
    pub fn apply_open(&mut self, cost: f64) {
        self.cash -= cost;
        self.position_value += cost;
    }

    /// Credit close proceeds back to cash. For shorts the proceeds are not
    /// the original cost basis; the caller computes them per direction.
    pub fn apply_close(&mut self, proceeds: f64) {
        self.cash += proceeds;
        self.position_value -= proceeds;
    }
}
