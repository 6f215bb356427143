use std::fmt;

/// Predicted solar power output for one request. Ephemeral: created per
/// request, displayed, then discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedPower {
    kilowatts: f64,
}

impl PredictedPower {
    pub fn from_kilowatts(kilowatts: f64) -> Self {
        Self { kilowatts }
    }

    pub fn kilowatts(&self) -> f64 {
        self.kilowatts
    }
}

impl fmt::Display for PredictedPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kW", self.kilowatts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals_with_unit() {
        assert_eq!(PredictedPower::from_kilowatts(3.456).to_string(), "3.46 kW");
        assert_eq!(PredictedPower::from_kilowatts(0.0).to_string(), "0.00 kW");
        assert_eq!(PredictedPower::from_kilowatts(12.0).to_string(), "12.00 kW");
    }
}
