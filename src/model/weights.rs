use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseDimensionError, RouteError};

/// The scalar attribute of an edge used as the relaxation metric for one query.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WeightDimension {
    #[default]
    Distance,
    TravelTime,
    Cost,
}

impl WeightDimension {
    pub const ALL: [WeightDimension; 3] = [Self::Distance, Self::TravelTime, Self::Cost];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::TravelTime => "travel_time",
            Self::Cost => "cost",
        }
    }
}

impl fmt::Display for WeightDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightDimension {
    type Err = ParseDimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "distance" => Ok(Self::Distance),
            "travel_time" | "time" => Ok(Self::TravelTime),
            "cost" => Ok(Self::Cost),
            _ => Err(ParseDimensionError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightVector {
    pub distance: f64,
    pub travel_time: f64,
    pub cost: f64,
}

impl WeightVector {
    pub fn new(distance: f64, travel_time: f64, cost: f64) -> Self {
        Self {
            distance,
            travel_time,
            cost,
        }
    }

    pub fn get(&self, dimension: WeightDimension) -> f64 {
        match dimension {
            WeightDimension::Distance => self.distance,
            WeightDimension::TravelTime => self.travel_time,
            WeightDimension::Cost => self.cost,
        }
    }

    /// Rejects the first component, in [`WeightDimension::ALL`] order, that is
    /// negative, infinite or NaN.
    pub fn validate(&self) -> Result<(), RouteError> {
        for dimension in WeightDimension::ALL {
            let value = self.get(dimension);
            if !value.is_finite() || value < 0.0 {
                return Err(RouteError::InvalidWeight { dimension, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_reads_selected_component() {
        let w = WeightVector::new(10.0, 2.0, 5.0);
        assert_eq!(w.get(WeightDimension::Distance), 10.0);
        assert_eq!(w.get(WeightDimension::TravelTime), 2.0);
        assert_eq!(w.get(WeightDimension::Cost), 5.0);
    }

    #[test]
    fn validate_names_first_bad_dimension() {
        let err = WeightVector::new(1.0, -2.0, f64::NAN).validate().unwrap_err();
        assert_eq!(
            err,
            RouteError::InvalidWeight {
                dimension: WeightDimension::TravelTime,
                value: -2.0,
            }
        );
        assert!(WeightVector::new(0.0, 0.0, 0.0).validate().is_ok());
        assert!(WeightVector::new(f64::INFINITY, 0.0, 0.0).validate().is_err());
    }

    #[test]
    fn dimension_parses_user_spellings() {
        assert_eq!("distance".parse(), Ok(WeightDimension::Distance));
        assert_eq!("Travel-Time".parse(), Ok(WeightDimension::TravelTime));
        assert_eq!("time".parse(), Ok(WeightDimension::TravelTime));
        assert_eq!(" cost ".parse(), Ok(WeightDimension::Cost));
        assert!("speed".parse::<WeightDimension>().is_err());
    }

    #[test]
    fn dimension_display_matches_serde_name() {
        for dimension in WeightDimension::ALL {
            let json = serde_json::to_string(&dimension).unwrap();
            assert_eq!(json, format!("\"{dimension}\""));
        }
    }
}
