//! Air quality index derived from a pm2.5 concentration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    VeryPoor,
    Severe,
}

impl AqiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Satisfactory => "Satisfactory",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqiResult {
    pub index: u16,
    pub category: AqiCategory,
}

/// Upper bounds are inclusive; the first matching bound wins.
const BANDS: [(f64, u16, AqiCategory); 5] = [
    (30.0, 50, AqiCategory::Good),
    (60.0, 100, AqiCategory::Satisfactory),
    (90.0, 200, AqiCategory::Moderate),
    (120.0, 300, AqiCategory::Poor),
    (250.0, 400, AqiCategory::VeryPoor),
];

/// Map a pm2.5 concentration (μg/m³) to an index and category.
pub fn compute_aqi(pm25: f64) -> AqiResult {
    BANDS
        .iter()
        .find(|(upper, _, _)| pm25 <= *upper)
        .map(|&(_, index, category)| AqiResult { index, category })
        .unwrap_or(AqiResult { index: 500, category: AqiCategory::Severe })
}
