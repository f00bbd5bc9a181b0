use serde::{Deserialize, Serialize};

/// One converted capital-city entry. Field order here fixes the key order
/// in the serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capital {
    pub country: String,
    pub capital: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: i64,
    pub capital_type: String,
}

/// One CSV data row after header resolution: the six raw string fields plus
/// the 1-based data row number, kept for error reporting.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub row: u64,
    pub country: String,
    pub capital: String,
    pub latitude: String,
    pub longitude: String,
    pub population: String,
    pub capital_type: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<Capital>,
    pub json_output: String,
}
