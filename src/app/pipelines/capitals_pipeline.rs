use crate::core::{Capital, ConfigProvider, Pipeline, RawRow, Storage, TransformResult};
use crate::utils::error::{EtlError, Result};
use serde::Serialize;

/// The six CSV columns the converter requires, in output field order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Country",
    "Capital City",
    "Latitude",
    "Longitude",
    "Population",
    "Capital Type",
];

pub struct CapitalsPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> CapitalsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for CapitalsPipeline<S, C> {
    fn extract(&self) -> Result<Vec<RawRow>> {
        tracing::debug!("Reading CSV input from: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path())?;

        let mut reader = csv::Reader::from_reader(bytes.as_slice());

        // Resolve the six required columns by header name, any column order.
        let headers = reader.headers()?.clone();
        let mut indices = [0usize; 6];
        for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| EtlError::MissingColumn {
                    column: column.to_string(),
                })?;
        }

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let field = |idx: usize| record.get(indices[idx]).unwrap_or_default().to_string();
            rows.push(RawRow {
                row: i as u64 + 1,
                country: field(0),
                capital: field(1),
                latitude: field(2),
                longitude: field(3),
                population: field(4),
                capital_type: field(5),
            });
        }

        Ok(rows)
    }

    fn transform(&self, data: Vec<RawRow>) -> Result<TransformResult> {
        let mut records = Vec::with_capacity(data.len());

        for raw in data {
            records.push(Capital {
                country: raw.country,
                capital: raw.capital,
                latitude: parse_f64(raw.row, "Latitude", &raw.latitude)?,
                longitude: parse_f64(raw.row, "Longitude", &raw.longitude)?,
                population: parse_i64(raw.row, "Population", &raw.population)?,
                capital_type: raw.capital_type,
            });
        }

        let json_output = render_json(&records)?;

        Ok(TransformResult {
            records,
            json_output,
        })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();
        tracing::debug!(
            "Writing {} records to: {}",
            result.records.len(),
            output_path
        );
        self.storage
            .write_file(output_path, result.json_output.as_bytes())?;
        Ok(output_path.to_string())
    }
}

/// Renders the record sequence as a JSON array indented with 4 spaces per
/// level. serde_json's default pretty printer uses 2 spaces, so a custom
/// formatter is needed.
pub fn render_json(records: &[Capital]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8(buf).expect("serialized JSON is UTF-8"))
}

fn parse_f64(row: u64, column: &str, value: &str) -> Result<f64> {
    let coercion_error = || EtlError::CoercionError {
        row,
        column: column.to_string(),
        value: value.to_string(),
        target: "floating-point number",
    };

    let parsed: f64 = value.trim().parse().map_err(|_| coercion_error())?;
    // "inf" and "nan" parse, but JSON has no representation for them
    if !parsed.is_finite() {
        return Err(coercion_error());
    }
    Ok(parsed)
}

fn parse_i64(row: u64, column: &str, value: &str) -> Result<i64> {
    value.trim().parse().map_err(|_| EtlError::CoercionError {
        row,
        column: column.to_string(),
        value: value.to_string(),
        target: "integer",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockStorage {
        files: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Mutex::new(HashMap::new()),
            }
        }

        fn with_file(path: &str, data: &str) -> Self {
            let storage = Self::new();
            storage
                .files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.as_bytes().to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().unwrap().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
                EtlError::InputNotFound {
                    path: path.to_string(),
                }
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn input_path(&self) -> &str {
            "capitals.csv"
        }

        fn output_path(&self) -> &str {
            "capitals.json"
        }
    }

    const SAMPLE_CSV: &str = "\
Country,Capital City,Latitude,Longitude,Population,Capital Type
France,Paris,48.8566,2.3522,2148000,Primary
Japan,Tokyo,35.6897,139.6922,37400068,Primary
";

    #[test]
    fn test_extract_preserves_row_order() {
        let storage = MockStorage::with_file("capitals.csv", SAMPLE_CSV);
        let pipeline = CapitalsPipeline::new(storage, TestConfig);

        let rows = pipeline.extract().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[0].country, "France");
        assert_eq!(rows[1].row, 2);
        assert_eq!(rows[1].capital, "Tokyo");
    }

    #[test]
    fn test_extract_accepts_reordered_columns() {
        let csv = "\
Population,Country,Capital Type,Latitude,Capital City,Longitude
2148000,France,Primary,48.8566,Paris,2.3522
";
        let storage = MockStorage::with_file("capitals.csv", csv);
        let pipeline = CapitalsPipeline::new(storage, TestConfig);

        let rows = pipeline.extract().unwrap();

        assert_eq!(rows[0].country, "France");
        assert_eq!(rows[0].capital, "Paris");
        assert_eq!(rows[0].population, "2148000");
    }

    #[test]
    fn test_extract_missing_column_fails() {
        let csv = "\
Country,Capital City,Latitude,Longitude,Capital Type
France,Paris,48.8566,2.3522,Primary
";
        let storage = MockStorage::with_file("capitals.csv", csv);
        let pipeline = CapitalsPipeline::new(storage, TestConfig);

        let err = pipeline.extract().unwrap_err();
        match err {
            EtlError::MissingColumn { column } => assert_eq!(column, "Population"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_ragged_row_fails() {
        let csv = "\
Country,Capital City,Latitude,Longitude,Population,Capital Type
France,Paris,48.8566
";
        let storage = MockStorage::with_file("capitals.csv", csv);
        let pipeline = CapitalsPipeline::new(storage, TestConfig);

        assert!(matches!(
            pipeline.extract().unwrap_err(),
            EtlError::CsvError(_)
        ));
    }

    #[test]
    fn test_extract_missing_input_fails() {
        let storage = MockStorage::new();
        let pipeline = CapitalsPipeline::new(storage, TestConfig);

        assert!(matches!(
            pipeline.extract().unwrap_err(),
            EtlError::InputNotFound { .. }
        ));
    }

    #[test]
    fn test_transform_coerces_types() {
        let storage = MockStorage::with_file("capitals.csv", SAMPLE_CSV);
        let pipeline = CapitalsPipeline::new(storage, TestConfig);

        let rows = pipeline.extract().unwrap();
        let result = pipeline.transform(rows).unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].latitude, 48.8566);
        assert_eq!(result.records[0].population, 2148000);
        assert_eq!(result.records[1].capital_type, "Primary");
    }

    #[test]
    fn test_transform_tolerates_whitespace_and_leading_zeros() {
        let csv = "\
Country,Capital City,Latitude,Longitude,Population,Capital Type
France,Paris, 048.8566 ,2.3522, 2148000 ,Primary
";
        let storage = MockStorage::with_file("capitals.csv", csv);
        let pipeline = CapitalsPipeline::new(storage, TestConfig);

        let result = pipeline.transform(pipeline.extract().unwrap()).unwrap();

        assert_eq!(result.records[0].latitude, 48.8566);
        assert_eq!(result.records[0].population, 2148000);
    }

    #[test]
    fn test_transform_rejects_non_numeric_latitude() {
        let csv = "\
Country,Capital City,Latitude,Longitude,Population,Capital Type
France,Paris,north,2.3522,2148000,Primary
";
        let storage = MockStorage::with_file("capitals.csv", csv);
        let pipeline = CapitalsPipeline::new(storage, TestConfig);

        let err = pipeline.transform(pipeline.extract().unwrap()).unwrap_err();
        match err {
            EtlError::CoercionError {
                row,
                column,
                value,
                ..
            } => {
                assert_eq!(row, 1);
                assert_eq!(column, "Latitude");
                assert_eq!(value, "north");
            }
            other => panic!("expected CoercionError, got {:?}", other),
        }
    }

    #[test]
    fn test_transform_rejects_non_finite_coordinates() {
        for bad in ["inf", "-inf", "nan", "NaN"] {
            let csv = format!(
                "Country,Capital City,Latitude,Longitude,Population,Capital Type\n\
                 France,Paris,{},2.3522,2148000,Primary\n",
                bad
            );
            let storage = MockStorage::with_file("capitals.csv", &csv);
            let pipeline = CapitalsPipeline::new(storage, TestConfig);

            let err = pipeline.transform(pipeline.extract().unwrap()).unwrap_err();
            match err {
                EtlError::CoercionError { column, value, .. } => {
                    assert_eq!(column, "Latitude");
                    assert_eq!(value, bad);
                }
                other => panic!("expected CoercionError for '{}', got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_transform_rejects_thousands_separators() {
        let csv = "\
Country,Capital City,Latitude,Longitude,Population,Capital Type
France,Paris,48.8566,2.3522,\"2,148,000\",Primary
";
        let storage = MockStorage::with_file("capitals.csv", csv);
        let pipeline = CapitalsPipeline::new(storage, TestConfig);

        let err = pipeline.transform(pipeline.extract().unwrap()).unwrap_err();
        assert!(matches!(err, EtlError::CoercionError { .. }));
    }

    #[test]
    fn test_load_writes_json_output() {
        let storage = MockStorage::with_file("capitals.csv", SAMPLE_CSV);
        let pipeline = CapitalsPipeline::new(storage, TestConfig);

        let result = pipeline.transform(pipeline.extract().unwrap()).unwrap();
        let output_path = pipeline.load(result).unwrap();

        assert_eq!(output_path, "capitals.json");
        let written = pipeline.storage.get_file("capitals.json").unwrap();
        let parsed: Vec<Capital> = serde_json::from_slice(&written).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].country, "France");
    }

    #[test]
    fn test_render_json_four_space_indent() {
        let records = vec![Capital {
            country: "France".to_string(),
            capital: "Paris".to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
            population: 2148000,
            capital_type: "Primary".to_string(),
        }];

        let json = render_json(&records).unwrap();

        let expected = r#"[
    {
        "country": "France",
        "capital": "Paris",
        "latitude": 48.8566,
        "longitude": 2.3522,
        "population": 2148000,
        "capital_type": "Primary"
    }
]"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_render_json_empty_input() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }
}
