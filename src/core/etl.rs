use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Starting ETL process...");

        tracing::info!("Extracting data...");
        let raw_data = self.pipeline.extract()?;
        tracing::info!("Extracted {} rows", raw_data.len());

        tracing::info!("Transforming data...");
        let transformed_result = self.pipeline.transform(raw_data)?;
        tracing::info!("Transformed {} records", transformed_result.records.len());

        tracing::info!("Loading data...");
        let output_path = self.pipeline.load(transformed_result)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
