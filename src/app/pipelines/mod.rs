pub mod capitals_pipeline;
