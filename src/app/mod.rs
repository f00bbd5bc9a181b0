// Application layer: concrete pipelines wiring domain ports together.

pub mod pipelines;
