pub mod account_pipeline;

pub use account_pipeline::{AccountPipeline, PipelineState};
