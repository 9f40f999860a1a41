//! The HTTP request pipeline.

pub mod pipeline;

pub use pipeline::RequestPipeline;
