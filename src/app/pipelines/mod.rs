pub mod color_pipeline;
