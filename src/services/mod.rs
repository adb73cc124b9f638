pub mod content_pipeline;
pub mod image_pipeline;
pub mod media_service;
pub mod model_service;
pub mod rate_limiter;
pub mod response_parser;
