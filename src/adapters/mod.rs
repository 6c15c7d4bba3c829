// Adapters layer: concrete clients for the image host and the vision service.

pub mod http;
pub mod openai;

pub use self::http::HttpReachability;
pub use self::openai::OpenAiClassifier;
