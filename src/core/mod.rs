pub mod etl;
pub mod table;

pub use crate::domain::model::{AnnotationStats, ColorResult, Record, Table, TransformResult};
pub use crate::domain::ports::{
    ColorClassifier, ConfigProvider, Pipeline, ReachabilityCheck, Storage,
};
pub use crate::utils::error::Result;
