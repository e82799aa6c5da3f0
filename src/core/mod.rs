pub mod etl;
pub mod grouper;
pub mod loader;
pub mod normalizer;
pub mod pipeline;
pub mod serializer;

pub use crate::domain::model::{Table, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
