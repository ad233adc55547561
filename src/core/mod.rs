pub mod emit;
pub mod etl;
pub mod extract;
pub mod pipeline;
pub mod resolve;

pub use crate::domain::model::{ColorRecord, RawRow, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
