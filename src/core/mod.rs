pub mod dates;
pub mod etl;
pub mod normalize;
pub mod pipeline;
pub mod projection;

pub use crate::domain::model::{CellValue, CustomerRecord, Sheet, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
