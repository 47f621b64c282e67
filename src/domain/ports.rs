use crate::domain::model::{Sheet, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Replaces `path` with `data` in one step, creating parent directories as needed.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    /// `None` selects the first sheet of the workbook.
    fn sheet_name(&self) -> Option<&str>;
    fn indent_width(&self) -> usize;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Sheet>;
    fn transform(&self, sheet: Sheet) -> Result<TransformResult>;
    fn load(&self, result: &TransformResult) -> Result<String>;
    /// Where `load` writes; known before any phase runs.
    fn output_path(&self) -> &str;
}
