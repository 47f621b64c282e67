use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Cannot read input '{path}': {message}")]
    InputError { path: String, message: String },

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column(s): {}", missing.join(", "))]
    SchemaError { missing: Vec<String> },

    #[error("Filesystem error at '{path}': {source}")]
    FilesystemError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Schema,
    Filesystem,
    Config,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl EtlError {
    pub fn input(path: impl Into<String>, message: impl Into<String>) -> Self {
        EtlError::InputError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn filesystem(path: impl Into<String>, source: std::io::Error) -> Self {
        EtlError::FilesystemError {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::InputError { .. }
            | EtlError::SpreadsheetError(_)
            | EtlError::CsvError(_) => ErrorCategory::Input,
            EtlError::SchemaError { .. } => ErrorCategory::Schema,
            EtlError::FilesystemError { .. } | EtlError::IoError(_) => ErrorCategory::Filesystem,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            EtlError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Schema | ErrorCategory::Config => {
                ErrorSeverity::High
            }
            ErrorCategory::Filesystem | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// 程序退出碼：輸入/結構/配置錯誤為 1，檔案系統與內部錯誤為 3
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::InputError { path, .. } => format!(
                "Check that '{}' exists and is a readable spreadsheet (xlsx, xls, ods or csv)",
                path
            ),
            EtlError::SpreadsheetError(_) => {
                "Re-save the workbook from a spreadsheet application and try again".to_string()
            }
            EtlError::CsvError(_) => {
                "Check the CSV file for malformed quoting or encoding".to_string()
            }
            EtlError::SchemaError { .. } => concat!(
                "Make sure the header row contains UID, Email, Nombre, CIF, ",
                "Suscripción, UMax, Modo Cobro, Tarifa and Alta"
            )
            .to_string(),
            EtlError::FilesystemError { path, .. } => format!(
                "Check write permissions for '{}' and that the disk is not full",
                path
            ),
            EtlError::IoError(_) => "Check file permissions and available disk space".to_string(),
            EtlError::SerializationError(_) => {
                "This is a bug in the converter; please report it with the input file".to_string()
            }
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::InputError { path, message } => {
                format!("Could not read the customer spreadsheet '{}': {}", path, message)
            }
            EtlError::SpreadsheetError(e) => format!("The spreadsheet could not be decoded: {}", e),
            EtlError::CsvError(e) => format!("The CSV file could not be decoded: {}", e),
            EtlError::SchemaError { missing } => format!(
                "The spreadsheet is missing required column(s): {}",
                missing.join(", ")
            ),
            EtlError::FilesystemError { path, source } => {
                format!("Could not write the output file '{}': {}", path, source)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
