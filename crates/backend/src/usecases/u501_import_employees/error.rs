use crate::domain::reference::ReferenceKind;

/// Отказ от импорта целиком: ни одна строка не обработана
#[derive(Debug, thiserror::Error)]
pub enum ImportRejection {
    #[error("The uploaded file does not contain any data.")]
    Empty,
    #[error("The uploaded file is missing the required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Employee limit exceeded. Please upgrade your plan or remove users before importing more employees.")]
    QuotaExhausted,
    #[error("Unable to read the uploaded file: {0}")]
    Unreadable(String),
    #[error("The uploaded file exceeds the {limit} byte limit.")]
    FileTooLarge { limit: usize },
}

/// Ошибка одной строки файла; строка пропускается, импорт продолжается
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("Missing required values for: {}", .0.join(", "))]
    MissingValues(Vec<String>),
    #[error("Plan limit reached. Remaining rows were skipped.")]
    PlanLimitReached,
    #[error("Employee ID \"{0}\" already exists.")]
    DuplicateCode(String),
    #[error("Invalid {} reference.", .0.label())]
    InvalidReference(ReferenceKind),
    #[error("Unreadable row: {0}")]
    Unreadable(String),
    #[error("Unexpected error: {0:#}")]
    Unexpected(anyhow::Error),
}
