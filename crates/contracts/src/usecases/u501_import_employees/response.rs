use serde::{Deserialize, Serialize};

/// Ошибка обработки одной строки файла
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowError {
    /// Номер строки файла (заголовок считается строкой 1)
    pub row: u64,
    pub message: String,
}

/// Итог импорта
///
/// Инвариант: `created + skipped == processed`, `errors.len() <= skipped`.
/// После исчерпания лимита тарифа чтение строк прекращается: оставшиеся
/// непустые строки только подсчитываются в `processed` и `skipped`,
/// без проверки и без записи в `errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub processed: u32,
    pub created: u32,
    pub skipped: u32,
    pub errors: Vec<ImportRowError>,
}

impl ImportResult {
    pub fn summary(&self) -> String {
        format!(
            "Employee import completed. {} created, {} skipped.",
            self.created, self.skipped
        )
    }
}

/// Ответ HTTP-эндпоинта импорта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub message: String,
    pub result: ImportResult,
}

impl From<ImportResult> for ImportResponse {
    fn from(result: ImportResult) -> Self {
        Self {
            message: result.summary(),
            result,
        }
    }
}
