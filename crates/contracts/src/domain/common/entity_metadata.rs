use serde::{Deserialize, Serialize};

/// Метаданные экземпляра агрегата (lifecycle tracking + владелец)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Дата создания записи
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Дата последнего обновления
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Пользователь-владелец записи (по нему определяется видимость для тенанта)
    pub created_by: i64,
}

