use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, EntityMetadata, RecordStatus};

crate::aggregate_id!(ShiftId);

/// Рабочая смена
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub name: String,
    /// Начало смены, "HH:MM"
    pub start_time: Option<String>,
    /// Окончание смены, "HH:MM"
    pub end_time: Option<String>,
    pub status: RecordStatus,
    pub metadata: EntityMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftDto {
    pub name: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl ShiftDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Shift name must not be empty".into());
        }
        for time in [&self.start_time, &self.end_time].into_iter().flatten() {
            if chrono::NaiveTime::parse_from_str(time, "%H:%M").is_err() {
                return Err(format!("Invalid shift time: {}", time));
            }
        }
        Ok(())
    }
}

impl AggregateRoot for Shift {
    type Id = ShiftId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn table_name() -> &'static str {
        "shifts"
    }

    fn element_name() -> &'static str {
        "Shift"
    }

    fn list_name() -> &'static str {
        "Shifts"
    }
}
