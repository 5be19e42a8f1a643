use serde::{Deserialize, Serialize};

use crate::domain::a002_department::aggregate::DepartmentId;
use crate::domain::common::{AggregateRoot, EntityMetadata, RecordStatus};

crate::aggregate_id!(DesignationId);

/// Должность
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Designation {
    pub id: DesignationId,
    pub name: String,
    pub department_id: Option<DepartmentId>,
    pub status: RecordStatus,
    pub metadata: EntityMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignationDto {
    pub name: String,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl DesignationDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Designation name must not be empty".into());
        }
        Ok(())
    }
}

impl AggregateRoot for Designation {
    type Id = DesignationId;

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
        "a003"
    }

    fn table_name() -> &'static str {
        "designations"
    }

    fn element_name() -> &'static str {
        "Designation"
    }

    fn list_name() -> &'static str {
        "Designations"
    }
}
