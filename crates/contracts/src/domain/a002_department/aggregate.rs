use serde::{Deserialize, Serialize};

use crate::domain::a001_branch::aggregate::BranchId;
use crate::domain::common::{AggregateRoot, EntityMetadata, RecordStatus};

crate::aggregate_id!(DepartmentId);

/// Отдел (может быть привязан к филиалу)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub branch_id: Option<BranchId>,
    pub status: RecordStatus,
    pub metadata: EntityMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentDto {
    pub name: String,
    #[serde(default)]
    pub branch_id: Option<BranchId>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl DepartmentDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Department name must not be empty".into());
        }
        Ok(())
    }
}

impl AggregateRoot for Department {
    type Id = DepartmentId;

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
        "a002"
    }

    fn table_name() -> &'static str {
        "departments"
    }

    fn element_name() -> &'static str {
        "Department"
    }

    fn list_name() -> &'static str {
        "Departments"
    }
}
