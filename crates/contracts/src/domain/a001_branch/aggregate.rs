use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, EntityMetadata, RecordStatus};

crate::aggregate_id!(BranchId);

/// Филиал компании
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub status: RecordStatus,
    pub metadata: EntityMetadata,
}

/// Данные для создания филиала
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchDto {
    pub name: String,
    #[serde(default)]
    pub status: RecordStatus,
}

impl BranchDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Branch name must not be empty".into());
        }
        Ok(())
    }
}

impl AggregateRoot for Branch {
    type Id = BranchId;

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
        "a001"
    }

    fn table_name() -> &'static str {
        "branches"
    }

    fn element_name() -> &'static str {
        "Branch"
    }

    fn list_name() -> &'static str {
        "Branches"
    }
}
