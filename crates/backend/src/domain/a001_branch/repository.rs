use chrono::Utc;
use contracts::domain::a001_branch::aggregate::{Branch, BranchDto, BranchId};
use contracts::domain::common::{EntityMetadata, RecordStatus, TenantScope};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "branches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub status: String,
    pub created_by: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Branch {
    fn from(m: Model) -> Self {
        Branch {
            id: BranchId(m.id),
            name: m.name,
            status: RecordStatus::from_loose(&m.status),
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
                created_by: m.created_by,
            },
        }
    }
}

pub async fn list_for_scope<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
) -> anyhow::Result<Vec<Branch>> {
    let items = Entity::find()
        .filter(Column::CreatedBy.is_in(scope.owner_ids.clone()))
        .order_by_asc(Column::Name)
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    created_by: i64,
    dto: &BranchDto,
) -> anyhow::Result<Branch> {
    let now = Utc::now();
    let active = ActiveModel {
        id: NotSet,
        name: Set(dto.name.trim().to_string()),
        status: Set(dto.status.as_str().to_string()),
        created_by: Set(created_by),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    };
    Ok(active.insert(conn).await?.into())
}
