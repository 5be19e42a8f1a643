use serde::{Deserialize, Serialize};

/// Контекст тенанта, от имени которого выполняется операция
///
/// `creator_id`: владелец, которому приписываются новые записи.
/// `owner_ids`: все владельцы, чьи записи видны в этом контексте
/// (компания и её сотрудники-администраторы).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantScope {
    pub creator_id: i64,
    pub owner_ids: Vec<i64>,
}

impl TenantScope {
    /// Контекст, в котором владелец видит только свои записи
    pub fn single(creator_id: i64) -> Self {
        Self {
            creator_id,
            owner_ids: vec![creator_id],
        }
    }

    /// Контекст с дополнительными владельцами; создатель всегда входит в набор
    pub fn new(creator_id: i64, owner_ids: impl IntoIterator<Item = i64>) -> Self {
        let mut owners = vec![creator_id];
        for id in owner_ids {
            if !owners.contains(&id) {
                owners.push(id);
            }
        }
        Self {
            creator_id,
            owner_ids: owners,
        }
    }

    /// Видна ли запись с данным владельцем в этом контексте
    pub fn sees(&self, owner_id: i64) -> bool {
        self.owner_ids.contains(&owner_id)
    }
}
