use serde::{Deserialize, Serialize};

/// Лимит тарифного плана на количество сотрудников
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanQuota {
    pub max: i64,
    pub current: i64,
    /// Сколько ещё сотрудников можно создать: max(max - current, 0)
    pub remaining: i64,
}

impl PlanQuota {
    pub fn new(max: i64, current: i64) -> Self {
        Self {
            max,
            current,
            remaining: (max - current).max(0),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0
    }
}
