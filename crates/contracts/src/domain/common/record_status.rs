use serde::{Deserialize, Serialize};

/// Статус записи справочника или учётной записи
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Inactive => "inactive",
        }
    }

    /// Разбор значения из CSV/БД: всё, кроме "inactive", считается активным
    pub fn from_loose(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("inactive") {
            RecordStatus::Inactive
        } else {
            RecordStatus::Active
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            RecordStatus::Active => RecordStatus::Inactive,
            RecordStatus::Inactive => RecordStatus::Active,
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anything_but_inactive_is_active() {
        assert_eq!(RecordStatus::from_loose("Inactive "), RecordStatus::Inactive);
        assert_eq!(RecordStatus::from_loose("ACTIVE"), RecordStatus::Active);
        assert_eq!(RecordStatus::from_loose("suspended"), RecordStatus::Active);
        assert_eq!(RecordStatus::from_loose(""), RecordStatus::Active);
    }

    #[test]
    fn toggles_between_states() {
        assert_eq!(RecordStatus::Active.toggled(), RecordStatus::Inactive);
        assert_eq!(RecordStatus::Inactive.toggled(), RecordStatus::Active);
    }
}
