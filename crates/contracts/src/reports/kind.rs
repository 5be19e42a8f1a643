use serde::{Deserialize, Serialize};

/// Вид HR-отчёта; slug используется в URL `/api/hr/reports/{slug}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Absence,
    Lateness,
    Leave,
    MedicalExcuse,
    Warning,
    ExpiredContracts,
    Training,
    Resignation,
    Termination,
    Turnover,
}

impl ReportKind {
    pub const ALL: [ReportKind; 10] = [
        ReportKind::Absence,
        ReportKind::Lateness,
        ReportKind::Leave,
        ReportKind::MedicalExcuse,
        ReportKind::Warning,
        ReportKind::ExpiredContracts,
        ReportKind::Training,
        ReportKind::Resignation,
        ReportKind::Termination,
        ReportKind::Turnover,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::Absence => "absence",
            ReportKind::Lateness => "lateness",
            ReportKind::Leave => "leave",
            ReportKind::MedicalExcuse => "medical-excuse",
            ReportKind::Warning => "warning",
            ReportKind::ExpiredContracts => "expired-contracts",
            ReportKind::Training => "training",
            ReportKind::Resignation => "resignation",
            ReportKind::Termination => "termination",
            ReportKind::Turnover => "turnover",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    /// Префикс имени файла выгрузки: `{prefix}-YYYY-MM-DD.csv`
    pub fn export_prefix(&self) -> &'static str {
        match self {
            ReportKind::Absence => "absence-report",
            ReportKind::Lateness => "lateness-report",
            ReportKind::Leave => "leave-report",
            ReportKind::MedicalExcuse => "medical-excuse-report",
            ReportKind::Warning => "warning-report",
            ReportKind::ExpiredContracts => "expired-contracts-report",
            ReportKind::Training => "training-report",
            ReportKind::Resignation => "resignation-report",
            ReportKind::Termination => "termination-report",
            ReportKind::Turnover => "turnover-report",
        }
    }

    pub fn export_file_name(&self, today: chrono::NaiveDate) -> String {
        format!("{}-{}.csv", self.export_prefix(), today.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ReportKind::from_slug("payroll"), None);
    }

    #[test]
    fn slug_matches_serde_name() {
        let json = serde_json::to_string(&ReportKind::MedicalExcuse).unwrap();
        assert_eq!(json, "\"medical-excuse\"");
    }

    #[test]
    fn export_file_name_carries_date() {
        let today = chrono::NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(
            ReportKind::Absence.export_file_name(today),
            "absence-report-2025-03-09.csv"
        );
    }
}
