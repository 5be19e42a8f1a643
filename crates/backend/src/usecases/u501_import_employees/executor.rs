use std::io::Read;

use contracts::domain::a005_employee::aggregate::Gender;
use contracts::domain::common::{RecordStatus, TenantScope};
use contracts::usecases::u501_import_employees::{ImportResult, ImportRowError, PlanQuota};

use super::error::{ImportRejection, RowError};
use super::parsing::{self, ImportRow};
use super::store::{CreatedEmployee, EmployeeImportStore, ResolvedEmployeeDraft};
use crate::domain::reference::ReferenceKind;

/// Executor для UseCase импорта сотрудников из CSV
pub struct ImportExecutor<'a, S: EmployeeImportStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: EmployeeImportStore + ?Sized> ImportExecutor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Выполнить импорт файла.
    ///
    /// Файл целиком отклоняется только если он пуст, нечитаем, в заголовке
    /// нет обязательных колонок или лимит тарифа исчерпан до начала работы.
    /// Всё остальное попадает в `ImportResult` как ошибки строк.
    pub async fn execute<R: Read>(
        &self,
        input: R,
        scope: &TenantScope,
        quota: Option<PlanQuota>,
    ) -> Result<ImportResult, ImportRejection> {
        if quota.is_some_and(|q| q.is_exhausted()) {
            tracing::warn!(
                "Employee import rejected for creator {}: plan limit exhausted",
                scope.creator_id
            );
            return Err(ImportRejection::QuotaExhausted);
        }

        tracing::info!("Starting employee import for creator {}", scope.creator_id);

        // Локальный остаток лимита, из хранилища повторно не читается
        let mut remaining = quota.map(|q| q.remaining);
        let mut header: Option<(Vec<String>, u64)> = None;
        let mut last_line = 0u64;
        let mut result = ImportResult::default();

        let mut records = parsing::PhysicalRecords::new(input);
        while let Some(item) = records.next() {
            let (line, record) = match item {
                Ok(item) => item,
                Err(e) => match &header {
                    None => return Err(ImportRejection::Unreadable(e.to_string())),
                    Some((_, header_line)) => {
                        let row = last_line + 1 - header_line + 1;
                        result.processed += 1;
                        record_error(&mut result, row, RowError::Unreadable(e.to_string()));
                        break;
                    }
                },
            };
            last_line = line;

            if parsing::is_blank_record(&record) {
                continue;
            }

            let Some((columns, header_line)) = &header else {
                let decoded = csv::StringRecord::from_byte_record(record)
                    .map_err(|e| ImportRejection::Unreadable(e.to_string()))?;
                let columns: Vec<String> = decoded.iter().map(parsing::normalize_header).collect();

                let missing = parsing::missing_columns(&columns);
                if !missing.is_empty() {
                    tracing::warn!("Employee import rejected: missing columns {:?}", missing);
                    return Err(ImportRejection::MissingColumns(missing));
                }

                header = Some((columns, line));
                continue;
            };

            let row_number = line - header_line + 1;
            result.processed += 1;

            let decoded = match csv::StringRecord::from_byte_record(record) {
                Ok(decoded) => decoded,
                Err(e) => {
                    record_error(&mut result, row_number, RowError::Unreadable(e.to_string()));
                    continue;
                }
            };
            let row = ImportRow::new(row_number, columns, &decoded);

            let missing = row.missing_values();
            if !missing.is_empty() {
                record_error(&mut result, row.number, RowError::MissingValues(missing));
                continue;
            }

            if remaining.is_some_and(|r| r <= 0) {
                record_error(&mut result, row.number, RowError::PlanLimitReached);
                let rest = count_data_rows(&mut records);
                result.processed += rest;
                result.skipped += rest;
                break;
            }

            match self.import_row(&row, scope).await {
                Ok(created) => {
                    tracing::debug!(
                        "Row {}: employee {} created (user {})",
                        row.number,
                        created.employee_id,
                        created.user_id
                    );
                    result.created += 1;
                    if let Some(r) = remaining.as_mut() {
                        *r -= 1;
                    }
                }
                Err(e) => record_error(&mut result, row.number, e),
            }
        }

        if header.is_none() {
            tracing::warn!("Employee import rejected: file contains no data");
            return Err(ImportRejection::Empty);
        }

        tracing::info!(
            "Employee import finished for creator {}: {} processed, {} created, {} skipped",
            scope.creator_id,
            result.processed,
            result.created,
            result.skipped
        );

        Ok(result)
    }

    /// Проверить и создать одного сотрудника
    async fn import_row(
        &self,
        row: &ImportRow,
        scope: &TenantScope,
    ) -> Result<CreatedEmployee, RowError> {
        let draft = self.resolve_row(row, scope).await?;
        self.store
            .create_employee(scope, &draft)
            .await
            .map_err(RowError::Unexpected)
    }

    async fn resolve_row(
        &self,
        row: &ImportRow,
        scope: &TenantScope,
    ) -> Result<ResolvedEmployeeDraft, RowError> {
        let value = |column: &str| row.get(column).map(str::to_string);
        let employee_code = row.get("employee_id").unwrap_or_default().to_string();

        if self
            .store
            .employee_code_exists(scope, &employee_code)
            .await
            .map_err(RowError::Unexpected)?
        {
            return Err(RowError::DuplicateCode(employee_code));
        }

        let branch_id = self.require(ReferenceKind::Branch, row, "branch_id", scope).await?;
        let department_id = self
            .require(ReferenceKind::Department, row, "department_id", scope)
            .await?;
        let designation_id = self
            .require(ReferenceKind::Designation, row, "designation_id", scope)
            .await?;
        let shift_id = self.lookup(ReferenceKind::Shift, row, "shift_id", scope).await?;

        Ok(ResolvedEmployeeDraft {
            employee_code,
            name: row.get("name").unwrap_or_default().to_string(),
            email: value("email"),
            password: value("password"),
            date_of_birth: row.get("date_of_birth").and_then(parsing::parse_date),
            gender: row.get("gender").map(Gender::from_loose).unwrap_or(Gender::Other),
            branch_id,
            department_id,
            designation_id,
            shift_id,
            date_of_joining: row.get("date_of_joining").and_then(parsing::parse_date),
            employment_type: value("employment_type"),
            employment_status: value("employment_status"),
            status: row
                .get("status")
                .map(RecordStatus::from_loose)
                .unwrap_or_default(),
            national_id: value("national_id"),
        })
    }

    async fn lookup(
        &self,
        kind: ReferenceKind,
        row: &ImportRow,
        column: &str,
        scope: &TenantScope,
    ) -> Result<Option<i64>, RowError> {
        match row.get(column) {
            Some(value) => self
                .store
                .resolve_reference(kind, scope, value)
                .await
                .map_err(RowError::Unexpected),
            None => Ok(None),
        }
    }

    async fn require(
        &self,
        kind: ReferenceKind,
        row: &ImportRow,
        column: &str,
        scope: &TenantScope,
    ) -> Result<i64, RowError> {
        self.lookup(kind, row, column, scope)
            .await?
            .ok_or(RowError::InvalidReference(kind))
    }
}

/// Непустые строки, оставшиеся в файле; подсчёт прекращается на первой битой записи
fn count_data_rows<I>(records: I) -> u32
where
    I: Iterator<Item = Result<(u64, csv::ByteRecord), csv::Error>>,
{
    records
        .map_while(Result::ok)
        .filter(|(_, record)| !parsing::is_blank_record(record))
        .count() as u32
}

fn record_error(result: &mut ImportResult, row: u64, error: RowError) {
    match &error {
        RowError::Unexpected(e) => tracing::error!("Employee import row {}: {:#}", row, e),
        other => tracing::warn!("Employee import row {}: {}", row, other),
    }
    result.skipped += 1;
    result.errors.push(ImportRowError {
        row,
        message: error.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use contracts::usecases::u501_import_employees::required_columns;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Хранилище в памяти: один тенант, фиксированные справочники
    #[derive(Default)]
    struct FakeStore {
        codes: Mutex<HashSet<String>>,
        created: Mutex<Vec<ResolvedEmployeeDraft>>,
        failing_codes: HashSet<String>,
        resolve_calls: AtomicUsize,
    }

    impl FakeStore {
        fn with_codes(codes: &[&str]) -> Self {
            let store = FakeStore::default();
            store
                .codes
                .lock()
                .unwrap()
                .extend(codes.iter().map(|c| c.to_string()));
            store
        }

        fn created(&self) -> Vec<ResolvedEmployeeDraft> {
            self.created.lock().unwrap().clone()
        }

        fn references(kind: ReferenceKind) -> &'static [(i64, &'static str)] {
            match kind {
                ReferenceKind::Branch => &[(1, "Head Office"), (2, "Warehouse")],
                ReferenceKind::Department => &[(1, "Engineering"), (2, "Sales")],
                ReferenceKind::Designation => &[(1, "Developer")],
                ReferenceKind::Shift => &[(1, "Morning")],
            }
        }
    }

    #[async_trait]
    impl EmployeeImportStore for FakeStore {
        async fn employee_code_exists(&self, _scope: &TenantScope, code: &str) -> anyhow::Result<bool> {
            Ok(self.codes.lock().unwrap().contains(code))
        }

        async fn resolve_reference(
            &self,
            kind: ReferenceKind,
            _scope: &TenantScope,
            value: &str,
        ) -> anyhow::Result<Option<i64>> {
            self.resolve_calls.fetch_add(1, Ordering::SeqCst);
            let rows = Self::references(kind);
            if let Ok(id) = value.parse::<i64>() {
                if rows.iter().any(|(row_id, _)| *row_id == id) {
                    return Ok(Some(id));
                }
            }
            Ok(rows
                .iter()
                .find(|(_, name)| name.eq_ignore_ascii_case(value))
                .map(|(id, _)| *id))
        }

        async fn create_employee(
            &self,
            _scope: &TenantScope,
            draft: &ResolvedEmployeeDraft,
        ) -> anyhow::Result<CreatedEmployee> {
            if self.failing_codes.contains(&draft.employee_code) {
                anyhow::bail!("database is locked");
            }
            let mut created = self.created.lock().unwrap();
            created.push(draft.clone());
            self.codes.lock().unwrap().insert(draft.employee_code.clone());
            let id = created.len() as i64;
            Ok(CreatedEmployee {
                employee_id: id,
                user_id: 100 + id,
                email: format!("{}@example.com", draft.employee_code),
            })
        }
    }

    fn header() -> String {
        required_columns().collect::<Vec<_>>().join(",")
    }

    fn row(code: &str) -> String {
        format!(
            "{code},Person {code},1990-04-12,M,1,1,1,1,2024-01-15,Full-time,active,active,123456"
        )
    }

    fn file(rows: &[String]) -> String {
        let mut lines = vec![header()];
        lines.extend(rows.iter().cloned());
        lines.join("\n") + "\n"
    }

    fn scope() -> TenantScope {
        TenantScope::single(1)
    }

    async fn run(
        store: &FakeStore,
        input: &str,
        quota: Option<PlanQuota>,
    ) -> Result<ImportResult, ImportRejection> {
        ImportExecutor::new(store)
            .execute(input.as_bytes(), &scope(), quota)
            .await
    }

    #[tokio::test]
    async fn valid_rows_are_all_created() {
        let store = FakeStore::default();
        let input = file(&[row("EMP-1"), row("EMP-2"), row("EMP-3")]);

        let result = run(&store, &input, None).await.unwrap();

        assert_eq!(result.processed, 3);
        assert_eq!(result.created, 3);
        assert_eq!(result.skipped, 0);
        assert!(result.errors.is_empty());

        let drafts = store.created();
        assert_eq!(drafts[0].employee_code, "EMP-1");
        assert_eq!(drafts[0].name, "Person EMP-1");
        assert_eq!(drafts[0].gender, Gender::Male);
        assert_eq!(drafts[0].shift_id, Some(1));
        assert_eq!(drafts[0].date_of_birth, NaiveDate::from_ymd_opt(1990, 4, 12));
    }

    #[tokio::test]
    async fn missing_value_skips_only_that_row() {
        let store = FakeStore::default();
        let incomplete =
            "EMP-2,,1990-04-12,M,1,1,1,1,2024-01-15,Full-time,active,active,   ".to_string();
        let input = file(&[row("EMP-1"), incomplete, row("EMP-3")]);

        let result = run(&store, &input, None).await.unwrap();

        assert_eq!(result.created, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(
            result.errors,
            vec![ImportRowError {
                row: 3,
                message: "Missing required values for: name, national_id".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn short_row_reports_absent_columns() {
        let store = FakeStore::default();
        let input = file(&["EMP-1,Someone".to_string()]);

        let result = run(&store, &input, None).await.unwrap();

        assert_eq!(result.skipped, 1);
        assert!(result.errors[0]
            .message
            .starts_with("Missing required values for: date_of_birth, gender"));
    }

    #[tokio::test]
    async fn missing_header_column_rejects_whole_file() {
        let store = FakeStore::default();
        let header: Vec<_> = required_columns().filter(|c| *c != "shift_id").collect();
        let input = format!("{}\n{}\n", header.join(","), row("EMP-1"));

        let err = run(&store, &input, None).await.unwrap_err();

        match err {
            ImportRejection::MissingColumns(columns) => assert_eq!(columns, vec!["shift_id"]),
            other => panic!("unexpected rejection: {other:?}"),
        }
        assert!(store.created().is_empty());
    }

    #[tokio::test]
    async fn quota_stops_processing_at_first_exhausted_row() {
        let store = FakeStore::default();
        let rows: Vec<String> = (1..=5).map(|i| row(&format!("EMP-{i}"))).collect();
        let input = file(&rows);

        let result = run(&store, &input, Some(PlanQuota::new(10, 8))).await.unwrap();

        assert_eq!(result.processed, 5);
        assert_eq!(result.created, 2);
        assert_eq!(result.skipped, 3);
        assert_eq!(
            result.errors,
            vec![ImportRowError {
                row: 4,
                message: "Plan limit reached. Remaining rows were skipped.".to_string(),
            }]
        );
        // по четыре ссылки на созданную строку, дальше ни одной
        assert_eq!(store.resolve_calls.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn rows_after_plan_limit_are_counted_without_validation() {
        let store = FakeStore::default();
        let input = file(&[
            row("EMP-1"),
            row("EMP-2"),
            String::new(),
            " , ,".to_string(),
            "EMP-3,,,,,".to_string(),
            row("EMP-4"),
        ]);

        let result = run(&store, &input, Some(PlanQuota::new(1, 0))).await.unwrap();

        assert_eq!(result.processed, 4);
        assert_eq!(result.created, 1);
        assert_eq!(result.skipped, 3);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row, 3);
        assert_eq!(store.resolve_calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn quote_inside_a_cell_does_not_swallow_rows() {
        let store = FakeStore::default();
        let quoted = row("EMP-1").replace("Person EMP-1", "John \"JJ Doe");
        let input = file(&[quoted, row("EMP-2"), row("EMP-3")]);

        let result = run(&store, &input, None).await.unwrap();

        assert_eq!(result.processed, 3);
        assert_eq!(result.created, 3);
        assert!(result.errors.is_empty());
        let names: Vec<String> = store.created().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["John \"JJ Doe", "Person EMP-2", "Person EMP-3"]);
    }

    #[tokio::test]
    async fn exhausted_quota_rejects_before_reading() {
        let store = FakeStore::default();
        let input = file(&[row("EMP-1")]);

        let err = run(&store, &input, Some(PlanQuota::new(5, 5))).await.unwrap_err();

        assert!(matches!(err, ImportRejection::QuotaExhausted));
        assert!(store.created().is_empty());
    }

    #[tokio::test]
    async fn existing_code_is_skipped() {
        let store = FakeStore::with_codes(&["EMP-1"]);
        let input = file(&[row("EMP-1"), row("EMP-2")]);

        let result = run(&store, &input, None).await.unwrap();

        assert_eq!(result.created, 1);
        assert_eq!(result.errors[0].row, 2);
        assert_eq!(result.errors[0].message, "Employee ID \"EMP-1\" already exists.");
        assert_eq!(store.created().len(), 1);
        assert_eq!(store.created()[0].employee_code, "EMP-2");
    }

    #[tokio::test]
    async fn unknown_numeric_branch_is_an_invalid_reference() {
        let store = FakeStore::default();
        let bad_branch = row("EMP-2").replacen(",M,1,", ",M,99,", 1);
        let input = file(&[row("EMP-1"), bad_branch, row("EMP-3")]);

        let result = run(&store, &input, None).await.unwrap();

        assert_eq!(result.created, 2);
        assert_eq!(
            result.errors,
            vec![ImportRowError {
                row: 3,
                message: "Invalid branch reference.".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn references_resolve_by_name_and_shift_is_optional() {
        let store = FakeStore::default();
        let by_name = "EMP-1,Ann,1990-04-12,F,warehouse,SALES,developer,Night,2024-01-15,Contract,active,inactive,42";
        let input = file(&[by_name.to_string()]);

        let result = run(&store, &input, None).await.unwrap();

        assert_eq!(result.created, 1);
        let draft = &store.created()[0];
        assert_eq!(draft.branch_id, 2);
        assert_eq!(draft.department_id, 2);
        assert_eq!(draft.designation_id, 1);
        assert_eq!(draft.shift_id, None);
        assert_eq!(draft.gender, Gender::Female);
        assert_eq!(draft.status, RecordStatus::Inactive);
    }

    #[tokio::test]
    async fn reference_errors_follow_resolution_order() {
        let store = FakeStore::default();
        let bad_department = row("EMP-1").replacen(",M,1,1,", ",M,1,Marketing,", 1);
        let bad_designation = row("EMP-2").replacen(",M,1,1,1,", ",M,1,1,Chef,", 1);
        let input = file(&[bad_department, bad_designation]);

        let result = run(&store, &input, None).await.unwrap();

        let messages: Vec<_> = result.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Invalid department reference.", "Invalid designation reference."]
        );
    }

    #[tokio::test]
    async fn blank_rows_are_silent_but_keep_line_numbers() {
        let store = FakeStore::default();
        let missing_name =
            "EMP-3,,1990-04-12,M,1,1,1,1,2024-01-15,Full-time,active,active,1".to_string();
        let input = file(&[
            row("EMP-1"),
            String::new(),
            " , ,,".to_string(),
            row("EMP-2"),
            missing_name,
        ]);

        let result = run(&store, &input, None).await.unwrap();

        assert_eq!(result.processed, 3);
        assert_eq!(result.created, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.errors[0].row, 6);
    }

    #[tokio::test]
    async fn second_run_skips_every_row() {
        let store = FakeStore::default();
        let input = file(&[row("EMP-1"), row("EMP-2")]);

        let first = run(&store, &input, None).await.unwrap();
        let second = run(&store, &input, None).await.unwrap();

        assert_eq!(first.created, 2);
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 2);
        assert_eq!(second.errors.len(), 2);
    }

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let store = FakeStore::default();

        assert!(matches!(run(&store, "", None).await, Err(ImportRejection::Empty)));
        assert!(matches!(
            run(&store, "\n , \n\n", None).await,
            Err(ImportRejection::Empty)
        ));
    }

    #[tokio::test]
    async fn header_only_file_is_an_empty_success() {
        let store = FakeStore::default();

        let result = run(&store, &file(&[]), None).await.unwrap();

        assert_eq!(result, ImportResult::default());
    }

    #[tokio::test]
    async fn header_is_normalized() {
        let store = FakeStore::default();
        let header = required_columns()
            .map(|c| format!(" {} ", c.to_uppercase()))
            .collect::<Vec<_>>()
            .join(",");
        let input = format!("\u{feff}{}\n{}\n", header, row("EMP-1"));

        let result = run(&store, &input, None).await.unwrap();

        assert_eq!(result.created, 1);
    }

    #[tokio::test]
    async fn header_may_follow_blank_lines() {
        let store = FakeStore::default();
        let input = format!("\n,,\n{}", file(&[row("EMP-1")]));

        let result = run(&store, &input, None).await.unwrap();

        assert_eq!(result.created, 1);
    }

    #[tokio::test]
    async fn persistence_failure_does_not_stop_the_import() {
        let store = FakeStore {
            failing_codes: HashSet::from(["EMP-2".to_string()]),
            ..FakeStore::default()
        };
        let input = file(&[row("EMP-1"), row("EMP-2"), row("EMP-3")]);

        let result = run(&store, &input, Some(PlanQuota::new(3, 0))).await.unwrap();

        assert_eq!(result.created, 2);
        assert_eq!(
            result.errors,
            vec![ImportRowError {
                row: 3,
                message: "Unexpected error: database is locked".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn undecodable_row_is_reported() {
        let store = FakeStore::default();
        let mut input = file(&[row("EMP-1")]).into_bytes();
        input.extend_from_slice(b"EMP-\xff,broken\n");
        input.extend_from_slice(row("EMP-3").as_bytes());

        let result = ImportExecutor::new(&store)
            .execute(input.as_slice(), &scope(), None)
            .await
            .unwrap();

        assert_eq!(result.created, 2);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row, 3);
        assert!(result.errors[0].message.starts_with("Unreadable row:"));
    }

    #[tokio::test]
    async fn values_are_normalized() {
        let store = FakeStore::default();
        let mut columns: Vec<_> = required_columns().collect();
        columns.extend(["email", "password"]);
        let input = format!(
            "{}\n{}\n{}\n",
            columns.join(","),
            "EMP-1,Ann,25/12/1990,unknown,1,1,1,1,not a date,Contract,probation,ACTIVE,1,ann@example.com,secret-123",
            "EMP-2,Bob,1990-01-01,Woman,1,1,1,,2024-02-01,Contract,active,whatever,2,,",
        );

        let result = run(&store, &input, None).await.unwrap();
        assert_eq!(result.errors.len(), 1, "{:?}", result.errors);
        assert_eq!(result.errors[0].message, "Missing required values for: shift_id");

        let draft = &store.created()[0];
        assert_eq!(draft.gender, Gender::Other);
        assert_eq!(draft.date_of_birth, NaiveDate::from_ymd_opt(1990, 12, 25));
        assert_eq!(draft.date_of_joining, None);
        assert_eq!(draft.status, RecordStatus::Active);
        assert_eq!(draft.employment_status.as_deref(), Some("probation"));
        assert_eq!(draft.email.as_deref(), Some("ann@example.com"));
        assert_eq!(draft.password.as_deref(), Some("secret-123"));
    }

    #[tokio::test]
    async fn imports_into_sqlite_once() {
        use crate::shared::data::test_support::{insert, temp_database};
        use crate::usecases::u501_import_employees::SeaOrmImportStore;

        let db = temp_database().await;
        for table in ["branches", "departments", "designations", "shifts"] {
            insert(
                &db,
                &format!("INSERT INTO {table} (name, status, created_by) VALUES ('Main', 'active', 1)"),
                vec![],
            )
            .await;
        }
        let store = SeaOrmImportStore::new(db.clone());
        let input = file(&[row("EMP-1"), row("EMP-2").replacen(",M,1,1,1,1,", ",M,main,MAIN,1,1,", 1)]);
        let executor = ImportExecutor::new(&store);

        let first = executor.execute(input.as_bytes(), &scope(), None).await.unwrap();
        let second = executor.execute(input.as_bytes(), &scope(), None).await.unwrap();

        assert_eq!((first.created, first.skipped), (2, 0), "{:?}", first.errors);
        assert_eq!((second.created, second.skipped), (0, 2));

        let count = crate::system::users::repository::count_employee_accounts(&db, &scope())
            .await
            .unwrap();
        assert_eq!(count, 2);
    }
}
