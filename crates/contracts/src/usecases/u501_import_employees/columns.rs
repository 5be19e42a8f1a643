use serde::Serialize;

/// Колонка файла импорта сотрудников
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    /// Нормализованное имя колонки в заголовке (нижний регистр)
    pub name: &'static str,
    /// Обязательна ли колонка в заголовке и значение в строке
    pub required: bool,
}

impl ColumnSpec {
    const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// Колонки импорта в порядке шаблона.
///
/// `email` и `password` необязательны: если их нет, учётная запись
/// получает служебный адрес и случайный пароль.
pub const EMPLOYEE_IMPORT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("employee_id"),
    ColumnSpec::required("name"),
    ColumnSpec::required("date_of_birth"),
    ColumnSpec::required("gender"),
    ColumnSpec::required("branch_id"),
    ColumnSpec::required("department_id"),
    ColumnSpec::required("designation_id"),
    ColumnSpec::required("shift_id"),
    ColumnSpec::required("date_of_joining"),
    ColumnSpec::required("employment_type"),
    ColumnSpec::required("employment_status"),
    ColumnSpec::required("status"),
    ColumnSpec::required("national_id"),
    ColumnSpec::optional("email"),
    ColumnSpec::optional("password"),
];

/// Обязательные колонки в порядке шаблона
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    EMPLOYEE_IMPORT_COLUMNS
        .iter()
        .filter(|c| c.required)
        .map(|c| c.name)
}

pub const TEMPLATE_FILE_NAME: &str = "employee_import_template.csv";

/// Примерные строки шаблона (значения по колонкам `EMPLOYEE_IMPORT_COLUMNS`)
pub const TEMPLATE_SAMPLE_ROWS: &[&[&str]] = &[
    &[
        "EMP-1001",
        "John Doe",
        "1990-04-12",
        "M",
        "1",
        "1",
        "1",
        "1",
        "2024-01-15",
        "Full-time",
        "active",
        "active",
        "1234567890",
        "",
        "",
    ],
    &[
        "EMP-1002",
        "Sara Khan",
        "1992-09-05",
        "F",
        "2",
        "2",
        "3",
        "1",
        "2024-03-01",
        "Contract",
        "active",
        "active",
        "12345678456",
        "",
        "",
    ],
];
