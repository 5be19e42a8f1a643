pub mod columns;
pub mod quota;
pub mod response;

pub use columns::{required_columns, ColumnSpec, EMPLOYEE_IMPORT_COLUMNS, TEMPLATE_FILE_NAME, TEMPLATE_SAMPLE_ROWS};
pub use quota::PlanQuota;
pub use response::{ImportResponse, ImportResult, ImportRowError};
