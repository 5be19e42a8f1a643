pub mod error;
pub mod executor;
pub mod parsing;
pub mod store;
pub mod template;

pub use error::{ImportRejection, RowError};
pub use executor::ImportExecutor;
pub use store::{EmployeeImportStore, SeaOrmImportStore};
