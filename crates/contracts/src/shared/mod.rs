pub mod options;
pub mod query;
