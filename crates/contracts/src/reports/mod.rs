//! DTO отчётов HR-модуля

pub mod attendance;
pub mod contract;
pub mod employee;
pub mod filters;
pub mod kind;
pub mod leave;
pub mod options;
pub mod page;
pub mod separation;
pub mod training;
pub mod turnover;
pub mod warning;

pub use employee::ReportEmployee;
pub use filters::ReportFilters;
pub use kind::ReportKind;
pub use page::{Report, ReportPage};
