pub mod a001_branch;
pub mod a002_department;
pub mod a003_designation;
pub mod a004_shift;
pub mod a005_employee;
pub mod common;
