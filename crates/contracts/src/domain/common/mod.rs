//! Общие типы и трейты для агрегатов HR-модуля

pub mod aggregate_id;
pub mod aggregate_root;
pub mod entity_metadata;
pub mod record_status;
pub mod tenant;

// Re-exports
pub use aggregate_root::AggregateRoot;
pub use entity_metadata::EntityMetadata;
pub use record_status::RecordStatus;
pub use tenant::TenantScope;
