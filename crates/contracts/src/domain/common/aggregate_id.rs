/// Объявить newtype-идентификатор агрегата
///
/// Идентификаторы HR-модуля являются целочисленными ключами SQLite
/// (`INTEGER PRIMARY KEY AUTOINCREMENT`), обёрнутыми в newtype,
/// чтобы нельзя было перепутать филиал с отделом.
#[macro_export]
macro_rules! aggregate_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
