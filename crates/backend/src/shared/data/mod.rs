pub mod db;
pub mod paging;
pub mod predicate;
pub mod row;
pub mod schema;

#[cfg(test)]
pub mod test_support;
