pub mod object_store;
pub mod summary_store;
