pub mod object_created;
pub mod summary_writer;
