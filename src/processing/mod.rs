pub mod csv_writer;
pub mod eikonal;
pub mod summary;
