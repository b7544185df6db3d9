pub mod csv_feed;
pub mod file;
pub mod stdin;
