pub mod db;
pub mod macros;
pub mod models;
