pub mod cli;
pub mod db;
pub mod logging;
pub mod models;

pub use db::Database;
