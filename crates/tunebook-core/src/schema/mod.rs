pub mod db;
pub mod ddl;

pub use db::Database;
