pub mod db;
pub mod web_driver;
