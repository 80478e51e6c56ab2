pub mod db;
pub mod directory;
pub mod factory;
pub mod repositories;
