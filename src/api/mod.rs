pub mod dtos;
pub mod extractors;
pub mod guards;
pub mod handlers;
pub mod router;
