pub mod dto;
pub mod form;
mod routes;

pub use routes::routes;
