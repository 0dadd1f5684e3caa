//! REST API layer

pub mod dto;
pub mod error;
pub mod extract;
pub mod mapper;
pub mod routes;
