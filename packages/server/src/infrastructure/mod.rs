//! Infrastructure layer: wire DTOs and in-memory repositories.

pub mod dto;
pub mod repository;
