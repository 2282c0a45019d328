//! # rigmart-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all Rigmart entities. Every other component reaches
//! durable state exclusively through these repositories.

pub mod connection;
pub mod migration;
pub mod repositories;
