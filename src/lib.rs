//! Ingests the housing authority's property listings and vacancy board into
//! Postgres.

pub mod application;
pub mod domain;
pub mod infrastructure;
