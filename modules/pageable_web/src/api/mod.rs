//! API layer - HTTP integration

pub mod rest;
