//! Domain layer - Core business logic
//!
//! This module contains the signature table, the pattern corpus and the
//! services that apply them. It performs no I/O.

pub mod entities;
pub mod services;
