//! Domain logic, organized per-domain.

pub mod plans;
