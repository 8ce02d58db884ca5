//! Marrow - Server-Authoritative Creature Anatomy Simulation

pub mod body;
pub mod boundary;
pub mod core;
pub mod physiology;
