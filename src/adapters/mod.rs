//! Adapters: implementations of the ports plus the inbound TCP surface.

pub mod ai;
pub mod tcp;
