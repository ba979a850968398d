//! Domain layer: card normalization, classification and validation rules,
//! plus the ports the application layer depends on.
//!
//! Everything here is synchronous and free of I/O except the port traits.

pub mod brand;
pub mod card;
pub mod expiry;
pub mod payment;
pub mod ports;
pub mod profile;
