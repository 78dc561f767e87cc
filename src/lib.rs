// src/lib.rs
pub mod attendance;
pub mod gateway;
pub mod portal;
pub mod qr;
pub mod types;
