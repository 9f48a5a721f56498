//! RP2040 adapters for the vehicle-lights controller.

#![no_std]

pub mod strip;
pub mod time;
