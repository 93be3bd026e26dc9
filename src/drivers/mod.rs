//! LED transmitter and input drivers.

pub mod button;
pub mod ws2812;
