//! Application core — backlight logic, zero direct I/O.
//!
//! Colour selection, frame memoization, and persistence policy live here.
//! All interaction with hardware and storage happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod ports;
pub mod service;
