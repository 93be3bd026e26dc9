//! Bit-banged WS2812B transmitter.
//!
//! Each bit is a high pulse followed by a low pulse; the ratio encodes the
//! value and the sum is a fixed ~1.2 µs period:
//!
//! | Bit | High      | Low       |
//! |-----|-----------|-----------|
//! | 0   | T0H 300ns | T0L 900ns |
//! | 1   | T1H 600ns | T1L 600ns |
//!
//! A low level held longer than the reset threshold latches the chain, so
//! the whole frame is sent inside one [`AtomicSection`]: an interrupt
//! mid-frame would stretch a low phase into a premature latch. Durations are
//! busy-waits on the CPU cycle counter; nothing here can fail or report a
//! timing fault.

use crate::app::ports::{AtomicSection, CycleCounter, DataLine, LedOutput};
use crate::frame::{CHANNELS, LED_COUNT, PixelBuffer};

/// Nominal 0-bit high time.
pub const T0H_NS: u32 = 300;
/// Nominal 0-bit low time.
pub const T0L_NS: u32 = 900;
/// Nominal 1-bit high time.
pub const T1H_NS: u32 = 600;
/// Nominal 1-bit low time.
pub const T1L_NS: u32 = 600;
/// Low time that latches the chain (WS2812B rev. 5 needs > 280 µs).
pub const LATCH_NS: u32 = 280_000;

/// Bits streamed per LED.
pub const BITS_PER_LED: u32 = (CHANNELS * 8) as u32;

/// Convert nanoseconds to whole cycles at `clock_hz`, rounding half up.
pub const fn ns_to_cycles(ns: u32, clock_hz: u32) -> u32 {
    ((ns as u64 * clock_hz as u64 + 500_000_000) / 1_000_000_000) as u32
}

/// Per-phase spin lengths in CPU cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingProfile {
    pub t0h: u32,
    pub t0l: u32,
    pub t1h: u32,
    pub t1l: u32,
    /// Low time after the frame, spun outside the critical section.
    pub latch: u32,
}

impl TimingProfile {
    /// Derive the profile for a CPU clock.
    ///
    /// `write_overhead_cycles` is what one GPIO write costs on the target;
    /// it is taken off every phase so the realized pulse, write included,
    /// lands on the nominal time. Every phase loses the same amount, so the
    /// 0-bit and 1-bit periods stay within one cycle of each other.
    pub const fn from_clock(clock_hz: u32, write_overhead_cycles: u32) -> Self {
        Self {
            t0h: ns_to_cycles(T0H_NS, clock_hz).saturating_sub(write_overhead_cycles),
            t0l: ns_to_cycles(T0L_NS, clock_hz).saturating_sub(write_overhead_cycles),
            t1h: ns_to_cycles(T1H_NS, clock_hz).saturating_sub(write_overhead_cycles),
            t1l: ns_to_cycles(T1L_NS, clock_hz).saturating_sub(write_overhead_cycles),
            latch: ns_to_cycles(LATCH_NS, clock_hz),
        }
    }

    /// `(high, low)` spin lengths for one bit.
    pub const fn phases(&self, bit: bool) -> (u32, u32) {
        if bit {
            (self.t1h, self.t1l)
        } else {
            (self.t0h, self.t0l)
        }
    }

    /// Spin cycles for one 0-bit.
    pub const fn zero_period(&self) -> u32 {
        self.t0h + self.t0l
    }

    /// Spin cycles for one 1-bit.
    pub const fn one_period(&self) -> u32 {
        self.t1h + self.t1l
    }

    /// Worst-case spin cycles spent inside the critical section for one
    /// frame (every bit at the longer period).
    pub const fn frame_cycles(&self) -> u32 {
        let zero = self.zero_period();
        let one = self.one_period();
        let bit = if zero > one { zero } else { one };
        LED_COUNT as u32 * BITS_PER_LED * bit
    }
}

/// Spin until `cycles` have elapsed since the first read.
#[inline(always)]
fn spin(counter: &mut impl CycleCounter, cycles: u32) {
    let start = counter.cycles();
    while counter.cycles().wrapping_sub(start) < cycles {}
}

#[inline(always)]
fn write_byte(
    line: &mut impl DataLine,
    counter: &mut impl CycleCounter,
    timing: &TimingProfile,
    byte: u8,
) {
    let mut mask = 0b1000_0000u8;
    while mask != 0 {
        let (high, low) = timing.phases(byte & mask != 0);
        line.set_high();
        spin(counter, high);
        line.set_low();
        spin(counter, low);
        mask >>= 1;
    }
}

/// WS2812B driver over an exclusively owned data line.
pub struct Ws2812Transmitter<L, C, A> {
    line: L,
    counter: C,
    section: A,
    timing: TimingProfile,
}

impl<L: DataLine, C: CycleCounter, A: AtomicSection> Ws2812Transmitter<L, C, A> {
    pub fn new(line: L, counter: C, section: A, timing: TimingProfile) -> Self {
        Self {
            line,
            counter,
            section,
            timing,
        }
    }

    pub fn timing(&self) -> TimingProfile {
        self.timing
    }

    /// Give back the line, counter and section.
    pub fn release(self) -> (L, C, A) {
        (self.line, self.counter, self.section)
    }

    /// Send `frame` MSB-first, LED 0 first, then hold the line low for the
    /// latch.
    ///
    /// The line is reconfigured on every call; nothing is assumed to have
    /// survived from the previous frame.
    pub fn transmit(&mut self, frame: &PixelBuffer) {
        let Self {
            line,
            counter,
            section,
            timing,
        } = self;

        line.configure_output();
        section.run(|| {
            for byte in frame.bytes() {
                write_byte(line, counter, timing, byte);
            }
        });
        // Preemption here only lengthens the low time.
        spin(counter, timing.latch);
    }
}

impl<L: DataLine, C: CycleCounter, A: AtomicSection> LedOutput for Ws2812Transmitter<L, C, A> {
    fn write(&mut self, frame: &PixelBuffer) {
        self.transmit(frame);
    }
}
