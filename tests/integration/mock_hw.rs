//! Mock hardware adapters for integration tests.
//!
//! The counter, data line and section share one simulated clock so tests
//! can reconstruct the exact waveform the transmitter produced, including
//! which edges happened with interrupts masked.

use std::cell::Cell;
use std::rc::Rc;

use rgb_backlight::app::ports::{AtomicSection, CycleCounter, DataLine, LedOutput};
use rgb_backlight::drivers::ws2812::TimingProfile;
use rgb_backlight::frame::{Grb, LED_COUNT, PixelBuffer};

// ── Shared bus state ──────────────────────────────────────────

/// Clock and section flag shared by every mock on one "bus".
#[derive(Clone, Default)]
pub struct Bus {
    pub clock: Rc<Cell<u32>>,
    pub in_section: Rc<Cell<bool>>,
}

#[allow(dead_code)]
impl Bus {
    pub fn starting_at(cycles: u32) -> Self {
        let bus = Self::default();
        bus.clock.set(cycles);
        bus
    }

    pub fn now(&self) -> u32 {
        self.clock.get()
    }
}

// ── StepCounter ───────────────────────────────────────────────

/// Advances one cycle per read, so a spin of `n` cycles consumes `n + 1`.
pub struct StepCounter {
    bus: Bus,
}

impl StepCounter {
    pub fn new(bus: &Bus) -> Self {
        Self { bus: bus.clone() }
    }
}

impl CycleCounter for StepCounter {
    fn cycles(&mut self) -> u32 {
        let now = self.bus.clock.get();
        self.bus.clock.set(now.wrapping_add(1));
        now
    }
}

// ── RecordingLine ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub high: bool,
    pub at: u32,
    pub in_section: bool,
}

/// Data line that timestamps every level change.
pub struct RecordingLine {
    bus: Bus,
    pub edges: Vec<Edge>,
    /// `in_section` at each `configure_output` call.
    pub configured: Vec<bool>,
}

#[allow(dead_code)]
impl RecordingLine {
    pub fn new(bus: &Bus) -> Self {
        Self {
            bus: bus.clone(),
            edges: Vec::new(),
            configured: Vec::new(),
        }
    }

    fn record(&mut self, high: bool) {
        self.edges.push(Edge {
            high,
            at: self.bus.clock.get(),
            in_section: self.bus.in_section.get(),
        });
    }

    /// Rebuild the byte stream from the recorded edges.
    ///
    /// Each bit is a high edge followed by a low edge; with [`StepCounter`]
    /// the high phase spans `t0h + 1` or `t1h + 1` counter steps.
    pub fn decode(&self, timing: &TimingProfile) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut current = 0u8;
        for (i, pair) in self.edges.chunks_exact(2).enumerate() {
            assert!(pair[0].high && !pair[1].high, "edge pair {i} out of order");
            let high = pair[1].at.wrapping_sub(pair[0].at) - 1;
            let bit = if high == timing.t1h {
                1
            } else if high == timing.t0h {
                0
            } else {
                panic!("bit {i}: high phase of {high} cycles matches neither T0H nor T1H");
            };
            current = (current << 1) | bit;
            if i % 8 == 7 {
                bytes.push(current);
                current = 0;
            }
        }
        bytes
    }

    /// Low-phase lengths (in spin cycles) between consecutive bits.
    pub fn low_phases(&self) -> Vec<u32> {
        self.edges
            .windows(2)
            .filter(|w| !w[0].high && w[1].high)
            .map(|w| w[1].at.wrapping_sub(w[0].at) - 1)
            .collect()
    }
}

impl DataLine for RecordingLine {
    fn configure_output(&mut self) {
        self.configured.push(self.bus.in_section.get());
    }

    fn set_high(&mut self) {
        self.record(true);
    }

    fn set_low(&mut self) {
        self.record(false);
    }
}

// ── TrackingSection ───────────────────────────────────────────

/// Critical-section stand-in that flags the bus while held.
pub struct TrackingSection {
    bus: Bus,
    pub entries: usize,
}

impl TrackingSection {
    pub fn new(bus: &Bus) -> Self {
        Self {
            bus: bus.clone(),
            entries: 0,
        }
    }
}

impl AtomicSection for TrackingSection {
    fn run<R>(&mut self, f: impl FnOnce() -> R) -> R {
        assert!(!self.bus.in_section.get(), "critical section re-entered");
        self.entries += 1;
        self.bus.in_section.set(true);
        let r = f();
        self.bus.in_section.set(false);
        r
    }
}

// ── RecordingOutput ───────────────────────────────────────────

/// LED output that keeps every frame it was handed.
#[derive(Default)]
pub struct RecordingOutput {
    pub frames: Vec<[Grb; LED_COUNT]>,
}

#[allow(dead_code)]
impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&[Grb; LED_COUNT]> {
        self.frames.last()
    }
}

impl LedOutput for RecordingOutput {
    fn write(&mut self, frame: &PixelBuffer) {
        self.frames.push(*frame.slots());
    }
}
