//! Shared test infrastructure for vehicle-lights integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use vehicle_lights::{
    FirmwareSink, InputSampler, InputState, LedStrip, LightsConfig, Rgb, TimeDuration,
    TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Strip
// ============================================================================

/// Mock strip that records every frame written to it
pub struct MockStrip {
    frames: Vec<Vec<Rgb>>,
}

impl MockStrip {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn last_frame(&self) -> &[Rgb] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl LedStrip for MockStrip {
    fn write(&mut self, pixels: &[Rgb]) {
        self.frames.push(pixels.to_vec());
    }
}

// ============================================================================
// Scripted Input Sampler
// ============================================================================

/// Sampler that returns queued states, then repeats the last one
pub struct ScriptedSampler {
    script: Vec<InputState>,
    last: InputState,
}

impl ScriptedSampler {
    pub fn new(script: &[InputState]) -> Self {
        let mut script = script.to_vec();
        script.reverse();
        Self {
            script,
            last: InputState::default(),
        }
    }
}

impl InputSampler for ScriptedSampler {
    fn sample(&mut self) -> InputState {
        if let Some(next) = self.script.pop() {
            self.last = next;
        }
        self.last
    }
}

// ============================================================================
// Mock Firmware Sink
// ============================================================================

/// Which sink call should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFault {
    None,
    Begin,
    Write,
    ShortWrite,
    Finish,
}

/// In-memory firmware storage with injectable faults
pub struct MockSink {
    pub image: Vec<u8>,
    /// Bytes passed to `write`, including ones later aborted
    pub received: usize,
    pub begun_with: Option<usize>,
    pub finished: bool,
    pub aborts: usize,
    pub fault: SinkFault,
}

impl MockSink {
    pub fn new() -> Self {
        Self::with_fault(SinkFault::None)
    }

    pub fn with_fault(fault: SinkFault) -> Self {
        Self {
            image: Vec::new(),
            received: 0,
            begun_with: None,
            finished: false,
            aborts: 0,
            fault,
        }
    }
}

impl FirmwareSink for MockSink {
    type Error = ();

    fn begin(&mut self, total_len: usize) -> Result<(), ()> {
        if self.fault == SinkFault::Begin {
            return Err(());
        }
        self.image.clear();
        self.begun_with = Some(total_len);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        self.received += data.len();
        match self.fault {
            SinkFault::Write => Err(()),
            SinkFault::ShortWrite => {
                let n = data.len() / 2;
                self.image.extend_from_slice(&data[..n]);
                Ok(n)
            }
            _ => {
                self.image.extend_from_slice(data);
                Ok(data.len())
            }
        }
    }

    fn finish(&mut self) -> Result<(), ()> {
        if self.fault == SinkFault::Finish {
            return Err(());
        }
        self.finished = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.aborts += 1;
        self.image.clear();
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub const NUM_LEDS: usize = 32;
pub const TURN_SIZE: usize = 11;

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const BACKLIGHT: Rgb = Rgb::new(100, 0, 0);
pub const STOP: Rgb = Rgb::new(255, 0, 0);
pub const AMBER: Rgb = Rgb::new(255, 127, 0);

pub const OFF: InputState = InputState::new(false, false, false, false);
pub const BACK: InputState = InputState::new(true, false, false, false);
pub const STOP_ONLY: InputState = InputState::new(false, true, false, false);
pub const LEFT: InputState = InputState::new(false, false, true, false);
pub const RIGHT: InputState = InputState::new(false, false, false, true);

pub fn default_config() -> LightsConfig<TestDuration> {
    LightsConfig::default()
}

/// Eleven distinct colors so pattern order is visible in the buffer
pub fn gradient_config() -> LightsConfig<TestDuration> {
    let pattern: Vec<Rgb> = (0..TURN_SIZE as u8)
        .map(|i| Rgb::new(200, 10 * (i + 1), 0))
        .collect();

    LightsConfig::builder()
        .chase_pattern(&pattern)
        .build()
        .unwrap()
}

/// Count pixels equal to `color`
pub fn count(pixels: &[Rgb], color: Rgb) -> usize {
    pixels.iter().filter(|&&p| p == color).count()
}
