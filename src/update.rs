//! Firmware upload bookkeeping and status display for update mode.
//!
//! The HTTP server and flash driver are external. The server hands each
//! received chunk to [`UpdateSession::handle_chunk`], which forwards the bytes
//! to a [`FirmwareSink`] and tracks progress. [`UpdateSession::render`] shows
//! the session on the strip.

use crate::buffer::PixelBuffer;
use crate::config::LightsConfig;
use crate::time::TimeDuration;

/// Trait for abstracting reprogrammable firmware storage.
pub trait FirmwareSink {
    type Error;

    /// Prepares storage for an image of `total_len` bytes.
    fn begin(&mut self, total_len: usize) -> Result<(), Self::Error>;

    /// Appends `data` to the image, returning the number of bytes written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Validates and activates the written image.
    fn finish(&mut self) -> Result<(), Self::Error>;

    /// Discards a partially written image.
    fn abort(&mut self);
}

/// One piece of an uploaded firmware image.
#[derive(Debug, Clone, Copy)]
pub struct UpdateChunk<'a> {
    /// Byte offset of `data` within the image.
    pub offset: usize,

    pub data: &'a [u8],

    /// Size of the whole image.
    pub total_len: usize,

    /// Last chunk of the image.
    pub is_final: bool,
}

/// Update failures. All of them abort the write; none are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// Chunk arrived with no upload in progress.
    NotStarted,

    /// Storage refused to start the image.
    BeginFailed,

    /// Chunk does not continue where the last one ended.
    UnexpectedOffset { expected: usize, actual: usize },

    /// Storage rejected a write.
    WriteFailed { offset: usize },

    /// Storage accepted fewer bytes than sent.
    ShortWrite {
        offset: usize,
        expected: usize,
        written: usize,
    },

    /// Received byte count disagrees with the announced image size.
    SizeMismatch { expected: usize, actual: usize },

    /// Storage rejected the finished image.
    FinishFailed,
}

impl core::fmt::Display for UpdateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UpdateError::NotStarted => write!(f, "no update in progress"),
            UpdateError::BeginFailed => write!(f, "failed to begin update"),
            UpdateError::UnexpectedOffset { expected, actual } => {
                write!(f, "expected chunk at offset {}, got {}", expected, actual)
            }
            UpdateError::WriteFailed { offset } => {
                write!(f, "write failed at offset {}", offset)
            }
            UpdateError::ShortWrite {
                offset,
                expected,
                written,
            } => {
                write!(
                    f,
                    "short write at offset {}: {} of {} bytes",
                    offset, written, expected
                )
            }
            UpdateError::SizeMismatch { expected, actual } => {
                write!(f, "image size mismatch: expected {} bytes, got {}", expected, actual)
            }
            UpdateError::FinishFailed => write!(f, "failed to finish update"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UpdateError {}

/// Current state of an update session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateState {
    /// Waiting for the first chunk.
    Idle,

    /// Image partially written.
    Receiving { written: usize, total: usize },

    /// Image written and activated.
    Succeeded { total: usize },

    /// Write aborted.
    Failed(UpdateError),
}

/// Result of a successfully handled chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateProgress {
    /// More chunks expected.
    InProgress { written: usize, total: usize },

    /// Image is in place; the device should restart.
    RestartRequested,
}

/// Tracks one firmware upload at a time.
#[derive(Debug, Clone, Copy)]
pub struct UpdateSession {
    state: UpdateState,
}

impl UpdateSession {
    /// Creates an idle session.
    pub const fn new() -> Self {
        Self {
            state: UpdateState::Idle,
        }
    }

    pub fn state(&self) -> UpdateState {
        self.state
    }

    /// Fraction of the image written, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        match self.state {
            UpdateState::Receiving { written, total } if total > 0 => {
                (written as f32 / total as f32).min(1.0)
            }
            UpdateState::Succeeded { .. } => 1.0,
            _ => 0.0,
        }
    }

    /// Writes one chunk through `sink`.
    ///
    /// A chunk at offset 0 starts a new image, discarding any partial one.
    /// Every later chunk must continue at the byte where the previous one
    /// ended. A chunk reaching past the announced size is rejected before
    /// any of it is written. The final chunk finishes the image.
    ///
    /// # Errors
    /// Any error aborts the sink and leaves the session `Failed` until the next
    /// chunk at offset 0.
    pub fn handle_chunk<F: FirmwareSink>(
        &mut self,
        chunk: UpdateChunk<'_>,
        sink: &mut F,
    ) -> Result<UpdateProgress, UpdateError> {
        if chunk.offset == 0 {
            if let UpdateState::Receiving { .. } = self.state {
                warn!("restarting interrupted update");
                sink.abort();
            }

            info!("update started: {=usize} bytes", chunk.total_len);
            if sink.begin(chunk.total_len).is_err() {
                return self.fail(UpdateError::BeginFailed, sink);
            }
            self.state = UpdateState::Receiving {
                written: 0,
                total: chunk.total_len,
            };
        }

        let UpdateState::Receiving { written, total } = self.state else {
            return Err(UpdateError::NotStarted);
        };

        if chunk.offset != written {
            return self.fail(
                UpdateError::UnexpectedOffset {
                    expected: written,
                    actual: chunk.offset,
                },
                sink,
            );
        }

        let len = chunk.data.len();
        let end = written + len;
        if end > total {
            return self.fail(
                UpdateError::SizeMismatch {
                    expected: total,
                    actual: end,
                },
                sink,
            );
        }

        match sink.write(chunk.data) {
            Ok(n) if n == len => {}
            Ok(n) => {
                return self.fail(
                    UpdateError::ShortWrite {
                        offset: chunk.offset,
                        expected: len,
                        written: n,
                    },
                    sink,
                );
            }
            Err(_) => {
                return self.fail(UpdateError::WriteFailed { offset: chunk.offset }, sink);
            }
        }

        let written = end;
        if chunk.is_final && written != total {
            return self.fail(
                UpdateError::SizeMismatch {
                    expected: total,
                    actual: written,
                },
                sink,
            );
        }

        if !chunk.is_final {
            self.state = UpdateState::Receiving { written, total };
            return Ok(UpdateProgress::InProgress { written, total });
        }

        if sink.finish().is_err() {
            return self.fail(UpdateError::FinishFailed, sink);
        }

        info!("update finished: {=usize} bytes", total);
        self.state = UpdateState::Succeeded { total };
        Ok(UpdateProgress::RestartRequested)
    }

    fn fail<F: FirmwareSink>(
        &mut self,
        error: UpdateError,
        sink: &mut F,
    ) -> Result<UpdateProgress, UpdateError> {
        warn!("update failed: {}", error);
        sink.abort();
        self.state = UpdateState::Failed(error);
        Err(error)
    }

    /// Draws the session status: configure color while idle, a progress bar
    /// while receiving, then success or failure color.
    pub fn render<D: TimeDuration, const N: usize>(
        &self,
        buffer: &mut PixelBuffer<N>,
        config: &LightsConfig<D>,
    ) {
        match self.state {
            UpdateState::Idle => buffer.fill_solid(config.configure_color()),
            UpdateState::Receiving { .. } => {
                buffer.fill_fraction(self.fraction(), config.progress_color())
            }
            UpdateState::Succeeded { .. } => buffer.fill_solid(config.success_color()),
            UpdateState::Failed(_) => buffer.fill_solid(config.failure_color()),
        }
    }
}

impl Default for UpdateSession {
    fn default() -> Self {
        Self::new()
    }
}
