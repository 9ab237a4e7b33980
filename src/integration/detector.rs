//! Traits for the collaborators around the tracking core.

use std::fmt::Display;

use crate::mission::VehicleCommand;
use crate::tracker::RawDetection;

/// Single image handed over by the frame source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Raw image bytes (format depends on the source)
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

/// Source of frames, one per tick.
pub trait FrameSource {
    /// Error type for acquisition failures.
    type Error: Display;

    /// Block until the next frame is available.
    ///
    /// `Ok(None)` and `Err(_)` both make the loop skip the tick.
    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error>;

    /// Whether more frames can arrive. The loop stops once this is `false`.
    fn is_open(&self) -> bool {
        true
    }

    /// Release the underlying device. Called once when the loop ends.
    fn close(&mut self) {}
}

/// Trait for marker detection backends.
///
/// Implement this trait to connect any QR decoder to the mission loop.
///
/// # Example
///
/// ```
/// use rov_qr_mission::{DetectionSource, RawDetection};
///
/// struct NoMarkers;
///
/// impl DetectionSource for NoMarkers {
///     type Error = std::convert::Infallible;
///
///     fn detect(&mut self, _input: &[u8], _width: u32, _height: u32) -> Result<Vec<RawDetection>, Self::Error> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: Display;

    /// Decode all markers visible in an image.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<RawDetection>, Self::Error>;
}

/// Receiver of vehicle commands issued on phase transitions.
pub trait CommandSink {
    type Error: Display;

    fn dispatch(&mut self, command: &VehicleCommand) -> Result<(), Self::Error>;
}

/// Command sink that only records what it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub commands: Vec<VehicleCommand>,
}

impl CommandSink for RecordingSink {
    type Error = std::convert::Infallible;

    fn dispatch(&mut self, command: &VehicleCommand) -> Result<(), Self::Error> {
        self.commands.push(command.clone());
        Ok(())
    }
}
