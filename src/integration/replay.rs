//! Offline replay of recorded detections.
//!
//! A script is a JSON array with one entry per tick, each entry being the list of
//! detections the decoder reported for that frame:
//!
//! ```json
//! [
//!   [{"payload": "go left", "corners": [[0, 0], [40, 0], [40, 40], [0, 40]]}],
//!   []
//! ]
//! ```

use std::collections::VecDeque;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tracker::RawDetection;

use super::{DetectionSource, Frame, FrameSource};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read replay script: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse replay script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("replay script exhausted")]
    Exhausted,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplayScript {
    pub ticks: Vec<Vec<RawDetection>>,
}

impl ReplayScript {
    pub fn new(ticks: Vec<Vec<RawDetection>>) -> Self {
        Self { ticks }
    }

    pub fn from_json_str(source: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Split into a frame source producing one blank frame per tick and a detector
    /// replaying the recorded detections in order.
    pub fn into_parts(self, width: u32, height: u32) -> (ReplayFrames, ReplayDetector) {
        let frames = ReplayFrames {
            remaining: self.ticks.len(),
            width,
            height,
        };
        let detector = ReplayDetector {
            ticks: self.ticks.into(),
        };
        (frames, detector)
    }
}

/// Blank frames, one per scripted tick.
#[derive(Debug, Clone)]
pub struct ReplayFrames {
    remaining: usize,
    width: u32,
    height: u32,
}

impl FrameSource for ReplayFrames {
    type Error = ReplayError;

    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error> {
        if self.remaining == 0 {
            return Err(ReplayError::Exhausted);
        }
        self.remaining -= 1;
        Ok(Some(Frame::new(Vec::new(), self.width, self.height)))
    }

    fn is_open(&self) -> bool {
        self.remaining > 0
    }

    fn close(&mut self) {
        self.remaining = 0;
    }
}

/// Detector that ignores the image and pops the next scripted tick.
#[derive(Debug, Clone)]
pub struct ReplayDetector {
    ticks: VecDeque<Vec<RawDetection>>,
}

impl DetectionSource for ReplayDetector {
    type Error = ReplayError;

    fn detect(
        &mut self,
        _input: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Vec<RawDetection>, Self::Error> {
        self.ticks.pop_front().ok_or(ReplayError::Exhausted)
    }
}
