//! Hand-over point between the asynchronous input producer and the frame loop.
//!
//! The producer never touches cloud state; it only posts into the mailbox. The
//! frame callback drains it once per frame. Samples share one slot, so a burst
//! of camera results between two frames collapses to the newest one. Failure
//! and stop notices have their own slot and are delivered ahead of any sample
//! posted after them.

use std::fmt;

use crate::gesture::{GestureSample, PointerSample};

/// Why the camera path is unavailable. This is the only payload the core
/// needs from a failed input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputFailure {
    Busy,
    Denied,
    Other,
}

impl InputFailure {
    /// Classify a DOM exception name from `getUserMedia`.
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "NotReadableError" | "TrackStartError" | "AbortError" => InputFailure::Busy,
            "NotAllowedError" | "PermissionDeniedError" | "SecurityError" => InputFailure::Denied,
            _ => InputFailure::Other,
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            InputFailure::Busy => "Camera is in use by another application. Using mouse control.",
            InputFailure::Denied => "Camera permission denied. Using mouse control.",
            InputFailure::Other => "Camera unavailable. Using mouse control.",
        }
    }
}

impl fmt::Display for InputFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputFailure::Busy => "busy",
            InputFailure::Denied => "denied",
            InputFailure::Other => "other",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Sample(GestureSample),
    Failed(InputFailure),
    /// The camera was shut down; targets fall back to neutral.
    Stopped,
}

#[derive(Debug, Default)]
pub struct SampleMailbox {
    control: Option<InputEvent>,
    sample: Option<GestureSample>,
    camera_live: bool,
}

impl SampleMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a camera result. `GestureSample::Absent` means the camera is
    /// running but saw no hand this time.
    pub fn post_camera(&mut self, sample: GestureSample) {
        self.camera_live = true;
        self.sample = Some(sample);
    }

    /// Pointer samples only drive the cloud while the camera path is not live.
    pub fn post_pointer(&mut self, pointer: PointerSample) -> bool {
        if self.camera_live {
            return false;
        }
        self.sample = Some(GestureSample::Pointer(pointer));
        true
    }

    /// The pointer left the viewport; same gating as [`Self::post_pointer`].
    pub fn clear_pointer(&mut self) -> bool {
        if self.camera_live {
            return false;
        }
        self.sample = Some(GestureSample::Absent);
        true
    }

    /// A pending sample predates the failure and is discarded.
    pub fn fail(&mut self, failure: InputFailure) {
        self.camera_live = false;
        self.sample = None;
        self.control = Some(InputEvent::Failed(failure));
    }

    pub fn stop(&mut self) {
        self.camera_live = false;
        self.sample = None;
        self.control = Some(InputEvent::Stopped);
    }

    #[inline]
    pub fn camera_live(&self) -> bool {
        self.camera_live
    }

    /// Next pending event, control notices first. Call until `None`.
    pub fn take(&mut self) -> Option<InputEvent> {
        self.control
            .take()
            .or_else(|| self.sample.take().map(InputEvent::Sample))
    }
}
