//! Adapter from a raw [`WindowSystem`] to the [`WindowManager`] contract.
//!
//! Operating systems report and accept the *outer* frame of a window, which
//! includes invisible resize borders.  Tiling on those rects leaves visible
//! gaps, so this adapter works on the content area instead:
//!
//! * the horizontal inset `dx` is split evenly between the left and right
//!   edges, the vertical inset `dy` sits entirely at the bottom edge;
//! * each inset is `frame size − client size`, capped by [`BorderPolicy`] so
//!   that a window with an unusually large frame (toolbars, tabs drawn into
//!   the frame) is not shrunk by the whole difference.

use crate::geometry::Rect;
use crate::traits::{WindowHandle, WindowManager, WindowSystem, WmError};
use log::trace;
use serde::{Deserialize, Serialize};

/// Upper bounds for the decoration insets, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderPolicy {
    /// Cap for the combined left + right inset.  Default: `16.0`.
    pub max_horizontal: f64,
    /// Cap for the bottom inset.  Default: `8.0`.
    pub max_vertical: f64,
}

impl Default for BorderPolicy {
    fn default() -> Self {
        Self {
            max_horizontal: 16.0,
            max_vertical: 8.0,
        }
    }
}

/// Decoration-compensating [`WindowManager`] over a pixel-space
/// [`WindowSystem`].
pub struct NativeWindowManager<S> {
    system: S,
    policy: BorderPolicy,
}

impl<S: WindowSystem> NativeWindowManager<S> {
    pub fn new(system: S) -> Self {
        Self::with_policy(system, BorderPolicy::default())
    }

    pub fn with_policy(system: S, policy: BorderPolicy) -> Self {
        Self { system, policy }
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn policy(&self) -> BorderPolicy {
        self.policy
    }

    /// Frame rect and capped `(dx, dy)` insets of `handle`.
    fn frame_and_insets(&self, handle: WindowHandle) -> Result<(Rect, f64, f64), WmError> {
        let frame = self.system.frame_rect(handle)?;
        let client = self.system.client_size(handle)?;
        let dx = capped_inset(frame.width() - client.x, self.policy.max_horizontal);
        let dy = capped_inset(frame.height() - client.y, self.policy.max_vertical);
        Ok((frame, dx, dy))
    }
}

/// `inset` limited to `0..=cap`.  A negative (or NaN) cap from the config
/// counts as zero.
fn capped_inset(inset: f64, cap: f64) -> f64 {
    inset.max(0.0).min(cap.max(0.0))
}

/// Content rect of a window whose frame is `frame`.
pub fn content_rect(frame: Rect, dx: f64, dy: f64) -> Rect {
    Rect::new(
        frame.left + dx / 2.0,
        frame.top,
        frame.right - dx / 2.0,
        frame.bottom - dy,
    )
}

/// Frame rect that yields `content` as the content area.
pub fn frame_rect(content: Rect, dx: f64, dy: f64) -> Rect {
    Rect::new(
        content.left - dx / 2.0,
        content.top,
        content.right + dx / 2.0,
        content.bottom + dy,
    )
}

impl<S: WindowSystem> WindowManager for NativeWindowManager<S> {
    fn focused_window(&self) -> Result<Option<WindowHandle>, WmError> {
        self.system.foreground_window()
    }

    fn set_focused_window(&self, handle: WindowHandle) -> Result<(), WmError> {
        self.system.set_foreground_window(handle)
    }

    fn visible_windows(&self) -> Result<Vec<WindowHandle>, WmError> {
        self.system.visible_windows()
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WmError> {
        let (frame, dx, dy) = self.frame_and_insets(handle)?;
        Ok(content_rect(frame, dx, dy))
    }

    fn position_window(&self, handle: WindowHandle, rect: Rect) -> Result<(), WmError> {
        let (_, dx, dy) = self.frame_and_insets(handle)?;
        let frame = frame_rect(rect, dx, dy);
        trace!("{}: content {:?} -> frame {:?}", handle, rect, frame);
        self.system.set_frame(handle, frame)
    }
}
