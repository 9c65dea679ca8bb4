//! Core traits that decouple wintile from any specific windowing system or
//! transport mechanism.
//!
//! * [`WindowManager`] is the capability set every strategy works against.
//!   The adapters in [`manager`](crate::manager) implement it, and so can a
//!   test double.
//! * [`WindowSystem`] is the raw, pixel-space surface of an operating
//!   system's windowing subsystem, consumed by
//!   [`NativeWindowManager`](crate::manager::native::NativeWindowManager).
//! * [`WorkArea`] reports the usable monitor area for percent conversion.
//! * [`CommandSource`] delivers user intent (a Unix socket, a test harness,
//!   …) so the main loop is not coupled to any IPC mechanism.

use crate::command::Command;
use crate::geometry::{Rect, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{mpsc, Arc};

/// Opaque identifier of an on-screen window.
///
/// Only the backend that produced a handle knows what it refers to; the
/// rest of the crate compares and passes it along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowHandle(pub u64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Errors produced by window manager backends.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WmError {
    /// The handle refers to a window that is closed or was never known to
    /// this backend.
    #[error("window {0} not found")]
    WindowNotFound(WindowHandle),

    /// The backend itself failed (IPC down, bad response, …).
    #[error("window manager backend error: {0}")]
    Backend(String),
}

/// The capability set shared by all window manager backends.
///
/// Rects are in the backend's own coordinate space: desktop pixels for the
/// native adapter, percent of the work area for the converter, whatever the
/// caller chose for the sandbox.
///
/// Methods take `&self`; backends with mutable state use interior
/// mutability so that one instance can be shared behind an `Arc`.
pub trait WindowManager: Send + Sync {
    /// The window that currently has input focus, if any.
    fn focused_window(&self) -> Result<Option<WindowHandle>, WmError>;

    /// Request that `handle` receives input focus.
    fn set_focused_window(&self, handle: WindowHandle) -> Result<(), WmError>;

    /// Visible windows in the backend's enumeration order.  The order is
    /// not guaranteed to be stable between calls.
    fn visible_windows(&self) -> Result<Vec<WindowHandle>, WmError>;

    /// Current rect of `handle`.
    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WmError>;

    /// Move and resize `handle` to `rect`.
    fn position_window(&self, handle: WindowHandle, rect: Rect) -> Result<(), WmError>;
}

impl<W: WindowManager + ?Sized> WindowManager for Arc<W> {
    fn focused_window(&self) -> Result<Option<WindowHandle>, WmError> {
        (**self).focused_window()
    }

    fn set_focused_window(&self, handle: WindowHandle) -> Result<(), WmError> {
        (**self).set_focused_window(handle)
    }

    fn visible_windows(&self) -> Result<Vec<WindowHandle>, WmError> {
        (**self).visible_windows()
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WmError> {
        (**self).window_rect(handle)
    }

    fn position_window(&self, handle: WindowHandle, rect: Rect) -> Result<(), WmError> {
        (**self).position_window(handle, rect)
    }
}

/// Raw access to an operating system's windowing subsystem, in desktop
/// pixels.
///
/// The frame rect includes non-client decoration (borders, resize areas);
/// the client size is the content area only.  Translating between the two
/// is the job of the native adapter, not of the implementor.
pub trait WindowSystem: Send + Sync {
    fn foreground_window(&self) -> Result<Option<WindowHandle>, WmError>;

    fn set_foreground_window(&self, handle: WindowHandle) -> Result<(), WmError>;

    fn visible_windows(&self) -> Result<Vec<WindowHandle>, WmError>;

    /// Outer frame of `handle`, decoration included.
    fn frame_rect(&self, handle: WindowHandle) -> Result<Rect, WmError>;

    /// Width and height of the client area of `handle`.
    fn client_size(&self, handle: WindowHandle) -> Result<Vector, WmError>;

    /// Place the outer frame of `handle` at `frame`.
    fn set_frame(&self, handle: WindowHandle, frame: Rect) -> Result<(), WmError>;
}

/// Source of the usable monitor area (the screen minus panels and docks).
pub trait WorkArea: Send + Sync {
    fn work_area(&self) -> Result<Rect, WmError>;
}

/// A fixed work area.
impl WorkArea for Rect {
    fn work_area(&self) -> Result<Rect, WmError> {
        Ok(*self)
    }
}

impl<A: WorkArea + ?Sized> WorkArea for Arc<A> {
    fn work_area(&self) -> Result<Rect, WmError> {
        (**self).work_area()
    }
}

//  Command Source

/// A source of [`Command`]s.
///
/// Implementations listen on some transport and forward parsed commands
/// into the provided [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Direction;
    use std::sync::Mutex;

    //  Mock WindowManager

    /// A test double that records every placement made through it.
    #[derive(Debug, Default)]
    struct MockWm {
        placements: Mutex<Vec<(WindowHandle, Rect)>>,
    }

    impl WindowManager for MockWm {
        fn focused_window(&self) -> Result<Option<WindowHandle>, WmError> {
            Ok(Some(WindowHandle(0xdead)))
        }

        fn set_focused_window(&self, _handle: WindowHandle) -> Result<(), WmError> {
            Ok(())
        }

        fn visible_windows(&self) -> Result<Vec<WindowHandle>, WmError> {
            Ok(vec![WindowHandle(0xdead)])
        }

        fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WmError> {
            if handle == WindowHandle(0xdead) {
                Ok(Rect::new(0.0, 0.0, 10.0, 10.0))
            } else {
                Err(WmError::WindowNotFound(handle))
            }
        }

        fn position_window(&self, handle: WindowHandle, rect: Rect) -> Result<(), WmError> {
            self.placements.lock().unwrap().push((handle, rect));
            Ok(())
        }
    }

    #[test]
    fn arc_forwards_to_inner_manager() {
        let wm = Arc::new(MockWm::default());
        let shared: Arc<dyn WindowManager> = wm.clone();
        shared
            .position_window(WindowHandle(0xdead), Rect::new(1.0, 2.0, 3.0, 4.0))
            .unwrap();
        assert_eq!(wm.placements.lock().unwrap().len(), 1);
        assert_eq!(
            shared.window_rect(WindowHandle(1)),
            Err(WmError::WindowNotFound(WindowHandle(1)))
        );
    }

    #[test]
    fn window_handle_display_is_hex() {
        assert_eq!(WindowHandle(0xbeef).to_string(), "0xbeef");
    }

    #[test]
    fn fixed_rect_is_a_work_area() {
        let area = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        assert_eq!(area.work_area().unwrap(), area);
    }

    //  Mock CommandSource

    /// A test double that emits a fixed sequence of commands.
    struct MockSource {
        commands: Vec<Command>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    impl CommandSource for MockSource {
        type Error = MockError;

        fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), MockError> {
            for cmd in self.commands.drain(..) {
                let _ = sink.send(cmd);
            }
            Ok(())
        }
    }

    #[test]
    fn mock_source_emits_commands() {
        let mut src = MockSource {
            commands: vec![Command::Move(Direction::Right), Command::CutVertical],
        };
        let (tx, rx) = mpsc::channel();
        src.run(tx).unwrap();
        let cmds: Vec<Command> = rx.try_iter().collect();
        assert_eq!(cmds, vec![Command::Move(Direction::Right), Command::CutVertical]);
    }
}
