//! Directional operations triggered by the user.
//!
//! Each strategy is a short-lived, stateless view over its collaborators (a
//! [`WindowManager`] and the tile rects of a [`Grid`](crate::grid::Grid)),
//! built for one command and dropped afterwards.  An invocation reads the
//! current state, computes a target and writes at most once.
//!
//! All strategies work in percent space: tile rects are scaled by
//! [`PERCENT`](crate::manager::convert::PERCENT) and the window manager is
//! expected to speak percent too.
//!
//! Return values follow one rule: `Ok(true)` when something changed,
//! `Ok(false)` when there was nothing to do (no focused window, no candidate
//! in that direction), `Err` when the window manager failed, in which case
//! nothing was written.

pub mod extend;
pub mod focus;
pub mod movement;
pub mod select;

pub use extend::ExtendStrategy;
pub use focus::FocusStrategy;
pub use movement::MoveStrategy;
pub use select::SelectStrategy;

use crate::geometry::Rect;
use crate::traits::{WindowHandle, WindowManager, WmError};

/// The focused window and its rect, or `None` when nothing is focused.
pub(crate) fn focused_rect(
    wm: &(impl WindowManager + ?Sized),
) -> Result<Option<(WindowHandle, Rect)>, WmError> {
    match wm.focused_window()? {
        Some(handle) => Ok(Some((handle, wm.window_rect(handle)?))),
        None => Ok(None),
    }
}
