//! Move input focus to the neighbouring window.

use super::focused_rect;
use crate::command::Direction;
use crate::navigation::closest_in_direction;
use crate::traits::{WindowManager, WmError};
use log::{debug, info};

pub struct FocusStrategy<'a> {
    wm: &'a dyn WindowManager,
}

impl<'a> FocusStrategy<'a> {
    pub fn new(wm: &'a dyn WindowManager) -> Self {
        Self { wm }
    }

    pub fn left(&self) -> Result<bool, WmError> {
        self.apply(Direction::Left)
    }

    pub fn right(&self) -> Result<bool, WmError> {
        self.apply(Direction::Right)
    }

    pub fn up(&self) -> Result<bool, WmError> {
        self.apply(Direction::Up)
    }

    pub fn down(&self) -> Result<bool, WmError> {
        self.apply(Direction::Down)
    }

    /// Focus the closest visible window in `direction`.
    ///
    /// A candidate that closes between enumeration and lookup is skipped.
    pub fn apply(&self, direction: Direction) -> Result<bool, WmError> {
        let Some((window, rect)) = focused_rect(self.wm)? else {
            debug!("focus {}: no focused window", direction);
            return Ok(false);
        };

        let mut candidates = Vec::new();
        for other in self.wm.visible_windows()? {
            if other == window {
                continue;
            }
            match self.wm.window_rect(other) {
                Ok(r) => candidates.push((other, r)),
                Err(WmError::WindowNotFound(_)) => {
                    debug!("focus {}: {} vanished, skipping", direction, other);
                }
                Err(e) => return Err(e),
            }
        }

        match closest_in_direction(rect, direction, candidates) {
            Some((target, _)) => {
                info!("focus {}: {} -> {}", direction, window, target);
                self.wm.set_focused_window(target)?;
                Ok(true)
            }
            None => {
                debug!("focus {}: nothing beyond {}", direction, window);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::manager::sandbox::SandboxWindowManager;
    use crate::traits::WindowHandle;

    /// Three quarters of the screen, bottom left empty.  The last one
    /// opened (bottom right) is focused.
    fn three_windows() -> (SandboxWindowManager, [WindowHandle; 3]) {
        let wm = SandboxWindowManager::new();
        let top_left = wm.add_window(Rect::new(0.0, 0.0, 50.0, 50.0));
        let top_right = wm.add_window(Rect::new(50.0, 0.0, 100.0, 50.0));
        let bottom_right = wm.add_window(Rect::new(50.0, 50.0, 100.0, 100.0));
        (wm, [top_left, top_right, bottom_right])
    }

    #[test]
    fn focuses_neighbours() {
        let (wm, [top_left, top_right, bottom_right]) = three_windows();
        let focus = FocusStrategy::new(&wm);

        assert!(focus.up().unwrap());
        assert_eq!(wm.focused_window().unwrap(), Some(top_right));
        assert!(focus.left().unwrap());
        assert_eq!(wm.focused_window().unwrap(), Some(top_left));
        assert!(focus.right().unwrap());
        assert_eq!(wm.focused_window().unwrap(), Some(top_right));
        assert!(focus.down().unwrap());
        assert_eq!(wm.focused_window().unwrap(), Some(bottom_right));
    }

    #[test]
    fn nothing_in_direction_keeps_focus() {
        let (wm, [_, _, bottom_right]) = three_windows();
        let focus = FocusStrategy::new(&wm);
        assert!(!focus.right().unwrap());
        assert!(!focus.down().unwrap());
        assert_eq!(wm.focused_window().unwrap(), Some(bottom_right));
    }

    #[test]
    fn lone_window_is_noop() {
        let wm = SandboxWindowManager::new();
        wm.add_window(Rect::new(0.0, 0.0, 100.0, 100.0));
        for dir in Direction::ALL {
            assert!(!FocusStrategy::new(&wm).apply(dir).unwrap());
        }
    }

    /// Wraps a sandbox, optionally reporting a closed window as focused
    /// and listing a closed window among the visible ones.
    struct Ghost {
        inner: SandboxWindowManager,
        stale_focus: bool,
    }

    impl WindowManager for Ghost {
        fn focused_window(&self) -> Result<Option<WindowHandle>, WmError> {
            if self.stale_focus {
                return Ok(Some(WindowHandle(404)));
            }
            self.inner.focused_window()
        }
        fn set_focused_window(&self, h: WindowHandle) -> Result<(), WmError> {
            self.inner.set_focused_window(h)
        }
        fn visible_windows(&self) -> Result<Vec<WindowHandle>, WmError> {
            let mut windows = vec![WindowHandle(999)];
            windows.extend(self.inner.visible_windows()?);
            Ok(windows)
        }
        fn window_rect(&self, h: WindowHandle) -> Result<Rect, WmError> {
            self.inner.window_rect(h)
        }
        fn position_window(&self, h: WindowHandle, r: Rect) -> Result<(), WmError> {
            self.inner.position_window(h, r)
        }
    }

    #[test]
    fn vanished_candidate_is_skipped() {
        let (inner, [top_left, _, _]) = three_windows();
        let wm = Ghost {
            inner,
            stale_focus: false,
        };
        assert!(FocusStrategy::new(&wm).left().unwrap());
        assert_eq!(wm.focused_window().unwrap(), Some(top_left));
    }

    #[test]
    fn vanished_focused_window_aborts() {
        let (inner, [_, _, bottom_right]) = three_windows();
        let wm = Ghost {
            inner,
            stale_focus: true,
        };
        let err = FocusStrategy::new(&wm).up().unwrap_err();
        assert_eq!(err, WmError::WindowNotFound(WindowHandle(404)));
        assert_eq!(wm.inner.focused_window().unwrap(), Some(bottom_right));
    }
}
