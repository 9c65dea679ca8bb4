//! In-memory virtual windows.
//!
//! The sandbox satisfies the same contract as the native backends but never
//! touches the operating system, so a layout can be previewed (or tested)
//! without moving real windows.  Rects are stored as given; callers pick the
//! coordinate space, usually percent.

use crate::geometry::Rect;
use crate::traits::{WindowHandle, WindowManager, WmError};
use log::debug;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct SandboxState {
    /// Windows in creation order, which is also the enumeration order.
    windows: Vec<(WindowHandle, Rect)>,
    focused: Option<WindowHandle>,
    next_id: u64,
}

impl SandboxState {
    fn find(&self, handle: WindowHandle) -> Result<usize, WmError> {
        self.windows
            .iter()
            .position(|(h, _)| *h == handle)
            .ok_or(WmError::WindowNotFound(handle))
    }
}

/// A [`WindowManager`] over synthetic windows.
#[derive(Debug)]
pub struct SandboxWindowManager {
    state: Mutex<SandboxState>,
}

impl Default for SandboxWindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxWindowManager {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SandboxState {
                windows: Vec::new(),
                focused: None,
                next_id: 1,
            }),
        }
    }

    /// A sandbox pre-populated with one window per rect.  The last one is
    /// focused.
    pub fn from_rects(rects: impl IntoIterator<Item = Rect>) -> Self {
        let sandbox = Self::new();
        for rect in rects {
            sandbox.add_window(rect);
        }
        sandbox
    }

    fn lock(&self) -> MutexGuard<'_, SandboxState> {
        // The state is plain data and stays consistent even if a holder
        // panicked.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a synthetic window at `rect`.  Like a freshly opened real
    /// window, it takes focus.
    pub fn add_window(&self, rect: Rect) -> WindowHandle {
        let mut state = self.lock();
        let handle = WindowHandle(state.next_id);
        state.next_id += 1;
        state.windows.push((handle, rect));
        state.focused = Some(handle);
        debug!("sandbox: opened {} at {:?}", handle, rect);
        handle
    }

    /// Close `handle`, returning its last rect.  Closing the focused window
    /// leaves nothing focused.
    pub fn remove_window(&self, handle: WindowHandle) -> Result<Rect, WmError> {
        let mut state = self.lock();
        let index = state.find(handle)?;
        let (_, rect) = state.windows.remove(index);
        if state.focused == Some(handle) {
            state.focused = None;
        }
        debug!("sandbox: closed {}", handle);
        Ok(rect)
    }

    /// Close every window.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.windows.clear();
        state.focused = None;
    }

    /// Snapshot of all windows and their rects, in creation order.
    pub fn windows(&self) -> Vec<(WindowHandle, Rect)> {
        self.lock().windows.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().windows.is_empty()
    }
}

impl WindowManager for SandboxWindowManager {
    fn focused_window(&self) -> Result<Option<WindowHandle>, WmError> {
        Ok(self.lock().focused)
    }

    fn set_focused_window(&self, handle: WindowHandle) -> Result<(), WmError> {
        let mut state = self.lock();
        state.find(handle)?;
        state.focused = Some(handle);
        Ok(())
    }

    fn visible_windows(&self) -> Result<Vec<WindowHandle>, WmError> {
        Ok(self.lock().windows.iter().map(|(h, _)| *h).collect())
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WmError> {
        let state = self.lock();
        let index = state.find(handle)?;
        Ok(state.windows[index].1)
    }

    fn position_window(&self, handle: WindowHandle, rect: Rect) -> Result<(), WmError> {
        let mut state = self.lock();
        let index = state.find(handle)?;
        state.windows[index].1 = rect;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sandbox_is_empty() {
        let s = SandboxWindowManager::new();
        assert!(s.is_empty());
        assert_eq!(s.focused_window().unwrap(), None);
        assert!(s.visible_windows().unwrap().is_empty());
    }

    #[test]
    fn added_window_is_visible_and_focused() {
        let s = SandboxWindowManager::new();
        let a = s.add_window(Rect::new(0.0, 0.0, 50.0, 50.0));
        let b = s.add_window(Rect::new(50.0, 0.0, 100.0, 50.0));
        assert_ne!(a, b);
        assert_eq!(s.visible_windows().unwrap(), vec![a, b]);
        assert_eq!(s.focused_window().unwrap(), Some(b));
        assert_eq!(s.window_rect(a).unwrap(), Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn position_and_focus_update_state() {
        let s = SandboxWindowManager::from_rects([Rect::default(), Rect::default()]);
        let handles = s.visible_windows().unwrap();
        s.position_window(handles[0], Rect::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        s.set_focused_window(handles[0]).unwrap();
        assert_eq!(s.focused_window().unwrap(), Some(handles[0]));
        assert_eq!(s.windows()[0].1, Rect::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn removed_window_is_not_found() {
        let s = SandboxWindowManager::new();
        let h = s.add_window(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(s.remove_window(h).unwrap(), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(s.focused_window().unwrap(), None);
        assert_eq!(s.window_rect(h), Err(WmError::WindowNotFound(h)));
        assert_eq!(s.position_window(h, Rect::default()), Err(WmError::WindowNotFound(h)));
        assert_eq!(s.set_focused_window(h), Err(WmError::WindowNotFound(h)));
        assert_eq!(s.remove_window(h), Err(WmError::WindowNotFound(h)));
    }

    #[test]
    fn handles_are_not_reused() {
        let s = SandboxWindowManager::new();
        let a = s.add_window(Rect::default());
        s.remove_window(a).unwrap();
        let b = s.add_window(Rect::default());
        assert_ne!(a, b);
    }

    #[test]
    fn clear_removes_everything() {
        let s = SandboxWindowManager::from_rects([Rect::default(); 3]);
        assert_eq!(s.len(), 3);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.focused_window().unwrap(), None);
    }
}
