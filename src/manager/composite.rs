//! A [`WindowManager`] whose backend can be swapped at runtime.
//!
//! Used to flip between real windows and the sandbox (layout preview).
//! Switching replaces one `Arc` under a write lock: each call is forwarded
//! to exactly one backend, either the old or the new, never a mix.  No
//! state moves between backends; windows of one are invisible through the
//! other.

use crate::geometry::Rect;
use crate::traits::{WindowHandle, WindowManager, WmError};
use std::sync::{Arc, PoisonError, RwLock};

pub struct CompositeWindowManager {
    current: RwLock<Arc<dyn WindowManager>>,
}

impl CompositeWindowManager {
    pub fn new(initial: Arc<dyn WindowManager>) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// The backend calls are currently forwarded to.
    pub fn current(&self) -> Arc<dyn WindowManager> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make `next` the current backend, returning the previous one.
    pub fn switch_to(&self, next: Arc<dyn WindowManager>) -> Arc<dyn WindowManager> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, next)
    }

    /// Whether `backend` is the current backend (same allocation).
    pub fn is_current(&self, backend: &Arc<dyn WindowManager>) -> bool {
        let current = self.current();
        std::ptr::eq(
            Arc::as_ptr(&current) as *const (),
            Arc::as_ptr(backend) as *const (),
        )
    }
}

impl WindowManager for CompositeWindowManager {
    fn focused_window(&self) -> Result<Option<WindowHandle>, WmError> {
        self.current().focused_window()
    }

    fn set_focused_window(&self, handle: WindowHandle) -> Result<(), WmError> {
        self.current().set_focused_window(handle)
    }

    fn visible_windows(&self) -> Result<Vec<WindowHandle>, WmError> {
        self.current().visible_windows()
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WmError> {
        self.current().window_rect(handle)
    }

    fn position_window(&self, handle: WindowHandle, rect: Rect) -> Result<(), WmError> {
        self.current().position_window(handle, rect)
    }
}
