//! [`WindowManager`](crate::traits::WindowManager) backends.
//!
//! The backends compose rather than inherit:
//!
//! * [`native::NativeWindowManager`] adapts a raw
//!   [`WindowSystem`](crate::traits::WindowSystem), hiding window
//!   decoration so rects describe the visible content area.
//! * [`convert::ConvertWindowManager`] wraps any backend and speaks percent
//!   of the monitor work area instead of pixels.
//! * [`sandbox::SandboxWindowManager`] keeps synthetic windows in memory,
//!   for layout previews and tests.
//! * [`composite::CompositeWindowManager`] forwards to whichever backend is
//!   current and can be switched at runtime.

pub mod composite;
pub mod convert;
pub mod native;
pub mod sandbox;
