//! Hyprland-specific implementations.
//!
//! This module provides the concrete
//! [`WindowSystem`](crate::traits::WindowSystem) and
//! [`WorkArea`](crate::traits::WorkArea) backends, powered by Hyprland's
//! IPC socket.
//!
//! Nothing outside this module should reference Hyprland directly.

pub mod system;

pub use system::HyprlandSystem;
