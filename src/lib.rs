//! **wintile**: directional window tiling over an adjustable grid.
//!
//! The screen is divided into tiles by movable row and column handles.
//! Directional commands (left, right, up, down) snap the focused window
//! onto a neighbouring tile, grow one of its edges to the next tile
//! boundary, move focus to the neighbouring window, or move the tile
//! selection while editing the layout.
//!
//! # Architecture
//!
//! * [`geometry`], [`grid`] and [`navigation`] are pure: rect math, tiles
//!   derived from handles, and the closest-candidate-in-direction search
//!   shared by every directional command.
//! * [`traits::WindowManager`] abstracts window access.  The adapters in
//!   [`manager`] stack on top of each other: decoration compensation over
//!   a raw [`traits::WindowSystem`], percent conversion, an in-memory
//!   sandbox, and a composite that switches between backends at runtime.
//! * [`strategy`] holds the directional operations; [`tiler::Tiler`]
//!   dispatches [`command::Command`]s to them.
//! * [`traits::CommandSource`] abstracts the transport that delivers
//!   commands so the main loop is not coupled to any IPC mechanism.
//!
//! Concrete implementations live in [`hyprland`] (Hyprland IPC) and
//! [`ipc`] (Unix-socket command listener).

pub mod command;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod hyprland;
pub mod ipc;
pub mod layout;
pub mod manager;
pub mod navigation;
pub mod strategy;
pub mod tiler;
pub mod traits;
