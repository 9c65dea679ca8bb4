//! [`WindowSystem`] and [`WorkArea`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any shell command invocation or third-party crate for socket
//! discovery.
//!
//! # Decoration model
//!
//! Hyprland reports a client's position and size without its border.  The
//! frame handed to the native adapter is that rect grown by the configured
//! `general:border_size` on the left, right and bottom (twice on the
//! bottom), which the adapter's `(dx / 2, 0, dx / 2, dy)` compensation
//! removes again exactly.  The modelled border is limited to half of the
//! smaller [`BorderPolicy`] cap so that the capped insets still cover it.

use crate::geometry::{Rect, Vector};
use crate::manager::native::BorderPolicy;
use crate::traits::{WindowHandle, WindowSystem, WmError, WorkArea};
use log::{debug, warn};
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed window system.
///
/// All communication happens over Hyprland's IPC socket.  No connection
/// is opened eagerly; each method call opens a short-lived IPC request.
#[derive(Debug, Default, Clone, Copy)]
pub struct HyprlandSystem {
    policy: BorderPolicy,
}

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandError(String);

impl From<HyprlandError> for WmError {
    fn from(e: HyprlandError) -> Self {
        WmError::Backend(e.to_string())
    }
}

impl HyprlandSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model borders so that a native adapter using `policy` removes them.
    pub fn with_policy(policy: BorderPolicy) -> Self {
        Self { policy }
    }
}

//  Direct Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
fn socket_path() -> Result<PathBuf, HyprlandError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(runtime_dir).join("hypr").join(his).join(".socket.sock"))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandError(format!("utf-8: {}", e)))
}

/// Send a JSON data query (`j/<command>`) and parse the reply.
fn ipc_json<T: for<'de> Deserialize<'de>>(data_command: &str) -> Result<T, HyprlandError> {
    let json = ipc_request(&format!("j/{}", data_command))?;
    serde_json::from_str(&json).map_err(|e| HyprlandError(format!("parse {}: {}", data_command, e)))
}

/// Send a dispatch command and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandError> {
    debug!("hyprctl dispatch {}", args);
    let response = ipc_request(&format!("/dispatch {}", args))?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandError(format!("dispatch {}: {}", args, response.trim())))
    }
}

//  Minimal serde structs for the JSON we care about

#[derive(Debug, Clone, Copy, Deserialize)]
struct WorkspaceRef {
    id: i64,
}

/// Subset of an object returned by `j/clients` and `j/activewindow`.
#[derive(Debug, Clone, Deserialize)]
struct ClientJson {
    address: String,
    #[serde(default = "yes")]
    mapped: bool,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    floating: bool,
    at: [i32; 2],
    size: [i32; 2],
    workspace: WorkspaceRef,
}

/// Subset of an object returned by `j/monitors`.
#[derive(Debug, Clone, Deserialize)]
struct MonitorJson {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    #[serde(default = "unit_scale")]
    scale: f64,
    #[serde(default)]
    transform: u8,
    /// Space taken by bars and docks: left, top, right, bottom.
    #[serde(default)]
    reserved: [i32; 4],
    #[serde(default)]
    focused: bool,
    #[serde(rename = "activeWorkspace")]
    active_workspace: WorkspaceRef,
    #[serde(rename = "specialWorkspace")]
    special_workspace: Option<WorkspaceRef>,
}

/// Reply of `j/getoption` for an integer option.
#[derive(Debug, Deserialize)]
struct IntOptionJson {
    int: i64,
}

fn yes() -> bool {
    true
}

fn unit_scale() -> f64 {
    1.0
}

/// Parse a Hyprland window address (`"0x55d1c2a3f0e0"`).
pub fn parse_address(address: &str) -> Result<WindowHandle, HyprlandError> {
    let digits = address.trim().trim_start_matches("0x");
    u64::from_str_radix(digits, 16)
        .map(WindowHandle)
        .map_err(|e| HyprlandError(format!("bad window address {:?}: {}", address, e)))
}

/// Dispatcher selector for `handle`.
fn selector(handle: WindowHandle) -> String {
    format!("address:{}", handle)
}

impl ClientJson {
    fn rect(&self) -> Rect {
        Rect::from_origin_size(
            self.at[0] as f64,
            self.at[1] as f64,
            self.size[0] as f64,
            self.size[1] as f64,
        )
    }
}

impl MonitorJson {
    fn shows(&self, workspace: i64) -> bool {
        self.active_workspace.id == workspace
            || self
                .special_workspace
                .is_some_and(|s| s.id != 0 && s.id == workspace)
    }

    /// Logical area minus reserved edges.
    fn work_area(&self) -> Rect {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        let (mut w, mut h) = (self.width as f64 / scale, self.height as f64 / scale);
        // Odd transforms rotate by 90 or 270 degrees.
        if self.transform % 2 == 1 {
            std::mem::swap(&mut w, &mut h);
        }
        let [left, top, right, bottom] = self.reserved.map(f64::from);
        let (x, y) = (self.x as f64, self.y as f64);
        Rect::new(x + left, y + top, x + w - right, y + h - bottom)
    }
}

/// Clients that are mapped, not hidden and on a workspace some monitor
/// currently shows.
fn visible_clients(clients: Vec<ClientJson>, monitors: &[MonitorJson]) -> Vec<ClientJson> {
    clients
        .into_iter()
        .filter(|c| c.mapped && !c.hidden)
        .filter(|c| monitors.iter().any(|m| m.shows(c.workspace.id)))
        .collect()
}

/// Work area of the focused monitor, or of the first one if none reports
/// focus.
fn focused_work_area(monitors: &[MonitorJson]) -> Option<Rect> {
    monitors
        .iter()
        .find(|m| m.focused)
        .or_else(|| monitors.first())
        .map(MonitorJson::work_area)
}

/// Grow a client rect by `border` on the left, right and bottom sides.
pub fn decorate(client: Rect, border: f64) -> Rect {
    Rect::new(
        client.left - border,
        client.top,
        client.right + border,
        client.bottom + 2.0 * border,
    )
}

/// Border width the decoration model uses for a compositor border of
/// `border_size`: never more than half of either cap.
pub fn modelled_border(border_size: f64, policy: BorderPolicy) -> f64 {
    let cap = policy.max_horizontal.min(policy.max_vertical).max(0.0) / 2.0;
    border_size.max(0.0).min(cap)
}

/// Dispatches that place a client at `target`, and the ones that undo the
/// floating step if placement fails part way.
fn placement(target: Rect, handle: WindowHandle, floating: bool) -> (Vec<String>, Vec<String>) {
    let target_selector = selector(handle);
    let mut steps = Vec::new();
    let mut rollback = Vec::new();
    // Exact placement only applies to floating windows.
    if !floating {
        steps.push(format!("setfloating {}", target_selector));
        rollback.push(format!("settiled {}", target_selector));
    }
    steps.push(format!(
        "resizewindowpixel exact {} {},{}",
        target.width().round() as i64,
        target.height().round() as i64,
        target_selector
    ));
    steps.push(format!(
        "movewindowpixel exact {} {},{}",
        target.left.round() as i64,
        target.top.round() as i64,
        target_selector
    ));
    (steps, rollback)
}

/// Inverse of [`decorate`].
pub fn undecorate(frame: Rect, border: f64) -> Rect {
    Rect::new(
        frame.left + border,
        frame.top,
        frame.right - border,
        frame.bottom - 2.0 * border,
    )
}

impl HyprlandSystem {
    fn clients(&self) -> Result<Vec<ClientJson>, HyprlandError> {
        ipc_json("clients")
    }

    fn monitors(&self) -> Result<Vec<MonitorJson>, HyprlandError> {
        ipc_json("monitors")
    }

    fn border_size(&self) -> Result<f64, HyprlandError> {
        let option: IntOptionJson = ipc_json("getoption general:border_size")?;
        Ok(modelled_border(option.int as f64, self.policy))
    }

    fn find_client(&self, handle: WindowHandle) -> Result<ClientJson, WmError> {
        for client in self.clients()? {
            if parse_address(&client.address)? == handle {
                return Ok(client);
            }
        }
        Err(WmError::WindowNotFound(handle))
    }
}

impl WindowSystem for HyprlandSystem {
    fn foreground_window(&self) -> Result<Option<WindowHandle>, WmError> {
        let json = ipc_request("j/activewindow")?;
        // Hyprland returns an empty object `{}` when no window is focused.
        if json.trim() == "{}" {
            return Ok(None);
        }
        let client: ClientJson = serde_json::from_str(&json)
            .map_err(|e| HyprlandError(format!("parse activewindow: {}", e)))?;
        Ok(Some(parse_address(&client.address)?))
    }

    fn set_foreground_window(&self, handle: WindowHandle) -> Result<(), WmError> {
        self.find_client(handle)?;
        ipc_dispatch(&format!("focuswindow {}", selector(handle)))?;
        Ok(())
    }

    fn visible_windows(&self) -> Result<Vec<WindowHandle>, WmError> {
        let monitors = self.monitors()?;
        let handles = visible_clients(self.clients()?, &monitors)
            .iter()
            .map(|c| parse_address(&c.address))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(handles)
    }

    fn frame_rect(&self, handle: WindowHandle) -> Result<Rect, WmError> {
        let client = self.find_client(handle)?;
        Ok(decorate(client.rect(), self.border_size()?))
    }

    fn client_size(&self, handle: WindowHandle) -> Result<Vector, WmError> {
        Ok(self.find_client(handle)?.rect().size())
    }

    fn set_frame(&self, handle: WindowHandle, frame: Rect) -> Result<(), WmError> {
        let client = self.find_client(handle)?;
        let target = undecorate(frame, self.border_size()?);
        let (steps, rollback) = placement(target, handle, client.floating);
        let placed = steps.iter().try_for_each(|step| ipc_dispatch(step));
        if let Err(e) = placed {
            for step in &rollback {
                if let Err(undo) = ipc_dispatch(step) {
                    warn!("{}: could not undo after failed placement: {}", handle, undo);
                }
            }
            return Err(e.into());
        }
        Ok(())
    }
}

impl WorkArea for HyprlandSystem {
    fn work_area(&self) -> Result<Rect, WmError> {
        let monitors = self.monitors()?;
        focused_work_area(&monitors).ok_or_else(|| WmError::Backend("no monitors".into()))
    }
}
