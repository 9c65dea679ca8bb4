//! Commands and directions shared by every component.
//!
//! [`Command`] describes every action the [`Tiler`](crate::tiler::Tiler)
//! can perform.  Commands arrive from a
//! [`CommandSource`](crate::traits::CommandSource) as JSON, so the wire
//! format is the serde encoding of these types:
//!
//! ```json
//! {"Move":"Right"}
//! {"Extend":"up"}
//! {"MoveTo":"browser"}
//! {"RemoveHandle":{"axis":"Column","index":0}}
//! {"NameTile":{"name":"browser","tile":{"row":0,"col":1}}}
//! "CutVertical"
//! ```

use crate::geometry::Vector;
use crate::grid::{Axis, TileId};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four look directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit vector for this direction.  The y axis grows downwards.
    pub fn vector(self) -> Vector {
        match self {
            Direction::Left => Vector::new(-1.0, 0.0),
            Direction::Right => Vector::new(1.0, 0.0),
            Direction::Up => Vector::new(0.0, -1.0),
            Direction::Down => Vector::new(0.0, 1.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Error for a string that names no direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {0:?}")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

/// Every action the tiler can perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Move the focused window onto the closest tile in the direction.
    Move(Direction),

    /// Move one edge of the focused window to the nearest tile boundary
    /// beyond it.
    Extend(Direction),

    /// Move the tile selection used while editing a layout.
    Select(Direction),

    /// Focus the closest visible window in the direction.
    Focus(Direction),

    /// Move the focused window onto the tile with this name.
    MoveTo(String),

    /// Split a column in two (adds a column handle).
    CutVertical,

    /// Split a row in two (adds a row handle).
    CutHorizontal,

    /// Add a handle at a fractional position, splitting the row or column
    /// that contains it.
    InsertHandle { axis: Axis, position: f64 },

    /// Remove a handle, merging the two rows or columns it separated.
    RemoveHandle { axis: Axis, index: usize },

    /// Move a handle to a new fractional position between its neighbours.
    MoveHandle {
        axis: Axis,
        index: usize,
        position: f64,
    },

    /// Name a tile so `MoveTo` can target it.  Without `tile` the selected
    /// tile is named.
    NameTile {
        name: String,
        #[serde(default)]
        tile: Option<TileId>,
    },

    /// Route window operations to the virtual sandbox backend.
    EnterSandbox,

    /// Route window operations back to the native backend.
    LeaveSandbox,

    /// Run the command bound to this hotkey name in the active layout.
    Trigger(String),
}
