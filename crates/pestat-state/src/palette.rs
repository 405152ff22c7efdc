//! Queue name -> color mapping.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Invalid queue palette: {0}")]
    Json(#[from] serde_json::Error),
}

/// Colors a queue can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Closed mapping from queue name to color. Queues not in the map render
/// uncolored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueuePalette {
    colors: HashMap<String, QueueColor>,
}

impl Default for QueuePalette {
    fn default() -> Self {
        let colors = [
            ("short", QueueColor::Yellow),
            ("day", QueueColor::Blue),
            ("week", QueueColor::Magenta),
            ("long", QueueColor::Magenta),
        ]
        .into_iter()
        .map(|(q, c)| (q.to_string(), c))
        .collect();
        Self { colors }
    }
}

impl QueuePalette {
    /// An empty palette: every queue renders uncolored.
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
        }
    }

    /// Parse a JSON object of `"queue": "color"` pairs.
    pub fn from_json(content: &str) -> Result<Self, PaletteError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn color_for(&self, queue: &str) -> Option<QueueColor> {
        self.colors.get(queue).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
