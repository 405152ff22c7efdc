//! Color themes.

use crossterm::style::{Color, Stylize, style};
use pestat_pbs::NodeState;
use pestat_state::{QueueColor, Severity};

pub struct Theme {
    pub enabled: bool,
    pub alert: Color,
    pub success: Color,
    pub info: Color,
}

impl Theme {
    pub fn ansi() -> Self {
        Self {
            enabled: true,
            alert: Color::Red,
            success: Color::Green,
            info: Color::Cyan,
        }
    }

    /// Same palette, but [`Theme::paint`] returns text untouched.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::ansi()
        }
    }

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ansi() } else { Self::plain() }
    }

    /// Style `text` with `color`. Pad before painting so escape codes
    /// don't count toward column widths.
    pub fn paint(&self, text: &str, color: Option<Color>) -> String {
        match color {
            Some(color) if self.enabled => style(text).with(color).to_string(),
            _ => text.to_string(),
        }
    }

    pub fn state_color(&self, state: NodeState) -> Option<Color> {
        match state {
            NodeState::Busy | NodeState::Excl => Some(self.alert),
            NodeState::Down | NodeState::Offline | NodeState::Unknown => Some(self.alert),
            NodeState::PoweredDown => Some(self.info),
            NodeState::Free => Some(self.success),
        }
    }

    /// Color of the job count column.
    pub fn job_count_color(&self, state: NodeState) -> Option<Color> {
        match state {
            NodeState::Busy | NodeState::Excl => Some(self.alert),
            NodeState::Free => Some(self.success),
            NodeState::Down | NodeState::Offline | NodeState::Unknown | NodeState::PoweredDown => {
                None
            }
        }
    }

    /// Color of a job entry: its queue when resolved, its severity when not.
    pub fn job_color(&self, severity: Severity, queue: Option<QueueColor>) -> Option<Color> {
        match severity {
            Severity::Ok => queue.map(queue_color),
            Severity::Info => Some(self.info),
            Severity::Error => Some(self.alert),
        }
    }
}

fn queue_color(color: QueueColor) -> Color {
    match color {
        QueueColor::Red => Color::Red,
        QueueColor::Green => Color::Green,
        QueueColor::Yellow => Color::Yellow,
        QueueColor::Blue => Color::Blue,
        QueueColor::Magenta => Color::Magenta,
        QueueColor::Cyan => Color::Cyan,
        QueueColor::White => Color::White,
    }
}
