use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// What lands in the frame buffer before presentation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ViewMode {
    /// Mesh pass output.
    Shaded,
    /// Grayscale preview of the mesh pass depth.
    Depth,
}

impl ViewMode {
    pub fn initial(start_in_depth_view: bool) -> Self {
        if start_in_depth_view { ViewMode::Depth } else { ViewMode::Shaded }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Shaded => ViewMode::Depth,
            ViewMode::Depth => ViewMode::Shaded,
        }
    }
}

/// Keyboard commands the studio reacts to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    ToggleDepthView,
    Quit,
}

impl Command {
    /// Fresh presses only; releases and auto-repeat are ignored.
    pub fn from_key(event: &KeyEvent) -> Option<Self> {
        if event.state != ElementState::Pressed || event.repeat {
            return None;
        }
        Self::from_code(event.physical_key)
    }

    fn from_code(key: PhysicalKey) -> Option<Self> {
        match key {
            PhysicalKey::Code(KeyCode::KeyD) => Some(Command::ToggleDepthView),
            PhysicalKey::Code(KeyCode::Escape) => Some(Command::Quit),
            _ => None,
        }
    }
}
