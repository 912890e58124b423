//! Menu buttons and pointer hit-testing
//!
//! Button rectangles are derived from the field size so the presentation
//! layer and the simulation agree on where a click lands.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::GamePhase;
use crate::config::FieldConfig;

pub const BUTTON_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 60.0;
/// Vertical space between stacked buttons
pub const BUTTON_SPACING: f32 = 20.0;

/// What a button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonKind {
    Easy,
    Hard,
    Replay,
    Quit,
}

impl ButtonKind {
    pub fn label(&self) -> &'static str {
        match self {
            ButtonKind::Easy => "Easy",
            ButtonKind::Hard => "Hard",
            ButtonKind::Replay => "Replay",
            ButtonKind::Quit => "Quit",
        }
    }
}

/// A clickable region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub kind: ButtonKind,
    pub rect: Rect,
}

/// Button placement for the mode select and game over screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuLayout {
    mode_select: [Button; 2],
    game_over: [Button; 2],
}

impl MenuLayout {
    /// Two buttons stacked around the field's center on each screen
    pub fn for_field(config: &FieldConfig) -> Self {
        let x = (config.width - BUTTON_WIDTH) / 2.0;
        let upper_y = config.height / 2.0 - BUTTON_HEIGHT - BUTTON_SPACING / 2.0;
        let lower_y = config.height / 2.0 + BUTTON_SPACING / 2.0;
        let upper = Rect::new(x, upper_y, BUTTON_WIDTH, BUTTON_HEIGHT);
        let lower = Rect::new(x, lower_y, BUTTON_WIDTH, BUTTON_HEIGHT);

        Self {
            mode_select: [
                Button {
                    kind: ButtonKind::Easy,
                    rect: upper,
                },
                Button {
                    kind: ButtonKind::Hard,
                    rect: lower,
                },
            ],
            game_over: [
                Button {
                    kind: ButtonKind::Replay,
                    rect: upper,
                },
                Button {
                    kind: ButtonKind::Quit,
                    rect: lower,
                },
            ],
        }
    }

    /// Buttons shown in `phase` (empty when the phase has none)
    pub fn buttons(&self, phase: GamePhase) -> &[Button] {
        match phase {
            GamePhase::ModeSelect => &self.mode_select,
            GamePhase::GameOver => &self.game_over,
            _ => &[],
        }
    }

    /// Button under `point` in `phase`
    pub fn hit(&self, phase: GamePhase, point: Vec2) -> Option<ButtonKind> {
        self.buttons(phase)
            .iter()
            .find(|b| b.rect.contains(point))
            .map(|b| b.kind)
    }
}
