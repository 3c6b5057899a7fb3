//! HUD and overlay text
//!
//! The browser shows these strings in DOM elements over the canvas.

use crate::sim::{GamePhase, GameState};

pub const TITLE: &str = "NEON DEFENDER";
pub const START_PROMPT: &str = "Click or Press ENTER to Start";
pub const GAME_OVER_TITLE: &str = "GAME OVER";
pub const RESTART_PROMPT: &str = "Click or Press ENTER to Restart";
pub const CONTROLS: &str = "Move: WASD / Arrows | Aim: Mouse | Shoot: Space / Click";

/// Text for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    pub phase: GamePhase,
    /// Top-left lines while playing
    pub lines: Vec<String>,
    /// Centered banner (menu / game over)
    pub title: Option<&'static str>,
    pub subtitle: Option<String>,
    pub prompt: Option<&'static str>,
}

impl HudText {
    pub fn from_state(state: &GameState) -> Self {
        match state.phase {
            GamePhase::Menu => Self {
                phase: state.phase,
                lines: Vec::new(),
                title: Some(TITLE),
                subtitle: None,
                prompt: Some(START_PROMPT),
            },
            GamePhase::Playing => Self {
                phase: state.phase,
                lines: vec![
                    format!("Score: {}", state.score),
                    format!("Level: {}", state.level),
                    CONTROLS.to_string(),
                ],
                title: None,
                subtitle: None,
                prompt: None,
            },
            GamePhase::GameOver => Self {
                phase: state.phase,
                lines: Vec::new(),
                title: Some(GAME_OVER_TITLE),
                subtitle: Some(format!("Final Score: {}", state.score)),
                prompt: Some(RESTART_PROMPT),
            },
        }
    }
}
