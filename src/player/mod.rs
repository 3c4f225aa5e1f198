pub mod actor;
pub mod button_color;
pub mod registry;

use crate::game::status_message::SCORE_TEXT_PREFIX;

use self::button_color::ButtonColor;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub nickname: String,
    pub score: i32,
    pub button_color: ButtonColor,
    pub is_connected: bool,
}

impl Player {
    pub fn new(nickname: &str, button_color: ButtonColor) -> Self {
        Player {
            nickname: nickname.to_string(),
            score: 0,
            button_color,
            is_connected: false,
        }
    }

    pub fn score_text(&self) -> String {
        format!("{SCORE_TEXT_PREFIX}{}", self.score)
    }
}
