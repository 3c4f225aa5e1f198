use std::fmt::{self, Display};

pub const SCORE_TEXT_PREFIX: &str = "Score: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    StartGame,
    Wait,
    PressButton,
    GreatJob,
    WrongTime,
}

impl StatusMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusMessage::StartGame => "Start game!",
            StatusMessage::Wait => "Wait!",
            StatusMessage::PressButton => "Press button!",
            StatusMessage::GreatJob => "Great job!",
            StatusMessage::WrongTime => "Wrong time!",
        }
    }
}

impl Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
