use serde::{Deserialize, Serialize};

use crate::game::actor::GameSnapshot;
use crate::player::Player;

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageIn {
    StartGame,
    PressButton,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageOut {
    Error {
        r#type: String,
        title: String,
        detail: String,
    },
    GameState(GameStateDto),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameStateDto {
    pub state: String,
    pub message: String,
    pub rounds_played: u64,
    pub players: Vec<PlayerDto>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub nickname: String,
    pub score: i32,
    pub score_text: String,
    pub button_color: String,
    pub is_connected: bool,
}

impl From<GameSnapshot> for GameStateDto {
    fn from(snapshot: GameSnapshot) -> Self {
        GameStateDto {
            state: snapshot.state.to_string(),
            message: snapshot.message.to_string(),
            rounds_played: snapshot.rounds_played,
            players: snapshot.players.into_iter().map(PlayerDto::from).collect(),
        }
    }
}

impl From<Player> for PlayerDto {
    fn from(player: Player) -> Self {
        PlayerDto {
            score_text: player.score_text(),
            button_color: player.button_color.to_hex(),
            nickname: player.nickname,
            score: player.score,
            is_connected: player.is_connected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GameStateDto, PlayerDto, WsMessageIn, WsMessageOut};
    use crate::game::actor::GameSnapshot;
    use crate::game::game_fsm::GameFsmState;
    use crate::game::status_message::StatusMessage;
    use crate::player::button_color::ButtonColor;
    use crate::player::Player;

    #[test]
    fn incoming_messages_are_tagged_by_kind() {
        let start: WsMessageIn = serde_json::from_str(r#"{"kind":"startGame"}"#).unwrap();
        let press: WsMessageIn = serde_json::from_str(r#"{"kind":"pressButton"}"#).unwrap();

        assert_eq!(start, WsMessageIn::StartGame);
        assert_eq!(press, WsMessageIn::PressButton);
        assert!(serde_json::from_str::<WsMessageIn>(r#"{"kind":"jump"}"#).is_err());
    }

    #[test]
    fn snapshot_is_rendered_with_display_texts() {
        let mut player = Player::new(
            "p1",
            ButtonColor {
                hue: 0.0,
                saturation: 1.0,
                value: 1.0,
            },
        );
        player.score = 3;
        let snapshot = GameSnapshot {
            state: GameFsmState::DisplayDelay,
            message: StatusMessage::GreatJob,
            players: vec![player],
            rounds_played: 4,
        };

        let dto: GameStateDto = snapshot.into();

        assert_eq!(dto.state, "DisplayDelay");
        assert_eq!(dto.message, "Great job!");
        assert_eq!(
            dto.players,
            vec![PlayerDto {
                nickname: "p1".to_string(),
                score: 3,
                score_text: "Score: 3".to_string(),
                button_color: "#ff0000".to_string(),
                is_connected: false,
            }]
        );
    }

    #[test]
    fn outgoing_game_state_is_flattened_under_its_kind() {
        let message = WsMessageOut::GameState(GameStateDto {
            state: "Idle".to_string(),
            message: "Start game!".to_string(),
            rounds_played: 0,
            players: vec![],
        });

        let json: serde_json::Value = serde_json::to_value(&message).unwrap();

        assert_eq!(json["kind"], "gameState");
        assert_eq!(json["message"], "Start game!");
        assert_eq!(json["roundsPlayed"], 0);
    }
}
