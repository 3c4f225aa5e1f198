use std::time::Duration;

use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

type Stream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECEIVE_TIMEOUT: Duration = Duration::from_secs(15);

pub struct TestPlayer {
    pub nickname: String,
    pub tx: SplitSink<Stream, Message>,
    pub rx: SplitStream<Stream>,
}

impl TestPlayer {
    pub fn new(nickname: &str, websocket: Stream) -> Self {
        let (tx, rx) = websocket.split();
        TestPlayer {
            nickname: nickname.to_string(),
            tx,
            rx,
        }
    }

    pub async fn receive_text(&mut self) -> Result<String, String> {
        match timeout(RECEIVE_TIMEOUT, self.rx.next()).await {
            Ok(Some(Ok(message))) => message
                .into_text()
                .map_err(|error| format!("Message was not a text. Error: '{error}'.")),
            Ok(Some(Err(error))) => Err(format!("Websocket returned an error {error}")),
            Ok(None) => Err("Websocket closed before expected.".to_string()),
            Err(_) => Err("Timed out waiting for a message.".to_string()),
        }
    }

    pub async fn receive(&mut self) -> Result<WsMessageOut, String> {
        let text = self.receive_text().await?;
        serde_json::from_str(&text)
            .map_err(|error| format!("Could not parse the message. Error: '{error}'."))
    }

    pub async fn receive_game_state(&mut self) -> Result<GameState, String> {
        match self.receive().await? {
            WsMessageOut::GameState(state) => Ok(state),
            WsMessageOut::Error { r#type, title, detail } => {
                assert!(!title.is_empty());
                assert!(!detail.is_empty());
                Err(r#type)
            }
        }
    }

    /// Skips game states until one shows `message`.
    pub async fn receive_game_state_with_message(
        &mut self,
        message: &str,
    ) -> Result<GameState, String> {
        loop {
            let state = self.receive_game_state().await?;
            if state.message == message {
                return Ok(state);
            }
        }
    }

    pub async fn receive_error(&mut self) -> String {
        loop {
            match self.receive().await {
                Ok(WsMessageOut::Error { r#type, .. }) => return r#type,
                Ok(WsMessageOut::GameState(_)) => continue,
                Err(error) => panic!("Expected an error message. Error: '{error}'."),
            }
        }
    }

    pub async fn start_game(&mut self) {
        self.send_text_message(WsMessageIn::StartGame).await;
    }

    pub async fn press_button(&mut self) {
        self.send_text_message(WsMessageIn::PressButton).await;
    }

    pub async fn send_message(&mut self, message: Message) {
        self.tx.send(message).await.expect("Could not send message");
    }

    async fn send_text_message(&mut self, message: WsMessageIn) {
        self.send_message(Message::Text(
            serde_json::to_string(&message).expect("Could not serialize message"),
        ))
        .await;
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub state: String,
    pub message: String,
    pub rounds_played: u64,
    pub players: Vec<Player>,
}

impl GameState {
    pub fn scores(&self) -> Vec<i32> {
        self.players.iter().map(|player| player.score).collect()
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub nickname: String,
    pub score: i32,
    pub score_text: String,
    pub button_color: String,
    pub is_connected: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageOut {
    Error {
        r#type: String,
        title: String,
        detail: String,
    },
    GameState(GameState),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageIn {
    StartGame,
    PressButton,
}
