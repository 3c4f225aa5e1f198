use std::net::SocketAddr;

use once_cell::sync::Lazy;
use quickdraw::config::{Config, GameSettings};
use tokio::net::TcpListener;

use super::test_player::{GameState, TestPlayer};

static ENVIRONMENT: Lazy<()> = Lazy::new(|| std::env::set_var("ENVIRONMENT", "dev"));

pub struct TestApp {
    pub base_address: String,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        TestApp::spawn_app_with_delays(1000, 1000).await
    }

    pub async fn spawn_app_with_delays(min_delay_ms: u64, max_delay_ms: u64) -> TestApp {
        Lazy::force(&ENVIRONMENT);
        // Binding to port 0 triggers an OS scan for an available port, this way we can run tests in parallel where each runs its own application
        let random_port_address = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = TcpListener::bind(random_port_address)
            .await
            .expect("Failed to bind to bind random port.");
        let address = listener.local_addr().unwrap();
        let config = {
            let mut config = Config::get().expect("Failed to read configuration.");
            config.game = GameSettings {
                players: vec!["p1".to_string(), "p2".to_string()],
                min_delay_ms,
                max_delay_ms,
                delay_before_new_round_ms: 1000,
                player_inactivity_timeout_ms: 10_000,
            };
            config
        };

        let server = quickdraw::startup::create_web_server(config, listener);
        let _ = tokio::spawn(server);

        TestApp {
            base_address: format!("localhost:{}", address.port()),
        }
    }

    pub async fn connect_player(&self, nickname: &str) -> Result<TestPlayer, String> {
        let websocket = tokio_tungstenite::connect_async(format!(
            "ws://{}/game/player/{nickname}/ws",
            self.base_address
        ))
        .await
        .map(|websocket_stream| websocket_stream.0)
        .map_err(|error| format!("WebSocket could not be created. Error: '{error}'."))?;

        Ok(TestPlayer::new(nickname, websocket))
    }

    pub async fn get_game_state(&self) -> GameState {
        let response = reqwest::Client::new()
            .get(format!("http://{}/game", self.base_address))
            .send()
            .await
            .expect("Failed to execute GetGame request.");
        assert!(response.status().is_success());

        response
            .json()
            .await
            .expect("Failed to parse the game state.")
    }

    pub async fn start_game(&self) -> reqwest::StatusCode {
        reqwest::Client::new()
            .post(format!("http://{}/game/start", self.base_address))
            .send()
            .await
            .expect("Failed to execute StartGame request.")
            .status()
    }
}
