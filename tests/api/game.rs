use std::time::Duration;

use tokio::time;
use tokio_tungstenite::tungstenite::Message;

use crate::helpers::test_app::TestApp;

#[tokio::test]
async fn game_starts_idle_with_configured_players() {
    let app = TestApp::spawn_app().await;

    let state = app.get_game_state().await;

    assert_eq!(state.state, "Idle");
    assert_eq!(state.message, "Start game!");
    assert_eq!(state.rounds_played, 0);
    assert_eq!(state.scores(), vec![0, 0]);
    assert_eq!(state.players[0].nickname, "p1");
    assert_eq!(state.players[1].nickname, "p2");
    assert_eq!(state.players[0].score_text, "Score: 0");
    assert!(state.players[0].button_color.starts_with('#'));
    assert!(!state.players[0].is_connected);
}

#[tokio::test]
async fn starting_the_game_twice_runs_one_round_loop() {
    let app = TestApp::spawn_app_with_delays(5000, 5000).await;

    assert!(app.start_game().await.is_success());
    assert!(app.start_game().await.is_success());
    time::sleep(Duration::from_millis(200)).await;

    let state = app.get_game_state().await;
    assert_eq!(state.state, "Waiting");
    assert_eq!(state.message, "Wait!");
    assert_eq!(state.rounds_played, 1);
}

#[tokio::test]
async fn player_can_connect_with_a_configured_nickname() {
    let app = TestApp::spawn_app().await;

    let mut player = app.connect_player("p1").await.unwrap();
    let state = player.receive_game_state().await.unwrap();

    assert_eq!(state.message, "Start game!");
    assert!(state.players[0].is_connected);
    assert!(!state.players[1].is_connected);
}

#[tokio::test]
async fn unknown_player_cannot_connect() {
    let app = TestApp::spawn_app().await;

    let mut player = app.connect_player("stranger").await.unwrap();

    assert_eq!(player.receive_error().await, "PLAYER_DOES_NOT_EXIST");
}

#[tokio::test]
async fn same_player_cannot_connect_twice() {
    let app = TestApp::spawn_app().await;
    let mut first = app.connect_player("p1").await.unwrap();
    let _ = first.receive_game_state().await.unwrap();

    let mut second = app.connect_player("p1").await.unwrap();

    assert_eq!(second.receive_error().await, "PLAYER_ALREADY_CONNECTED");
}

#[tokio::test]
async fn ping_is_answered_with_pong() {
    let app = TestApp::spawn_app().await;
    let mut player = app.connect_player("p1").await.unwrap();
    let _ = player.receive_game_state().await.unwrap();

    player.send_message(Message::Text("ping".to_string())).await;

    assert_eq!(player.receive_text().await.unwrap(), "pong");
}

#[tokio::test]
async fn unprocessable_message_keeps_the_connection_open() {
    let app = TestApp::spawn_app().await;
    let mut player = app.connect_player("p1").await.unwrap();
    let _ = player.receive_game_state().await.unwrap();

    player
        .send_message(Message::Text("{\"kind\":\"dance\"}".to_string()))
        .await;

    assert_eq!(
        player.receive_error().await,
        "UNPROCESSABLE_WEBSOCKET_MESSAGE"
    );
    player.send_message(Message::Text("ping".to_string())).await;
    assert_eq!(player.receive_text().await.unwrap(), "pong");
}

#[tokio::test]
async fn pressing_after_the_reveal_scores_a_point() {
    let app = TestApp::spawn_app_with_delays(300, 300).await;
    let mut p1 = app.connect_player("p1").await.unwrap();
    let _ = p1.receive_game_state().await.unwrap();
    let mut p2 = app.connect_player("p2").await.unwrap();
    let _ = p2.receive_game_state().await.unwrap();

    p1.start_game().await;
    let _ = p2.receive_game_state_with_message("Wait!").await.unwrap();
    let revealed = p2
        .receive_game_state_with_message("Press button!")
        .await
        .unwrap();
    assert_eq!(revealed.state, "ReadyForInput");
    p2.press_button().await;

    let state = p1
        .receive_game_state_with_message("Great job!")
        .await
        .unwrap();
    assert_eq!(state.scores(), vec![0, 1]);
    assert_eq!(state.players[1].score_text, "Score: 1");
}

#[tokio::test]
async fn pressing_before_the_reveal_is_penalized() {
    let app = TestApp::spawn_app_with_delays(5000, 5000).await;
    let mut p1 = app.connect_player("p1").await.unwrap();
    let _ = p1.receive_game_state().await.unwrap();
    let mut p2 = app.connect_player("p2").await.unwrap();
    let _ = p2.receive_game_state().await.unwrap();

    p1.start_game().await;
    let _ = p1.receive_game_state_with_message("Wait!").await.unwrap();
    time::sleep(Duration::from_millis(100)).await;
    p1.press_button().await;

    let state = p2
        .receive_game_state_with_message("Wrong time!")
        .await
        .unwrap();
    assert_eq!(state.scores(), vec![-1, 1]);
    assert_eq!(state.players[0].score_text, "Score: -1");
}
