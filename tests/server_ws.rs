use std::sync::Arc;

use disa_quiz::protocol::{ClientMessage, ServerMessage};
use disa_quiz::server::{ServerState, serve};
use disa_quiz::{Leaderboard, OptionKey, Question, QuestionBank};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

type Socket = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Spawn a server on a random port; every question's answer is D.
async fn spawn_server() -> (String, Arc<Leaderboard>) {
    let bank = QuestionBank::new((0..5).map(|i| {
        Question::new(
            format!("Question {i}"),
            ["a".into(), "b".into(), "c".into(), "d".into()],
            OptionKey::D,
            None,
        )
    }));
    let leaderboard = Arc::new(Leaderboard::new());
    let state = Arc::new(ServerState::new(Arc::new(bank), Arc::clone(&leaderboard)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(serve(listener, state));

    (format!("ws://127.0.0.1:{}", port), leaderboard)
}

async fn send(ws: &mut Socket, msg: ClientMessage) {
    let json = serde_json::to_string(&msg).unwrap();
    ws.send(Message::Text(json.into())).await.unwrap();
}

async fn recv(ws: &mut Socket) -> ServerMessage {
    loop {
        match ws.next().await.unwrap().unwrap() {
            Message::Text(text) => return serde_json::from_str(text.as_str()).unwrap(),
            _ => continue,
        }
    }
}

#[tokio::test]
async fn participant_completes_quiz_over_websocket() {
    let (url, leaderboard) = spawn_server().await;
    let (mut ws, _) = tokio_tungstenite::connect_async(&url).await.unwrap();

    assert!(matches!(recv(&mut ws).await, ServerMessage::Welcome { bank_size: 5 }));

    send(
        &mut ws,
        ClientMessage::Start {
            name: "Alice".to_string(),
            count: 2,
        },
    )
    .await;
    assert!(matches!(
        recv(&mut ws).await,
        ServerMessage::Question { index: 0, total: 2, .. }
    ));

    send(&mut ws, ClientMessage::Submit { selection: Some("d".to_string()) }).await;
    assert!(matches!(recv(&mut ws).await, ServerMessage::Feedback { correct: true, .. }));
    send(&mut ws, ClientMessage::Next).await;
    assert!(matches!(recv(&mut ws).await, ServerMessage::Question { index: 1, .. }));

    // malformed frames are ignored
    ws.send(Message::Text(r#"{"type":"Bogus"}"#.to_string().into())).await.unwrap();

    send(&mut ws, ClientMessage::Submit { selection: None }).await;
    assert!(matches!(recv(&mut ws).await, ServerMessage::Feedback { correct: false, .. }));
    send(&mut ws, ClientMessage::Next).await;

    match recv(&mut ws).await {
        ServerMessage::Summary {
            score,
            total,
            wrong_answers,
            ..
        } => {
            assert_eq!((score, total), (1, 2));
            assert_eq!(wrong_answers.len(), 1);
        }
        other => panic!("expected summary, got {other:?}"),
    }
    match recv(&mut ws).await {
        ServerMessage::Leaderboard { entries } => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].name, "Alice");
        }
        other => panic!("expected leaderboard, got {other:?}"),
    }

    send(&mut ws, ClientMessage::RetryWrong).await;
    assert!(matches!(
        recv(&mut ws).await,
        ServerMessage::Question { index: 0, total: 1, .. }
    ));
    assert_eq!(leaderboard.len(), 1);
}

#[tokio::test]
async fn out_of_order_request_is_refused() {
    let (url, _) = spawn_server().await;
    let (mut ws, _) = tokio_tungstenite::connect_async(&url).await.unwrap();
    recv(&mut ws).await;

    send(&mut ws, ClientMessage::Next).await;
    match recv(&mut ws).await {
        ServerMessage::Error { kind, .. } => assert_eq!(kind, "invalid_operation"),
        other => panic!("expected error, got {other:?}"),
    }
}
