//! Session-level tests for the relay WebSocket.
//!
//! These spawn the real router on a local listener and speak the protocol
//! over an actual socket, covering what the dispatch tests cannot: frame
//! ordering and the connection staying open across failed commands.

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio_tungstenite::tungstenite::Message;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stash_relay::{create_router, RelayState};

type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn spawn_relay(api_base: String) -> String {
    let state = RelayState {
        client: reqwest::Client::new(),
        api_base,
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    format!("ws://{}/ws", addr)
}

async fn connect(ws_url: &str) -> WsStream {
    let (stream, response) = tokio_tungstenite::connect_async(ws_url)
        .await
        .expect("connect");
    assert_eq!(response.status(), 101);
    stream
}

async fn next_json(stream: &mut WsStream) -> Value {
    loop {
        let message = stream.next().await.expect("frame").expect("websocket");
        if let Message::Text(text) = message {
            return serde_json::from_str(text.as_str()).expect("json frame");
        }
    }
}

async fn send_text(stream: &mut WsStream, text: &str) {
    stream
        .send(Message::Text(text.to_string().into()))
        .await
        .expect("send");
}

#[tokio::test]
async fn test_welcome_is_first_frame() {
    let ws_url = spawn_relay("http://localhost:1".to_string()).await;
    let mut stream = connect(&ws_url).await;

    let welcome = next_json(&mut stream).await;
    assert_eq!(welcome["type"], "welcome");
    assert_eq!(
        welcome["availableActions"],
        json!(["add", "list", "complete", "delete", "count"])
    );
}

#[tokio::test]
async fn test_session_survives_failed_commands() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "1", "text": "a", "completed": false}])),
        )
        .mount(&api)
        .await;

    let ws_url = spawn_relay(api.uri()).await;
    let mut stream = connect(&ws_url).await;
    next_json(&mut stream).await; // welcome

    // An unknown action fails but does not close the socket.
    send_text(&mut stream, r#"{"action":"teleport"}"#).await;
    let reply = next_json(&mut stream).await;
    assert_eq!(reply["success"], false);
    assert_eq!(reply["message"], "Unknown action: teleport");

    // Neither does a frame that is not JSON at all.
    send_text(&mut stream, "{not json").await;
    let reply = next_json(&mut stream).await;
    assert_eq!(reply["success"], false);
    assert_eq!(reply["message"], "Error processing request");

    // The same connection still serves a valid command.
    send_text(&mut stream, r#"{"action":"list"}"#).await;
    let reply = next_json(&mut stream).await;
    assert_eq!(reply["success"], true);
    assert_eq!(reply["action"], "list");
    assert_eq!(reply["data"][0]["text"], "a");
}
