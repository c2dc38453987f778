//! End-to-end test over a real WebSocket connection: one client mutates, a
//! second client consumes its subscription feed.

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message as WsMessage;

use crate::broker::Broker;
use crate::service::MessageBoard;
use crate::store::ChannelStore;
use crate::transport::websocket::serve;

type WsClient = tokio_tungstenite::WebSocketStream<TcpStream>;

async fn start_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let board = MessageBoard::new(ChannelStore::seeded(), Broker::default());
    tokio::spawn(serve(listener, board));
    addr
}

async fn connect(addr: &str) -> WsClient {
    let stream = TcpStream::connect(addr).await.expect("connect failed");
    let (ws, _) = tokio_tungstenite::client_async("ws://localhost/", stream)
        .await
        .expect("websocket handshake failed");
    ws
}

async fn send(ws: &mut WsClient, value: Value) {
    ws.send(WsMessage::text(value.to_string())).await.unwrap();
}

async fn next_json(ws: &mut WsClient) -> Value {
    let msg = tokio::time::timeout(std::time::Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for a server message")
        .expect("connection closed")
        .unwrap();
    serde_json::from_str(msg.to_text().unwrap()).unwrap()
}

#[tokio::test]
async fn publisher_and_subscriber_across_two_connections() {
    let addr = start_server().await;
    let mut writer = connect(&addr).await;
    let mut reader = connect(&addr).await;

    // Reader subscribes to Main's posts and to channel creations.
    send(&mut reader, json!({"type": "subscribe_posts", "channel": "Main"})).await;
    assert_eq!(next_json(&mut reader).await["type"], "subscribed");
    send(&mut reader, json!({"type": "subscribe_channels"})).await;
    assert_eq!(next_json(&mut reader).await["type"], "subscribed");

    // Writer posts to another channel first; the reader must not see it.
    send(
        &mut writer,
        json!({"type": "add_post", "channel": "Cats", "message": "purr"}),
    )
    .await;
    assert_eq!(next_json(&mut writer).await["type"], "post_added");

    // Then a post to Main and a new channel.
    send(
        &mut writer,
        json!({"type": "add_post", "channel": "Main", "message": "new post"}),
    )
    .await;
    let reply = next_json(&mut writer).await;
    assert_eq!(reply["type"], "post_added");
    assert_eq!(reply["post"]["message"], "new post");

    send(&mut writer, json!({"type": "add_channel", "name": "Tech"})).await;
    assert_eq!(next_json(&mut writer).await["type"], "channel_added");

    // The reader sees exactly the Main post and the channel creation. The
    // two feeds are independent, so their relative order is not fixed.
    let first = next_json(&mut reader).await;
    let second = next_json(&mut reader).await;
    let (post_event, channel_event) = if first["event"] == "new_post" {
        (first, second)
    } else {
        (second, first)
    };
    assert_eq!(post_event["type"], "event");
    assert_eq!(post_event["event"], "new_post");
    assert_eq!(post_event["channel"], "Main");
    assert_eq!(post_event["post"]["message"], "new post");
    assert_eq!(channel_event["event"], "new_channel");
    assert_eq!(channel_event["name"], "Tech");

    // Queries reflect the writes.
    send(&mut writer, json!({"type": "channels"})).await;
    let reply = next_json(&mut writer).await;
    let names: Vec<&str> = reply["channels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Main", "Cats", "Tech"]);

    send(&mut writer, json!({"type": "posts", "channel": "Main"})).await;
    assert_eq!(next_json(&mut writer).await["posts"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_request_gets_an_error_reply() {
    let addr = start_server().await;
    let mut client = connect(&addr).await;

    send(&mut client, json!({"type": "no_such_op"})).await;
    let reply = next_json(&mut client).await;
    assert_eq!(reply["type"], "error");
}
