use std::collections::HashMap;
use std::io;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_tungstenite::accept_async;
use tracing::{info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::broker::{SubscriberId, Subscription, Topic};
use crate::service::MessageBoard;
use crate::transport::message::{ClientRequest, ServerReply};

/// Binds `addr` and serves WebSocket clients until the process ends.
pub async fn start_websocket_server(addr: &str, board: MessageBoard) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening on ws://{}", listener.local_addr()?);
    serve(listener, board).await;
    Ok(())
}

/// Accept loop over an already-bound listener. Split out so tests can bind
/// an ephemeral port themselves.
pub async fn serve(listener: TcpListener, board: MessageBoard) {
    while let Ok((stream, peer)) = listener.accept().await {
        info!(%peer, "client connected");
        tokio::spawn(handle_connection(stream, board.clone()));
    }
}

async fn handle_connection(stream: TcpStream, board: MessageBoard) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("websocket handshake failed: {e}");
            return;
        }
    };

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Outbound queue for this connection; replies and subscription events
    // both go through it, so pushed events never interleave mid-frame.
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    // One subscription per topic per connection.
    let mut subscriptions: HashMap<Topic, SubscriberId> = HashMap::new();

    while let Some(Ok(msg)) = ws_receiver.next().await {
        if !msg.is_text() {
            continue;
        }
        let Ok(text) = msg.to_text() else { continue };
        let reply = match serde_json::from_str::<ClientRequest>(text) {
            Ok(request) => handle_request(request, &board, &tx, &mut subscriptions),
            Err(e) => ServerReply::Error {
                message: format!("invalid request: {e}"),
            },
        };
        send_reply(&tx, &reply);
    }

    // The consumer is gone; tear down every registration it held.
    for id in subscriptions.into_values() {
        board.unsubscribe(id);
    }
    info!("client disconnected");
}

/// Dispatches one parsed request against the board and returns the direct
/// reply. Subscription feeds keep running after the reply via their own
/// forwarding task.
pub(crate) fn handle_request(
    request: ClientRequest,
    board: &MessageBoard,
    tx: &UnboundedSender<WsMessage>,
    subscriptions: &mut HashMap<Topic, SubscriberId>,
) -> ServerReply {
    match request {
        ClientRequest::Channels => ServerReply::Channels {
            channels: board.channels(),
        },
        ClientRequest::Posts { channel } => ServerReply::Posts {
            posts: board.posts(&channel),
        },
        ClientRequest::AddPost { channel, message } => ServerReply::PostAdded {
            post: board.add_post(&channel, &message),
        },
        ClientRequest::AddChannel { name } => match board.add_channel(&name) {
            Ok(channel) => ServerReply::ChannelAdded { channel },
            Err(e) => ServerReply::Error {
                message: e.to_string(),
            },
        },
        ClientRequest::SubscribePosts { channel } => {
            start_subscription(board.new_posts(&channel), tx, subscriptions)
        }
        ClientRequest::SubscribeChannels => {
            start_subscription(board.new_channels(), tx, subscriptions)
        }
        ClientRequest::UnsubscribePosts { channel } => {
            stop_subscription(&Topic::posts(&channel), board, subscriptions)
        }
        ClientRequest::UnsubscribeChannels => {
            stop_subscription(&Topic::Channels, board, subscriptions)
        }
    }
}

fn start_subscription(
    subscription: Subscription,
    tx: &UnboundedSender<WsMessage>,
    subscriptions: &mut HashMap<Topic, SubscriberId>,
) -> ServerReply {
    let topic = subscription.topic().clone();
    if subscriptions.contains_key(&topic) {
        // Dropping the fresh subscription unregisters it again.
        return ServerReply::Error {
            message: format!("already subscribed to {topic}"),
        };
    }
    subscriptions.insert(topic.clone(), subscription.id());

    let tx = tx.clone();
    tokio::spawn(async move {
        let mut subscription = subscription;
        while let Some(event) = subscription.recv().await {
            match serde_json::to_string(&ServerReply::Event(event)) {
                Ok(json) => {
                    if tx.send(WsMessage::text(json)).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("failed to serialize event: {e}"),
            }
        }
    });

    ServerReply::Subscribed {
        topic: topic.to_string(),
    }
}

fn stop_subscription(
    topic: &Topic,
    board: &MessageBoard,
    subscriptions: &mut HashMap<Topic, SubscriberId>,
) -> ServerReply {
    // Idempotent: unsubscribing a topic that was never subscribed is fine.
    if let Some(id) = subscriptions.remove(topic) {
        board.unsubscribe(id);
    }
    ServerReply::Unsubscribed {
        topic: topic.to_string(),
    }
}

fn send_reply(tx: &UnboundedSender<WsMessage>, reply: &ServerReply) {
    match serde_json::to_string(reply) {
        Ok(json) => {
            let _ = tx.send(WsMessage::text(json));
        }
        Err(e) => warn!("failed to serialize reply: {e}"),
    }
}
