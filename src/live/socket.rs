//! The WebSocket endpoint that connects a viewer to the live-update channel.

use std::sync::Arc;

use axum::{
    extract::{
        FromRef, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use tokio::sync::mpsc;

use crate::{TrackerState, live::ViewerRegistry};

/// The state needed for serving live updates.
#[derive(Debug, Clone)]
pub struct LiveUpdatesState {
    /// The registry the viewer joins for the lifetime of its connection.
    pub viewers: Arc<ViewerRegistry>,
}

impl FromRef<TrackerState> for LiveUpdatesState {
    fn from_ref(state: &TrackerState) -> Self {
        Self {
            viewers: state.viewers.clone(),
        }
    }
}

/// Upgrade the connection and stream donation updates until the viewer
/// disconnects.
pub async fn get_live_updates(
    State(state): State<LiveUpdatesState>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| serve_viewer(socket, state.viewers))
}

async fn serve_viewer(mut socket: WebSocket, viewers: Arc<ViewerRegistry>) {
    let (sender, mut updates) = mpsc::unbounded_channel::<Message>();
    let viewer_id = viewers.register(sender);
    tracing::info!("viewer {viewer_id} connected");

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(message) => {
                    if socket.send(message).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
            incoming = socket.recv() => match incoming {
                // Viewers only listen. Inbound frames are ignored, but
                // polling the socket is what drives the close handshake.
                Some(Ok(_)) => {}
                Some(Err(_)) | None => break,
            },
        }
    }

    viewers.deregister(viewer_id);
    tracing::info!("viewer {viewer_id} disconnected");
}
