use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;

use crate::state::AppState;

/// GET /orders/events - notification stream for the dashboard.
///
/// Re-exposes the in-process broadcast bus as SSE. Lagged subscribers skip
/// missed events rather than disconnecting.
#[tracing::instrument(name = "GET /orders/events", skip(state))]
pub async fn order_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    match Event::default().event(event.name()).json_data(&event) {
                        Ok(sse_event) => yield Ok(sse_event),
                        Err(err) => {
                            tracing::warn!("Failed to serialize order event: {}", err);
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Order event subscriber lagged, skipped {}", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
