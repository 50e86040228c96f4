use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::{sync::Arc, time::Duration};
use tokio::sync::broadcast;

use crate::events::OrderEvent;

pub type AppState = Arc<State>;

/// Buffered events per subscriber before slow dashboards start lagging
const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct State {
    pub db: DatabaseConnection,
    pub events: broadcast::Sender<OrderEvent>,
}

impl State {
    pub async fn new() -> Self {
        let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let mut opt = ConnectOptions::new(db_url.to_owned());
        opt.max_connections(10)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(
                std::env::var("DATABASE_LOGGING")
                    .map(|v| v == "true")
                    .unwrap_or(false),
            );

        let db = Database::connect(opt)
            .await
            .expect("Failed to connect to database");

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self { db, events }
    }

    /// Publish a notification event. No subscribers is not an error.
    pub fn emit(&self, event: OrderEvent) {
        let _ = self.events.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
impl State {
    /// State backed by a disconnected mock database, for router construction
    /// in tests that never touch the database.
    pub fn mock() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            db: DatabaseConnection::default(),
            events,
        }
    }
}
