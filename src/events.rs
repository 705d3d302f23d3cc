//! Data-source observation.
//!
//! Runs on the tokio runtime, waiting for state changes on the data source's
//! watch channel and sending each new snapshot to the UI thread over an
//! [`mpsc`] channel.  The UI thread only ever sees whole snapshots.

use std::sync::mpsc;

use falcon_flights::{DataSourceState, LaunchItem, LaunchesDataSource};
use tracing::debug;

/// Messages sent from the observer task to the UI thread.
pub enum AppMsg {
    /// The data source published a new state.
    State(DataSourceState<LaunchItem>),
}

/// Spawn the observer task.
///
/// The current state is sent immediately, then one message per transition.
/// The task ends when the receiver is dropped or the data source goes away.
pub fn spawn(source: &LaunchesDataSource) -> mpsc::Receiver<AppMsg> {
    let (tx, rx) = mpsc::channel();
    let mut states = source.subscribe();

    tokio::spawn(async move {
        loop {
            let snapshot = states.borrow_and_update().clone();
            // If the receiver is gone the UI has exited; stop observing.
            if tx.send(AppMsg::State(snapshot)).is_err() {
                break;
            }
            if states.changed().await.is_err() {
                break;
            }
        }
        debug!("state observer stopped");
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use bytes::Bytes;
    use falcon_flights::{
        LaunchesQuery, RequestDescriptor, RocketType, SortOptions, Transport, TransportError,
    };

    struct OnePage;

    #[async_trait]
    impl Transport for OnePage {
        fn name(&self) -> &str {
            "one-page"
        }

        async fn execute(&self, _: &RequestDescriptor) -> Result<Bytes, TransportError> {
            Ok(Bytes::from_static(
                br#"{ "docs": [ { "id": "a", "name": "A", "date_utc": "2020-06-13T09:21:00.000Z" } ],
                      "hasNextPage": false }"#,
            ))
        }
    }

    fn recv(rx: &mpsc::Receiver<AppMsg>) -> DataSourceState<LaunchItem> {
        match rx.recv_timeout(Duration::from_secs(5)).expect("snapshot") {
            AppMsg::State(state) => state,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn forwards_initial_and_subsequent_snapshots() {
        let source = LaunchesDataSource::new(
            LaunchesQuery::rocket(RocketType::Falcon9, None),
            SortOptions::new(),
            Arc::new(OnePage),
        );
        let rx = spawn(&source);

        let initial = recv(&rx);
        assert!(initial.launches.is_none());
        assert!(!initial.is_loading);

        source.load_next().unwrap().await.unwrap();

        // Intermediate snapshots may be coalesced; the last one is final.
        let mut last = recv(&rx);
        while let Ok(AppMsg::State(state)) = rx.recv_timeout(Duration::from_millis(200)) {
            last = state;
        }
        assert!(!last.is_loading);
        assert_eq!(last.items().len(), 1);
        assert!(last.is_exhausted());
    }
}
