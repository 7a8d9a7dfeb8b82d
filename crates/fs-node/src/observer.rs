//! # Event Observer
//!
//! Background task that follows the registry event stream and writes each
//! event to the structured log.

use fs_registry::RegistryEvent;
use fs_telemetry::{log_airline_event, log_event, log_flight_event};
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

/// Observer counters returned when the task stops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ObserverStats {
    /// Events logged.
    pub observed: u64,
    /// Events dropped because the observer fell behind.
    pub lagged: u64,
}

/// Log events until shutdown is signalled or the bus closes.
pub async fn run_observer(
    mut events: broadcast::Receiver<RegistryEvent>,
    mut shutdown: watch::Receiver<bool>,
) -> ObserverStats {
    let mut stats = ObserverStats::default();

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    debug!("Observer shutting down");
                    break;
                }
            }
            received = events.recv() => match received {
                Ok(event) => {
                    log_registry_event(&event);
                    stats.observed += 1;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Observer lagged behind registry events");
                    stats.lagged += skipped;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("Registry event bus closed");
                    break;
                }
            },
        }
    }

    stats
}

fn log_registry_event(event: &RegistryEvent) {
    match event {
        RegistryEvent::AuthorizedCallerChanged(e) => log_event!(
            info,
            "access",
            "Authorized caller changed",
            previous = %e.previous,
            current = %e.current
        ),
        RegistryEvent::AirlineRegistered(e) => log_airline_event!(
            info,
            "Airline registered",
            e.airline.name,
            e.airline.owner_address,
            status = %e.airline.status
        ),
        RegistryEvent::FlightRegistered(e) => log_flight_event!(
            info,
            "Flight registered",
            e.airline_name,
            e.flight_name,
            scheduled_time = e.scheduled_time
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fs_registry::{Address, Airline, AirlineStatus};
    use std::time::Duration;

    #[tokio::test]
    async fn test_observer_counts_until_shutdown() {
        let (tx, rx) = broadcast::channel(16);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_observer(rx, shutdown_rx));

        let airline = Airline::new("Alpha", Address([1; 20]), AirlineStatus::Registered);
        tx.send(RegistryEvent::airline_registered(airline)).unwrap();
        tx.send(RegistryEvent::flight_registered("Alpha", "AL1", 10))
            .unwrap();

        // Let the observer drain before signalling
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        let stats = handle.await.unwrap();
        assert_eq!(stats.observed, 2);
        assert_eq!(stats.lagged, 0);
    }

    #[tokio::test]
    async fn test_observer_stops_when_bus_closes() {
        let (tx, rx) = broadcast::channel(16);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        tx.send(RegistryEvent::authorized_caller_changed(
            Address([1; 20]),
            Address([2; 20]),
        ))
        .unwrap();
        drop(tx);

        let stats = run_observer(rx, shutdown_rx).await;
        assert_eq!(stats.observed, 1);
    }

    #[tokio::test]
    async fn test_observer_reports_lag() {
        let (tx, rx) = broadcast::channel(2);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        for n in 0..5u64 {
            tx.send(RegistryEvent::flight_registered("Alpha", format!("AL{n}"), n))
                .unwrap();
        }
        drop(tx);

        let stats = run_observer(rx, shutdown_rx).await;
        assert_eq!(stats.lagged, 3);
        assert_eq!(stats.observed, 2);
    }
}
