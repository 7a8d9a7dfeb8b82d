use super::*;
use crate::adapters::InMemoryEventBus;
use crate::domain::{AirlineStatus, FLIGHT_READINESS_VOTES};
use crate::events::AirlineRegisteredEvent;
use std::sync::atomic::{AtomicU64, Ordering};

const OWNER: Address = Address([0xAA; 20]);
const APP: Address = Address([0xBB; 20]);
const STRANGER: Address = Address([0xCC; 20]);

fn addr(n: u8) -> Address {
    Address([n; 20])
}

// Bus that refuses every event
struct FailingEventBus {
    attempts: AtomicU64,
}

#[async_trait]
impl EventBus for FailingEventBus {
    async fn publish(&self, _event: RegistryEvent) -> Result<(), String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err("bus offline".to_string())
    }
}

fn create_test_service() -> RegistryService<InMemoryEventBus> {
    RegistryService::new(
        Arc::new(InMemoryEventBus::new()),
        &RegistryConfig::new(OWNER),
    )
    .unwrap()
}

/// Owner registers A1..A4, then hands the authorized caller to APP
async fn create_bootstrapped_service() -> RegistryService<InMemoryEventBus> {
    let service = create_test_service();
    for i in 1..=4u8 {
        service
            .register_airline(OWNER, addr(i), &format!("A{i}"))
            .await
            .unwrap();
    }
    service.set_authorized_caller(OWNER, APP).await.unwrap();
    service
}

#[tokio::test]
async fn test_new_rejects_zero_owner() {
    let result = RegistryService::new(
        Arc::new(InMemoryEventBus::new()),
        &RegistryConfig::new(Address::ZERO),
    );
    assert!(matches!(result, Err(ConfigError::ZeroOwner)));
}

#[tokio::test]
async fn test_bootstrap_then_consensus_scenario() {
    let service = create_bootstrapped_service().await;

    let airlines = service.all_airlines().await;
    assert_eq!(airlines.len(), 4);
    let names: Vec<_> = airlines.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["A1", "A2", "A3", "A4"]);
    assert!(airlines
        .iter()
        .all(|a| a.status == AirlineStatus::Registered));

    let fifth = service.register_airline(APP, addr(5), "A5").await.unwrap();
    assert_eq!(fifth.status, AirlineStatus::PendingApproval);
    assert_eq!(fifth.votes, 0);

    let err = service
        .register_flight(APP, addr(1), "A1", "F1", 1_700_000_000)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::InsufficientVotes {
            airline: "A1".to_string(),
            votes: 0,
            required: FLIGHT_READINESS_VOTES,
        }
    );
    assert!(service.all_flights().await.is_empty());
}

#[tokio::test]
async fn test_bootstrap_requires_owner() {
    let service = create_test_service();
    service.set_authorized_caller(OWNER, APP).await.unwrap();

    let err = service.register_airline(APP, addr(1), "A1").await.unwrap_err();
    assert_eq!(err, RegistryError::Unauthorized { caller: APP });
    assert!(!service.is_airline(addr(1)).await);
    assert_eq!(service.admission_mode().await, AdmissionMode::Bootstrap);
}

#[tokio::test]
async fn test_duplicate_address_in_consensus_mode() {
    let service = create_bootstrapped_service().await;
    service.register_airline(APP, addr(5), "A5").await.unwrap();

    let err = service.register_airline(APP, addr(5), "A6").await.unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateAirline(_)));
    assert_eq!(service.all_airlines().await.len(), 5);
    assert!(service.airline("A6").await.is_none());
}

#[tokio::test]
async fn test_pause_blocks_mutations_and_keeps_reads() {
    let service = create_bootstrapped_service().await;
    let before = service.snapshot().await;

    service.set_operational(OWNER, false).await.unwrap();
    assert!(!service.is_operational().await);

    assert_eq!(
        service.register_airline(APP, addr(9), "A9").await,
        Err(RegistryError::ContractPaused)
    );
    assert_eq!(
        service.register_flight(APP, addr(1), "A1", "F1", 0).await,
        Err(RegistryError::ContractPaused)
    );

    let after = service.snapshot().await;
    assert_eq!(after.airlines, before.airlines);
    assert_eq!(after.flights, before.flights);
    assert!(!after.operational);
    assert!(service.is_airline(addr(3)).await);

    service.set_operational(OWNER, true).await.unwrap();
    assert!(service.register_airline(APP, addr(9), "A9").await.is_ok());
}

#[tokio::test]
async fn test_set_operational_owner_only_and_idempotent() {
    let service = create_test_service();
    assert_eq!(
        service.set_operational(STRANGER, false).await,
        Err(RegistryError::Unauthorized { caller: STRANGER })
    );
    assert!(service.set_operational(OWNER, true).await.is_ok());
    assert!(service.set_operational(OWNER, true).await.is_ok());
    assert!(service.is_operational().await);
}

#[tokio::test]
async fn test_set_authorized_caller_errors() {
    let service = create_test_service();
    assert_eq!(
        service.set_authorized_caller(STRANGER, APP).await,
        Err(RegistryError::Unauthorized { caller: STRANGER })
    );
    assert_eq!(
        service.set_authorized_caller(OWNER, Address::ZERO).await,
        Err(RegistryError::InvalidAddress)
    );
    assert_eq!(service.authorized_caller().await, OWNER);
    assert_eq!(service.owner().await, OWNER);
}

#[tokio::test]
async fn test_events_emitted_once_per_committed_mutation() {
    let service = create_bootstrapped_service().await;
    let bus = service.event_bus().clone();

    // 4 airlines + 1 authorized caller change
    assert_eq!(bus.event_count(), 5);

    // Rejected calls and operational toggles publish nothing
    let _ = service.register_airline(STRANGER, addr(7), "A7").await;
    service.set_operational(OWNER, true).await.unwrap();
    assert_eq!(bus.event_count(), 5);

    let events = bus.get_events();
    match &events[0] {
        RegistryEvent::AirlineRegistered(AirlineRegisteredEvent { airline }) => {
            assert_eq!(airline.name, "A1");
            assert_eq!(airline.owner_address, addr(1));
            assert_eq!(airline.status, AirlineStatus::Registered);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(
        events[4],
        RegistryEvent::authorized_caller_changed(OWNER, APP)
    );

    let stats = service.stats();
    assert_eq!(stats.events_published, 5);
    assert_eq!(stats.mutations_rejected, 1);
}

#[tokio::test]
async fn test_publish_failure_does_not_undo_mutation() {
    let bus = Arc::new(FailingEventBus {
        attempts: AtomicU64::new(0),
    });
    let service = RegistryService::new(bus.clone(), &RegistryConfig::new(OWNER)).unwrap();

    let airline = service.register_airline(OWNER, addr(1), "A1").await;
    assert!(airline.is_ok());
    assert!(service.is_airline(addr(1)).await);
    assert_eq!(bus.attempts.load(Ordering::SeqCst), 1);

    let stats = service.stats();
    assert_eq!(stats.mutations_accepted, 1);
    assert_eq!(stats.publish_failures, 1);
    assert_eq!(stats.events_published, 0);
}

#[tokio::test]
async fn test_flight_mismatch_reports_not_found() {
    let service = create_bootstrapped_service().await;
    let err = service
        .register_flight(APP, addr(2), "A1", "F1", 0)
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::AirlineNotFound { .. }));
    assert!(!service.is_flight_registered("F1").await);
}

#[tokio::test]
async fn test_register_flight_requires_authorized_caller() {
    let mut registry = RegistryConfig::new(OWNER).build().unwrap();
    registry.register_airline(OWNER, addr(1), "A1").unwrap();
    registry.force_votes("A1", FLIGHT_READINESS_VOTES);
    registry.set_authorized_caller(OWNER, APP).unwrap();

    let service = RegistryService::with_registry(Arc::new(InMemoryEventBus::new()), registry);

    // Neither a stranger nor the owner passes once APP is authorized
    for caller in [STRANGER, OWNER] {
        assert_eq!(
            service
                .register_flight(caller, addr(1), "A1", "F1", 1_700_000_000)
                .await,
            Err(RegistryError::Unauthorized { caller })
        );
    }
    assert!(!service.is_flight_registered("F1").await);
    assert!(service.event_bus().get_events().is_empty());
    assert_eq!(service.stats().mutations_rejected, 2);

    let flight = service
        .register_flight(APP, addr(1), "A1", "F1", 1_700_000_000)
        .await
        .unwrap();
    assert_eq!(flight.airline.owner_address, addr(1));
}

#[tokio::test]
async fn test_flight_registration_with_ready_airline() {
    let mut registry = RegistryConfig::new(OWNER).build().unwrap();
    registry.register_airline(OWNER, addr(1), "A1").unwrap();
    registry.force_votes("A1", FLIGHT_READINESS_VOTES);

    let service = RegistryService::with_registry(Arc::new(InMemoryEventBus::new()), registry);
    let flight = service
        .register_flight(OWNER, addr(1), "A1", "F1", 1_700_000_000)
        .await
        .unwrap();

    assert!(flight.is_registered);
    assert_eq!(flight.airline.name, "A1");
    assert_eq!(service.flight("F1").await, Some(flight));
    assert!(service.is_airline(addr(1)).await);
    assert_eq!(
        service.event_bus().get_events(),
        vec![RegistryEvent::flight_registered("A1", "F1", 1_700_000_000)]
    );

    assert_eq!(
        service
            .register_flight(OWNER, addr(1), "A1", "F1", 1_700_000_001)
            .await,
        Err(RegistryError::DuplicateFlight("F1".to_string()))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_are_serialized() {
    let service = Arc::new(create_test_service());

    let handles: Vec<_> = (1..=16u8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .register_airline(OWNER, addr(i), &format!("A{i}"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let snapshot = service.snapshot().await;
    assert_eq!(snapshot.airlines.len(), 16);
    let registered = snapshot
        .airlines
        .iter()
        .filter(|a| a.status == AirlineStatus::Registered)
        .count();
    assert_eq!(registered, 4);
    // The first four committed are the registered ones
    assert!(snapshot.airlines[..4]
        .iter()
        .all(|a| a.status == AirlineStatus::Registered));
    assert!(snapshot.airlines[4..]
        .iter()
        .all(|a| a.status == AirlineStatus::PendingApproval));
    for i in 1..=16u8 {
        assert!(service.is_airline(addr(i)).await);
    }
    assert_eq!(service.event_bus().event_count(), 16);
}
