//! Shared test doubles: a scripted gateway and a recording mailer.

// Each test binary compiles its own view of this module.
#![allow(dead_code)]

use async_trait::async_trait;
use roam_api::state::{AppConfig, AppState};
use roam_core::{
    Booking, Currency, EmailMessage, InitializeRequest, InitializedTransaction, Listing,
    Mailer, MemoryStore, PaymentGateway, Price, Role, Store, TravelError, TravelResult,
    User, VerifyOutcome,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// How the scripted gateway answers initialize calls
#[derive(Debug, Clone, Copy)]
pub enum InitScript {
    Accept,
    HttpFailure,
    Decline,
}

/// How the scripted gateway answers verify calls
#[derive(Debug, Clone, Copy)]
pub enum VerifyScript {
    Success,
    Failed,
    HttpFailure,
}

/// Gateway double with programmable outcomes and call counters
pub struct ScriptedGateway {
    init: InitScript,
    verify: VerifyScript,
    pub init_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new(init: InitScript, verify: VerifyScript) -> Self {
        Self {
            init,
            verify,
            init_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
        }
    }

    pub fn accepting() -> Self {
        Self::new(InitScript::Accept, VerifyScript::Success)
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn initialize(
        &self,
        request: &InitializeRequest,
    ) -> TravelResult<InitializedTransaction> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        match self.init {
            InitScript::Accept => Ok(InitializedTransaction {
                tx_ref: request.tx_ref.clone(),
                checkout_url: format!("https://checkout.test/pay/{}", request.tx_ref),
            }),
            InitScript::HttpFailure => Err(TravelError::Gateway {
                provider: "scripted".to_string(),
                message: "HTTP 500: upstream down".to_string(),
            }),
            InitScript::Decline => Err(TravelError::Declined {
                provider: "scripted".to_string(),
                message: "payment initiation failed".to_string(),
            }),
        }
    }

    async fn verify(&self, _tx_ref: &str) -> TravelResult<VerifyOutcome> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        match self.verify {
            VerifyScript::Success => Ok(VerifyOutcome::Success),
            VerifyScript::Failed => Ok(VerifyOutcome::Failed("failed".to_string())),
            VerifyScript::HttpFailure => Err(TravelError::Gateway {
                provider: "scripted".to_string(),
                message: "HTTP 503: unavailable".to_string(),
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Mailer double that records every message
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> TravelResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Poll until the mailer has seen `expected` messages, or time out.
/// Emails are dispatched on detached tasks, so tests have to wait.
pub async fn wait_for_emails(mailer: &RecordingMailer, expected: usize) {
    for _ in 0..100 {
        if mailer.count() >= expected {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!(
        "expected {} emails, saw {} after timeout",
        expected,
        mailer.count()
    );
}

/// Everything a test needs to drive the workflow or the HTTP API
pub struct TestHarness {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<ScriptedGateway>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn harness(gateway: ScriptedGateway) -> TestHarness {
    let store = Arc::new(MemoryStore::new());
    let gateway = Arc::new(gateway);
    let mailer = Arc::new(RecordingMailer::new());

    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        currency: Currency::ETB,
    };

    let state = AppState::with_parts(
        store.clone(),
        gateway.clone(),
        mailer.clone(),
        config,
    );

    TestHarness {
        state,
        store,
        gateway,
        mailer,
    }
}

/// Seed a host, a guest, a listing, and a pending booking
pub async fn seed_booking(store: &MemoryStore) -> (User, Listing, Booking) {
    let host = User::new("Sara", "Bekele", "sara@example.com", Role::Host);
    let guest = User::new("Abel", "Tesfaye", "abel@example.com", Role::Guest);
    let listing = Listing::new(
        host.id,
        "Lakeside Cottage",
        "Bahir Dar",
        Price::new(850.0, Currency::ETB),
    );
    let booking = Booking::new(listing.id, guest.id);

    store.insert_user(host).await.unwrap();
    store.insert_user(guest.clone()).await.unwrap();
    store.insert_listing(listing.clone()).await.unwrap();
    store.insert_booking(booking.clone()).await.unwrap();

    (guest, listing, booking)
}
