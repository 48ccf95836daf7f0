//! Shared fixtures for store integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use ferrid_core::{Claim, Role, User};
use ferrid_service::{
    Backend, RoleService, ServiceError, ServiceResult, UserClaimService, UserRoleService,
    UserService,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// What every call on a [`ScriptedBackend`] does.
#[derive(Debug, Clone)]
pub enum Script {
    /// Succeed; lookups return a record, listings one item.
    Succeed,
    /// Decline with `ServiceResult::Failure`; lookups return nothing.
    Decline,
    /// Fault with an internal error carrying this message.
    Fault(String),
    /// Never complete.
    Hang,
}

/// A fake backend implementing all four services with one scripted outcome.
#[derive(Debug)]
pub struct ScriptedBackend {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The error a `Fault` script produces, for comparing messages.
    pub fn fault_error(message: &str) -> ServiceError {
        ServiceError::Internal(anyhow::anyhow!(message.to_string()))
    }

    async fn mutate(&self) -> Result<ServiceResult, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Succeed => Ok(ServiceResult::Success),
            Script::Decline => Ok(ServiceResult::Failure),
            Script::Fault(message) => Err(Self::fault_error(message)),
            Script::Hang => std::future::pending().await,
        }
    }

    async fn lookup<T>(&self, record: T) -> Result<Option<T>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Succeed => Ok(Some(record)),
            Script::Decline => Ok(None),
            Script::Fault(message) => Err(Self::fault_error(message)),
            Script::Hang => std::future::pending().await,
        }
    }

    async fn list<T>(&self, item: T) -> Result<Vec<T>, ServiceError> {
        self.lookup(item).await.map(|item| item.into_iter().collect())
    }
}

pub fn sample_user() -> User {
    User::with_id("u1", "alice", "alice@example.com")
}

pub fn sample_role() -> Role {
    Role::with_id("r1", "Admin")
}

#[async_trait]
impl UserService for ScriptedBackend {
    async fn create(&self, _user: &User) -> Result<ServiceResult, ServiceError> {
        self.mutate().await
    }

    async fn find(&self, _user_id: &str) -> Result<Option<User>, ServiceError> {
        self.lookup(sample_user()).await
    }

    async fn find_by_user_name(&self, _name: &str) -> Result<Option<User>, ServiceError> {
        self.lookup(sample_user()).await
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, ServiceError> {
        self.lookup(sample_user()).await
    }

    async fn update(&self, _user: &User) -> Result<ServiceResult, ServiceError> {
        self.mutate().await
    }

    async fn delete(&self, _user_id: &str) -> Result<ServiceResult, ServiceError> {
        self.mutate().await
    }
}

#[async_trait]
impl RoleService for ScriptedBackend {
    async fn create(&self, _role: &Role) -> Result<ServiceResult, ServiceError> {
        self.mutate().await
    }

    async fn find(&self, _role_id: &str) -> Result<Option<Role>, ServiceError> {
        self.lookup(sample_role()).await
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<Role>, ServiceError> {
        self.lookup(sample_role()).await
    }

    async fn update(&self, _role: &Role) -> Result<ServiceResult, ServiceError> {
        self.mutate().await
    }

    async fn delete(&self, _role_id: &str) -> Result<ServiceResult, ServiceError> {
        self.mutate().await
    }
}

#[async_trait]
impl UserRoleService for ScriptedBackend {
    async fn add_to_role(&self, _user_id: &str, _role: &str) -> Result<ServiceResult, ServiceError> {
        self.mutate().await
    }

    async fn roles_for_user(&self, _user_id: &str) -> Result<Vec<Role>, ServiceError> {
        self.list(sample_role()).await
    }

    async fn users_in_role(&self, _role: &str) -> Result<Vec<User>, ServiceError> {
        self.list(sample_user()).await
    }

    async fn remove_from_role(
        &self,
        _user_id: &str,
        _role: &str,
    ) -> Result<ServiceResult, ServiceError> {
        self.mutate().await
    }
}

#[async_trait]
impl UserClaimService for ScriptedBackend {
    async fn add_claims(
        &self,
        _user_id: &str,
        _claims: &[Claim],
    ) -> Result<ServiceResult, ServiceError> {
        self.mutate().await
    }

    async fn claims_for_user(&self, _user_id: &str) -> Result<Vec<Claim>, ServiceError> {
        self.list(Claim::new("department", "sales")).await
    }

    async fn users_for_claim(&self, _claim: &Claim) -> Result<Vec<User>, ServiceError> {
        self.list(sample_user()).await
    }

    async fn replace_claim(
        &self,
        _user_id: &str,
        _claim: &Claim,
        _new_claim: &Claim,
    ) -> Result<ServiceResult, ServiceError> {
        self.mutate().await
    }

    async fn remove_claim(
        &self,
        _user_id: &str,
        _claim: &Claim,
    ) -> Result<ServiceResult, ServiceError> {
        self.mutate().await
    }
}

/// Route every service of a [`Backend`] to the scripted fake.
pub fn scripted(script: Script) -> (Backend, Arc<ScriptedBackend>) {
    let fake = ScriptedBackend::new(script);
    (Backend::shared(fake.clone()), fake)
}

/// Install a test log writer so failures show the store's log output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("ferrid_store=debug")
        .with_test_writer()
        .try_init();
}

/// One event recorded by [`CapturedEvents`].
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldRecorder(BTreeMap<String, String>);

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

/// A layer that keeps every event the store emits.
#[derive(Debug, Clone, Default)]
pub struct CapturedEvents {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CapturedEvents {
    /// Store events at `level`.
    pub fn at(&self, level: Level) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.level == level && e.target.starts_with("ferrid_store"))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: recorder.0,
        });
    }
}

/// Capture events on the current thread until the guard drops.
pub fn capture_events() -> (CapturedEvents, tracing::subscriber::DefaultGuard) {
    let events = CapturedEvents::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (events, guard)
}
