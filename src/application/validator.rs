//! Debounced identifier-uniqueness validator
//!
//! An actor task watches raw keystroke values for the identifier field,
//! waits for a quiet window, then asks the backend whether the value is
//! taken. Each qualifying value supersedes the previous one: the
//! outstanding check is cancelled and a generation counter discards any
//! stale completion that slips through. The `idValidation` flag is
//! merged into the field's existing error set, never replacing the
//! other flags.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::gateway::CatalogGateway;
use crate::domain::validation::{rules, FieldErrors};

/// Tuning for the debounce window and the minimum value length that
/// reaches the backend.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    pub debounce: Duration,
    /// Values shorter than this never trigger a check (the original form
    /// skips prefixes of length <= 2).
    pub min_query_len: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            min_query_len: 3,
        }
    }
}

/// Shared error state for the identifier field, published over `watch`.
struct FieldState {
    errors: Mutex<FieldErrors>,
    errors_tx: watch::Sender<Option<FieldErrors>>,
    generation: AtomicU64,
}

impl FieldState {
    fn publish_locked(&self, errors: &FieldErrors) {
        self.errors_tx.send_replace(errors.clone().into_option());
    }

    fn apply_check_result(&self, taken: bool) {
        let mut errors = self.errors.lock().expect("field state lock poisoned");
        if taken {
            errors.set(rules::ID_VALIDATION, serde_json::json!(true));
        } else {
            errors.clear(rules::ID_VALIDATION);
        }
        self.publish_locked(&errors);
    }
}

/// Handle to the validator actor. Dropping the handle alone does not
/// stop the task; call [`IdValidator::shutdown`] when the owning scope
/// ends.
pub struct IdValidator {
    input_tx: mpsc::UnboundedSender<String>,
    errors_rx: watch::Receiver<Option<FieldErrors>>,
    field: Arc<FieldState>,
    stop: CancellationToken,
    actor: JoinHandle<()>,
}

impl IdValidator {
    /// Spawn the validator actor against a gateway.
    pub fn spawn(gateway: Arc<dyn CatalogGateway>, config: ValidatorConfig) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (errors_tx, errors_rx) = watch::channel(None);
        let field = Arc::new(FieldState {
            errors: Mutex::new(FieldErrors::new()),
            errors_tx,
            generation: AtomicU64::new(0),
        });
        let stop = CancellationToken::new();

        let actor = tokio::spawn(run_actor(
            gateway,
            config,
            input_rx,
            Arc::clone(&field),
            stop.clone(),
        ));

        Self {
            input_tx,
            errors_rx,
            field,
            stop,
            actor,
        }
    }

    /// Feed one raw field value (every keystroke).
    pub fn push(&self, value: impl Into<String>) {
        if self.input_tx.send(value.into()).is_err() {
            debug!("validator actor already stopped; input dropped");
        }
    }

    /// Merge synchronous rule flags (required/length) into the field's
    /// error set without touching the async uniqueness flag.
    pub fn apply_sync_rules(&self, sync_errors: &FieldErrors) {
        let mut errors = self.field.errors.lock().expect("field state lock poisoned");
        for rule in [rules::REQUIRED, rules::MIN_LENGTH, rules::MAX_LENGTH] {
            errors.clear(rule);
        }
        for (rule, detail) in sync_errors.iter() {
            errors.set(rule, detail.clone());
        }
        self.field.publish_locked(&errors);
    }

    /// Current error set; `None` when the field is clean.
    pub fn current_errors(&self) -> Option<FieldErrors> {
        self.errors_rx.borrow().clone()
    }

    /// Subscribe to error-set changes.
    pub fn subscribe_errors(&self) -> watch::Receiver<Option<FieldErrors>> {
        self.errors_rx.clone()
    }

    /// Stop the actor and any in-flight check.
    pub async fn shutdown(self) {
        self.stop.cancel();
        let _ = self.actor.await;
    }
}

async fn run_actor(
    gateway: Arc<dyn CatalogGateway>,
    config: ValidatorConfig,
    mut input_rx: mpsc::UnboundedReceiver<String>,
    field: Arc<FieldState>,
    stop: CancellationToken,
) {
    let mut in_flight: Option<CancellationToken> = None;

    loop {
        // Wait for the first keystroke of a burst.
        let mut latest = tokio::select! {
            _ = stop.cancelled() => break,
            value = input_rx.recv() => match value {
                Some(value) => value,
                None => break,
            },
        };

        // Debounce: newer keystrokes inside the quiet window supersede.
        loop {
            tokio::select! {
                _ = stop.cancelled() => return,
                _ = tokio::time::sleep(config.debounce) => break,
                value = input_rx.recv() => match value {
                    Some(value) => latest = value,
                    None => break,
                },
            }
        }

        // Too-short prefixes never reach the backend and never change
        // the idValidation flag.
        if latest.chars().count() < config.min_query_len {
            debug!(value = %latest, "skipping uniqueness check for short value");
            continue;
        }

        // Switch-latest: cancel the previous outstanding check.
        if let Some(previous) = in_flight.take() {
            previous.cancel();
        }
        let token = stop.child_token();
        in_flight = Some(token.clone());
        let generation = field.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::spawn(run_check(
            Arc::clone(&gateway),
            latest,
            token,
            generation,
            Arc::clone(&field),
        ));
    }
}

async fn run_check(
    gateway: Arc<dyn CatalogGateway>,
    value: String,
    token: CancellationToken,
    generation: u64,
    field: Arc<FieldState>,
) {
    let result = tokio::select! {
        _ = token.cancelled() => {
            debug!(value = %value, "uniqueness check superseded before completion");
            return;
        }
        result = gateway.id_exists(&value) => result,
    };

    // A completion whose generation is stale lost the race to a newer
    // check; its result must not land.
    if field.generation.load(Ordering::SeqCst) != generation {
        debug!(value = %value, "discarding stale uniqueness result");
        return;
    }

    match result {
        Ok(taken) => {
            debug!(value = %value, taken, "uniqueness check completed");
            field.apply_check_result(taken);
        }
        Err(err) => {
            // Transport failures surface elsewhere; the flag state is
            // left exactly as it was.
            warn!(value = %value, error = %err, "uniqueness check failed");
        }
    }
}
