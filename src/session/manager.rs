/*!
 * Session store and role resolution.
 *
 * `SessionStore` is a cloneable handle over the current session. Every
 * applied `AuthEvent` is forwarded, in order, to each live subscriber.
 *
 * `RoleResolver` keeps datastore queries out of the auth callback path: it
 * subscribes to the store and resolves roles on its own task, publishing the
 * result on a watch channel.
 */

use async_trait::async_trait;
use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::models::{AccessState, AuthEvent, Role, Session};

/// Role lookup backed by the datastore
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Whether `user_id` holds `role`
    async fn has_role(&self, user_id: &str, role: Role) -> anyhow::Result<bool>;
}

/// Live subscription to a `SessionStore`
#[derive(Debug)]
pub struct Subscription {
    pub id: Uuid,
    pub receiver: mpsc::UnboundedReceiver<AuthEvent>,
}

#[derive(Default)]
struct StoreState {
    session: Option<Session>,
    subscribers: HashMap<Uuid, mpsc::UnboundedSender<AuthEvent>>,
}

/// Shared handle over the current auth session
#[derive(Clone, Default)]
pub struct SessionStore {
    state: Arc<Mutex<StoreState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Session> {
        self.state.lock().session.clone()
    }

    /// Record the event and notify subscribers; closed subscribers are dropped
    pub fn apply(&self, event: AuthEvent) {
        let mut state = self.state.lock();
        state.session = event.session().cloned();
        state
            .subscribers
            .retain(|_, sender| sender.send(event.clone()).is_ok());
    }

    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.state.lock().subscribers.insert(id, sender);
        Subscription { id, receiver }
    }

    /// Returns false when `id` was not subscribed
    pub fn unsubscribe(&self, id: Uuid) -> bool {
        self.state.lock().subscribers.remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }
}

/// Resolves the access level of the signed-in user on a background task
pub struct RoleResolver {
    store: SessionStore,
    subscription_id: Uuid,
    access: watch::Receiver<AccessState>,
    task: Option<JoinHandle<()>>,
}

impl RoleResolver {
    /// Subscribe to `store` and start resolving roles. Must be called
    /// inside a tokio runtime.
    pub fn spawn(store: SessionStore, directory: Arc<dyn RoleDirectory>) -> Self {
        let Subscription { id, mut receiver } = store.subscribe();
        let (sender, access) = watch::channel(AccessState::SignedOut);
        let initial = store.current();

        let task = tokio::spawn(async move {
            if let Some(session) = initial {
                sender.send_replace(resolve_access(directory.as_ref(), session).await);
            }

            while let Some(event) = receiver.recv().await {
                let state = match event {
                    AuthEvent::SignedIn(session) | AuthEvent::TokenRefreshed(session) => {
                        resolve_access(directory.as_ref(), session).await
                    }
                    AuthEvent::SignedOut => AccessState::SignedOut,
                };
                sender.send_replace(state);
            }
            debug!("Role resolver stopped");
        });

        Self {
            store,
            subscription_id: id,
            access,
            task: Some(task),
        }
    }

    /// Receiver that observes every access change
    pub fn access(&self) -> watch::Receiver<AccessState> {
        self.access.clone()
    }

    pub fn current_access(&self) -> AccessState {
        self.access.borrow().clone()
    }

    /// Unsubscribe and wait for queued events to be processed
    pub async fn shutdown(mut self) {
        self.store.unsubscribe(self.subscription_id);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Role resolver task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for RoleResolver {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription_id);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn resolve_access(directory: &dyn RoleDirectory, session: Session) -> AccessState {
    match directory.has_role(&session.user_id, Role::Admin).await {
        Ok(true) => AccessState::Admin(session),
        Ok(false) => AccessState::Student(session),
        Err(e) => {
            warn!("Role lookup failed for {}: {}", session.user_id, e);
            AccessState::Student(session)
        }
    }
}
