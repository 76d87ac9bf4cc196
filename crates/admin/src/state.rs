//! Application state shared across handlers.

use std::sync::Arc;

use tower_sessions::Session;

use crate::config::AdminConfig;
use crate::db::{InMemoryRepository, RecordRepository, SettingsStore, fixtures};
use crate::models::{Customer, InventoryItem, Order, Shipment, UserAccount, Warehouse};
use crate::services::{
    AuthProvider, PendingLogins, SessionState, SessionStore, StaticDirectory, TowerSessionSlot,
};

/// Session store bound to one browser session.
pub type BrowserSession = SessionStore<TowerSessionSlot, Arc<dyn AuthProvider>>;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Repositories live for the whole process and
/// are shared by every browser session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    directory: Arc<dyn AuthProvider>,
    pending_logins: PendingLogins,
    inventory: Box<dyn RecordRepository<InventoryItem>>,
    orders: Box<dyn RecordRepository<Order>>,
    warehouses: Box<dyn RecordRepository<Warehouse>>,
    customers: Box<dyn RecordRepository<Customer>>,
    shipments: Box<dyn RecordRepository<Shipment>>,
    users: Box<dyn RecordRepository<UserAccount>>,
    settings: SettingsStore,
}

impl AppState {
    /// State with the built-in account directory and fixture data.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        Self::with_directory(config, StaticDirectory::builtin())
    }

    /// State authenticating against `directory`.
    ///
    /// The user administration screen starts with one account per
    /// directory entry.
    #[must_use]
    pub fn with_directory(config: AdminConfig, directory: StaticDirectory) -> Self {
        let users = fixtures::user_accounts(&directory);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                directory: Arc::new(directory),
                pending_logins: PendingLogins::default(),
                inventory: Box::new(InMemoryRepository::new(fixtures::inventory())),
                orders: Box::new(InMemoryRepository::new(fixtures::orders())),
                warehouses: Box::new(InMemoryRepository::new(fixtures::warehouses())),
                customers: Box::new(InMemoryRepository::new(fixtures::customers())),
                shipments: Box::new(InMemoryRepository::new(fixtures::shipments())),
                users: Box::new(InMemoryRepository::new(users)),
                settings: SettingsStore::default(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Logins currently waiting out their delay.
    #[must_use]
    pub fn pending_logins(&self) -> &PendingLogins {
        &self.inner.pending_logins
    }

    #[must_use]
    pub fn inventory(&self) -> &dyn RecordRepository<InventoryItem> {
        self.inner.inventory.as_ref()
    }

    #[must_use]
    pub fn orders(&self) -> &dyn RecordRepository<Order> {
        self.inner.orders.as_ref()
    }

    #[must_use]
    pub fn warehouses(&self) -> &dyn RecordRepository<Warehouse> {
        self.inner.warehouses.as_ref()
    }

    #[must_use]
    pub fn customers(&self) -> &dyn RecordRepository<Customer> {
        self.inner.customers.as_ref()
    }

    #[must_use]
    pub fn shipments(&self) -> &dyn RecordRepository<Shipment> {
        self.inner.shipments.as_ref()
    }

    #[must_use]
    pub fn users(&self) -> &dyn RecordRepository<UserAccount> {
        self.inner.users.as_ref()
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.inner.settings
    }

    /// Company name for page chrome, falling back to the default.
    #[must_use]
    pub fn company_name(&self) -> String {
        self.settings()
            .get()
            .map(|s| s.company_name)
            .unwrap_or_default()
    }

    /// Session store over `session`, not yet restored.
    #[must_use]
    pub fn session_store(&self, session: Session) -> BrowserSession {
        SessionStore::new(
            TowerSessionSlot::new(session),
            Arc::clone(&self.inner.directory),
            self.inner.config.login_delay,
        )
    }

    /// The settled session for this request.
    ///
    /// While a login for the same browser session is waiting out its delay
    /// the session is reported as resolving.
    pub async fn current_session(&self, session: &Session) -> SessionState {
        let pending = session
            .id()
            .is_some_and(|id| self.pending_logins().contains(&id.to_string()));
        if pending {
            return SessionState::initial();
        }
        self.session_store(session.clone()).restore().await
    }
}
