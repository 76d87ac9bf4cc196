//! Record storage for the console.
//!
//! Every record kind is served through [`RecordRepository`], so screens never
//! know where their rows come from. The only implementation today is
//! [`InMemoryRepository`], seeded from [`fixtures`] when the application
//! starts and living for the lifetime of the process.
//!
//! # Identifiers
//!
//! Each kind formats its sequence numbers differently:
//!
//! | Kind       | Format    |
//! |------------|-----------|
//! | inventory  | `001`     |
//! | orders     | `ORD-001` |
//! | warehouses | `WH-001`  |
//! | customers  | `1`       |
//! | shipments  | `1`       |
//! | users      | `1`       |

pub mod fixtures;
pub mod settings;

use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

pub use settings::{GeneralSettings, SettingsStore};

/// Errors that can occur during repository operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// Requested record was not found.
    #[error("not found")]
    NotFound,

    /// Unique field already used by another record (e.g., tracking number).
    #[error("{field} already in use: {value}")]
    Conflict {
        /// Form field name of the unique value.
        field: &'static str,
        /// The duplicated value.
        value: String,
    },

    /// A writer panicked while holding the lock.
    #[error("repository lock poisoned")]
    Poisoned,
}

/// A row type that can be stored in a repository.
pub trait Record: Clone + Send + Sync + 'static {
    /// Typed identifier.
    type Id: Clone + Eq + fmt::Display + From<String> + AsRef<str> + Send + Sync;

    /// Human name of the kind, used in log lines (e.g., "order").
    const KIND: &'static str;

    /// Prefix placed before the sequence number.
    const ID_PREFIX: &'static str = "";

    /// Zero-padded width of the sequence number; 0 means no padding.
    const ID_WIDTH: usize = 0;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;

    /// Replace the identifier.
    #[must_use]
    fn with_id(self, id: Self::Id) -> Self;

    /// Field name and value that must be unique across the repository.
    fn unique_key(&self) -> Option<(&'static str, String)> {
        None
    }
}

/// Format a sequence number as an identifier of `R`.
#[must_use]
pub fn format_id<R: Record>(sequence: u64) -> R::Id {
    R::Id::from(format!(
        "{}{:0width$}",
        R::ID_PREFIX,
        sequence,
        width = R::ID_WIDTH
    ))
}

/// Extract the sequence number from an identifier of `R`.
#[must_use]
pub fn id_sequence<R: Record>(id: &R::Id) -> Option<u64> {
    id.as_ref().strip_prefix(R::ID_PREFIX)?.parse().ok()
}

/// Storage for one record kind.
pub trait RecordRepository<R: Record>: Send + Sync {
    /// All records in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Poisoned` if the store is unusable.
    fn list(&self) -> Result<Vec<R>, RepositoryError>;

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has this id.
    fn get(&self, id: &R::Id) -> Result<R, RepositoryError>;

    /// Store a new record, assigning it the next identifier.
    ///
    /// The draft's own id is ignored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a unique field is taken.
    fn create(&self, draft: R) -> Result<R, RepositoryError>;

    /// Replace an existing record, keeping its identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` or `RepositoryError::Conflict`.
    fn update(&self, id: &R::Id, record: R) -> Result<R, RepositoryError>;

    /// Remove a record, returning it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has this id.
    fn delete(&self, id: &R::Id) -> Result<R, RepositoryError>;
}

struct Table<R> {
    rows: Vec<R>,
    next_sequence: u64,
}

/// Lock-protected in-memory repository.
pub struct InMemoryRepository<R: Record> {
    table: RwLock<Table<R>>,
}

impl<R: Record> InMemoryRepository<R> {
    /// Create a repository holding `seed`.
    ///
    /// New records continue numbering after the highest seeded sequence.
    #[must_use]
    pub fn new(seed: Vec<R>) -> Self {
        let highest = seed
            .iter()
            .filter_map(|r| id_sequence::<R>(r.id()))
            .max()
            .unwrap_or(0);

        Self {
            table: RwLock::new(Table {
                rows: seed,
                next_sequence: highest + 1,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table<R>>, RepositoryError> {
        self.table.read().map_err(|_| RepositoryError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table<R>>, RepositoryError> {
        self.table.write().map_err(|_| RepositoryError::Poisoned)
    }
}

impl<R: Record> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Reject `candidate` if another row (other than `skip`) shares its unique key.
fn check_unique<R: Record>(
    rows: &[R],
    candidate: &R,
    skip: Option<&R::Id>,
) -> Result<(), RepositoryError> {
    let Some((field, value)) = candidate.unique_key() else {
        return Ok(());
    };

    let taken = rows
        .iter()
        .filter(|row| skip != Some(row.id()))
        .filter_map(R::unique_key)
        .any(|(_, existing)| existing.eq_ignore_ascii_case(&value));

    if taken {
        Err(RepositoryError::Conflict { field, value })
    } else {
        Ok(())
    }
}

impl<R: Record> RecordRepository<R> for InMemoryRepository<R> {
    fn list(&self) -> Result<Vec<R>, RepositoryError> {
        Ok(self.read()?.rows.clone())
    }

    fn get(&self, id: &R::Id) -> Result<R, RepositoryError> {
        self.read()?
            .rows
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    fn create(&self, draft: R) -> Result<R, RepositoryError> {
        let mut table = self.write()?;
        check_unique(&table.rows, &draft, None)?;

        let record = draft.with_id(format_id::<R>(table.next_sequence));
        table.next_sequence += 1;
        table.rows.push(record.clone());

        tracing::debug!(kind = R::KIND, id = %record.id(), "record created");
        Ok(record)
    }

    fn update(&self, id: &R::Id, record: R) -> Result<R, RepositoryError> {
        let mut table = self.write()?;
        if !table.rows.iter().any(|row| row.id() == id) {
            return Err(RepositoryError::NotFound);
        }
        check_unique(&table.rows, &record, Some(id))?;

        let record = record.with_id(id.clone());
        let slot = table
            .rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = record.clone();

        tracing::debug!(kind = R::KIND, %id, "record updated");
        Ok(record)
    }

    fn delete(&self, id: &R::Id) -> Result<R, RepositoryError> {
        let mut table = self.write()?;
        let position = table
            .rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or(RepositoryError::NotFound)?;

        tracing::debug!(kind = R::KIND, %id, "record deleted");
        Ok(table.rows.remove(position))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ims_core::OrderId;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Ticket {
        id: OrderId,
        code: String,
    }

    impl Record for Ticket {
        type Id = OrderId;
        const KIND: &'static str = "ticket";
        const ID_PREFIX: &'static str = "T-";
        const ID_WIDTH: usize = 3;

        fn id(&self) -> &OrderId {
            &self.id
        }

        fn with_id(self, id: OrderId) -> Self {
            Self { id, ..self }
        }

        fn unique_key(&self) -> Option<(&'static str, String)> {
            Some(("code", self.code.clone()))
        }
    }

    fn ticket(id: &str, code: &str) -> Ticket {
        Ticket {
            id: OrderId::new(id),
            code: code.to_string(),
        }
    }

    fn repo() -> InMemoryRepository<Ticket> {
        InMemoryRepository::new(vec![ticket("T-001", "alpha"), ticket("T-007", "beta")])
    }

    #[test]
    fn test_format_and_parse_ids() {
        assert_eq!(format_id::<Ticket>(12).as_str(), "T-012");
        assert_eq!(id_sequence::<Ticket>(&OrderId::new("T-042")), Some(42));
        assert_eq!(id_sequence::<Ticket>(&OrderId::new("X-042")), None);
    }

    #[test]
    fn test_create_continues_after_highest_seed() {
        let repo = repo();
        let created = repo.create(ticket("", "gamma")).unwrap();
        assert_eq!(created.id.as_str(), "T-008");
        assert_eq!(repo.list().unwrap().len(), 3);
        assert_eq!(repo.get(&OrderId::new("T-008")).unwrap(), created);
    }

    #[test]
    fn test_create_rejects_duplicate_unique_key() {
        let repo = repo();
        let err = repo.create(ticket("", "ALPHA")).unwrap_err();
        assert_eq!(
            err,
            RepositoryError::Conflict {
                field: "code",
                value: "ALPHA".to_string()
            }
        );
        assert_eq!(repo.list().unwrap().len(), 2);
    }

    #[test]
    fn test_update_keeps_id_and_allows_own_key() {
        let repo = repo();
        let id = OrderId::new("T-001");
        let updated = repo.update(&id, ticket("ignored", "alpha")).unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(repo.get(&id).unwrap(), updated);

        let err = repo.update(&id, ticket("", "beta")).unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));
    }

    #[test]
    fn test_missing_records() {
        let repo = repo();
        let missing = OrderId::new("T-999");
        assert_eq!(repo.get(&missing).unwrap_err(), RepositoryError::NotFound);
        assert_eq!(
            repo.update(&missing, ticket("", "z")).unwrap_err(),
            RepositoryError::NotFound
        );
        assert_eq!(repo.delete(&missing).unwrap_err(), RepositoryError::NotFound);
    }

    #[test]
    fn test_delete_preserves_order_of_remaining_rows() {
        let repo = InMemoryRepository::new(vec![
            ticket("T-001", "a"),
            ticket("T-002", "b"),
            ticket("T-003", "c"),
        ]);
        repo.delete(&OrderId::new("T-002")).unwrap();
        let codes: Vec<_> = repo.list().unwrap().into_iter().map(|t| t.code).collect();
        assert_eq!(codes, ["a", "c"]);
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let repo = repo();
        repo.delete(&OrderId::new("T-007")).unwrap();
        let created = repo.create(ticket("", "delta")).unwrap();
        assert_eq!(created.id.as_str(), "T-008");
    }
}
