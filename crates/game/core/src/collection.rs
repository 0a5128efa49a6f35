//! Capacity-bounded collection with most-frequently-used eviction.
//!
//! The collection is the inverse of an LRU cache: when it is full, the entry
//! that has been used the most is the one that goes. Selection is a linear
//! scan over the entries in insertion order:
//!
//! - the candidate starts at the first entry
//! - a later entry replaces it only with a strictly greater `use_count`
//! - ties therefore keep the earliest-inserted entry
//!
//! The earliest-wins tie-break falls out of the strict comparison and is part
//! of the observable behaviour: a priority queue or a `>=` scan would evict a
//! different entry.

use crate::error::{ErrorSeverity, GameError};

/// A single tracked entry: a payload plus its cumulative use counter.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<T> {
    id: String,
    payload: T,
    use_count: u32,
}

impl<T> Entry<T> {
    fn new(id: String, payload: T) -> Self {
        Self {
            id,
            payload,
            use_count: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn use_count(&self) -> u32 {
        self.use_count
    }

    pub(crate) fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }
}

/// Errors returned by collection operations. All of them leave the collection untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("capacity must be at least 1, got {requested}")]
    InvalidCapacity { requested: usize },

    #[error("entry '{id}' is already present")]
    Duplicate { id: String },

    #[error("entry '{id}' not found")]
    NotFound { id: String },
}

impl GameError for CollectionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidCapacity { .. } => ErrorSeverity::Fatal,
            Self::Duplicate { .. } => ErrorSeverity::Validation,
            Self::NotFound { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCapacity { .. } => "COLLECTION_INVALID_CAPACITY",
            Self::Duplicate { .. } => "COLLECTION_DUPLICATE",
            Self::NotFound { .. } => "COLLECTION_NOT_FOUND",
        }
    }
}

/// Returns the index of the most frequently used element of `counts`.
///
/// Strictly-greater comparison: among equal maxima the first index wins.
/// Returns `None` for an empty sequence.
pub fn most_frequent_index<I>(counts: I) -> Option<usize>
where
    I: IntoIterator<Item = u32>,
{
    let mut counts = counts.into_iter().enumerate();
    let (mut best_index, mut best_count) = counts.next()?;

    for (index, count) in counts {
        if count > best_count {
            best_index = index;
            best_count = count;
        }
    }

    Some(best_index)
}

/// Result of a successful [`FrequencyBoundedCollection::add`].
#[derive(Debug)]
pub struct Admission<'a, T> {
    /// The entry that was just appended.
    pub added: &'a Entry<T>,
    /// The entry evicted to make room, if the collection was full.
    pub evicted: Option<Entry<T>>,
}

/// Ordered, capacity-bounded store that evicts its most used entry when full.
#[derive(Clone, Debug)]
pub struct FrequencyBoundedCollection<T> {
    capacity: usize,
    entries: Vec<Entry<T>>,
}

impl<T> FrequencyBoundedCollection<T> {
    pub fn new(capacity: usize) -> Result<Self, CollectionError> {
        if capacity == 0 {
            return Err(CollectionError::InvalidCapacity {
                requested: capacity,
            });
        }

        Ok(Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Entry<T>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Mutable access to a payload. The use counter stays untouched.
    pub fn payload_mut(&mut self, id: &str) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(Entry::payload_mut)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    /// Inserts a fresh entry with a zero use counter.
    ///
    /// When the collection is full the most frequently used entry is evicted
    /// first and handed back in [`Admission::evicted`]. A duplicate id fails
    /// before any eviction happens.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        payload: T,
    ) -> Result<Admission<'_, T>, CollectionError> {
        let id = id.into();
        if self.contains(&id) {
            return Err(CollectionError::Duplicate { id });
        }

        let evicted = if self.is_full() {
            self.evict_most_frequent()
        } else {
            None
        };

        let index = self.entries.len();
        self.entries.push(Entry::new(id, payload));

        Ok(Admission {
            added: &self.entries[index],
            evicted,
        })
    }

    /// Increments the use counter of `id` and returns the updated entry.
    pub fn record_use(&mut self, id: &str) -> Result<&mut Entry<T>, CollectionError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| CollectionError::NotFound { id: id.to_owned() })?;

        entry.use_count = entry.use_count.saturating_add(1);
        Ok(entry)
    }

    /// The entry that the next eviction would remove.
    pub fn most_frequent(&self) -> Option<&Entry<T>> {
        self.most_frequent_position()
            .map(|index| &self.entries[index])
    }

    /// Removes and returns the most frequently used entry, keeping the order
    /// of the remaining entries.
    pub fn evict_most_frequent(&mut self) -> Option<Entry<T>> {
        let index = self.most_frequent_position()?;
        Some(self.entries.remove(index))
    }

    /// Removes an entry by id, keeping the order of the remaining entries.
    pub fn remove(&mut self, id: &str) -> Option<Entry<T>> {
        let index = self.position(id)?;
        Some(self.entries.remove(index))
    }

    pub fn snapshot(&self) -> Vec<Entry<T>>
    where
        T: Clone,
    {
        self.entries.clone()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn most_frequent_position(&self) -> Option<usize> {
        most_frequent_index(self.entries.iter().map(|entry| entry.use_count))
    }
}
