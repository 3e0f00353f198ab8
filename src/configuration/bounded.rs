use serde::Serialize;
use thiserror::Error;


/// Maximum number of entries a multi-valued configuration keyword
/// (e.g. `mask_host`) may hold.
pub const CONFIGURATION_STRING_LIST_CAPACITY: usize = 128;


/// Returned when appending to a [`BoundedStringList`] that is already full.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("string list is full (capacity is {capacity})")]
pub struct CapacityExceeded {
    pub capacity: usize,
}


/// An append-only, ordered list of owned strings with a fixed capacity.
///
/// Appends past the capacity are rejected; existing entries are never
/// truncated or overwritten.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[serde(transparent)]
pub struct BoundedStringList {
    entries: Vec<String>,

    #[serde(skip)]
    capacity: usize,
}

impl BoundedStringList {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Append `value` to the end of the list, or return [`CapacityExceeded`]
    /// without touching the list if it is already full.
    pub fn try_push<S>(&mut self, value: S) -> Result<(), CapacityExceeded>
    where
        S: Into<String>,
    {
        if self.is_full() {
            return Err(CapacityExceeded {
                capacity: self.capacity,
            });
        }

        self.entries.push(value.into());
        Ok(())
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }
}

impl Default for BoundedStringList {
    fn default() -> Self {
        Self::new(CONFIGURATION_STRING_LIST_CAPACITY)
    }
}
