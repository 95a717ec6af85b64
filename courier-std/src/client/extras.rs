//! Side-channel values attached to a client.

use std::{any::Any, collections::HashMap, fmt, sync::Arc};

/// A shared, type-erased extra value.
pub type ExtraValue = Arc<dyn Any + Send + Sync>;

/// String-keyed values that middleware and callbacks share through a client.
///
/// Values are reference counted: cloning the map (or the client holding it)
/// copies the keys but shares the values.
#[derive(Clone, Default)]
pub struct Extras {
    values: HashMap<String, ExtraValue>,
}

impl Extras {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, returning the previous value.
    pub fn insert<V>(&mut self, key: impl Into<String>, value: V) -> Option<ExtraValue>
    where
        V: Any + Send + Sync,
    {
        self.values.insert(key.into(), Arc::new(value))
    }

    /// Store an already shared value under `key`.
    pub fn insert_shared(&mut self, key: impl Into<String>, value: ExtraValue) -> Option<ExtraValue> {
        self.values.insert(key.into(), value)
    }

    /// The value under `key`, if present and of type `V`.
    pub fn get<V>(&self, key: &str) -> Option<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        self.values
            .get(key)
            .and_then(|value| value.clone().downcast::<V>().ok())
    }

    /// The untyped value under `key`.
    pub fn get_shared(&self, key: &str) -> Option<&ExtraValue> {
        self.values.get(key)
    }

    /// Remove the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<ExtraValue> {
        self.values.remove(key)
    }

    /// Whether a value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate the keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Extras {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_lookup() {
        let mut extras = Extras::new();
        extras.insert("retries", 3u32);
        assert_eq!(extras.get::<u32>("retries").as_deref(), Some(&3));
        assert!(extras.get::<String>("retries").is_none());
        assert!(extras.get::<u32>("missing").is_none());
    }

    #[test]
    fn test_clone_shares_values() {
        let mut extras = Extras::new();
        extras.insert("token", String::from("secret"));
        let mut copy = extras.clone();
        copy.insert("other", 1u8);

        assert_eq!(extras.len(), 1);
        assert_eq!(copy.len(), 2);
        let original = extras.get_shared("token").unwrap();
        let copied = copy.get_shared("token").unwrap();
        assert!(Arc::ptr_eq(original, copied));
    }

    #[test]
    fn test_remove() {
        let mut extras = Extras::new();
        extras.insert("k", ());
        assert!(extras.contains("k"));
        assert!(extras.remove("k").is_some());
        assert!(extras.is_empty());
    }
}
