use crate::error::KVError;

/// KVStore is the persistence seam for the CRM: a flat string-keyed store
/// holding JSON-encoded values (`crm_users`, `crm_session`).
///
/// Implementations must survive whatever "profile" means for the deployment:
/// `RedbStore` persists across restarts, `MemoryStore` lives as long as the
/// process and backs tests.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, overwriting any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting an absent key is a no-op.
    fn delete(&self, key: &str) -> Result<(), KVError>;
}
