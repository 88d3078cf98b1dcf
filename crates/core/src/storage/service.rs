//! Transaction store implementation using Apache OpenDAL.

use async_trait::async_trait;
use opendal::{ErrorKind, Operator, services};
use purchasefx_shared::config::{StorageConfig, StorageProvider};
use purchasefx_shared::types::TransactionId;
use tokio::sync::RwLock;
use tracing::error;

use super::error::StorageError;
use crate::reconciliation::ports::TransactionRepository;
use crate::transaction::Transaction;

/// Key-value store for transactions.
///
/// Writers are exclusive with each other and with readers. The lock guards
/// the whole store, not individual keys.
pub struct TransactionStore {
    operator: Operator,
    bucket: String,
    provider: &'static str,
    lock: RwLock<()>,
}

impl TransactionStore {
    /// Create a new transaction store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket name is unusable or the storage
    /// provider cannot be initialized.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let bucket = validate_bucket(&config.bucket)?;
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self {
            operator,
            bucket,
            provider: config.provider.name(),
            lock: RwLock::new(()),
        })
    }

    /// In-memory store with the default bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory backend cannot be built.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::from_config(&StorageConfig::in_memory())
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::Memory => Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish(),
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
        };
        Ok(operator)
    }

    /// Storage key for a transaction.
    ///
    /// Format: `{bucket}/{id}`
    #[must_use]
    pub fn storage_key(&self, id: TransactionId) -> String {
        format!("{}/{}", self.bucket, id)
    }

    /// Get the storage provider name.
    #[must_use]
    pub const fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Get the key namespace.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl TransactionRepository for TransactionStore {
    async fn save_transaction(&self, transaction: &Transaction) -> Result<(), StorageError> {
        let key = self.storage_key(transaction.id());
        let record = serde_json::to_vec(transaction)?;

        let _guard = self.lock.write().await;
        self.operator.write(&key, record).await.map_err(|e| {
            error!(error = %e, key = %key, "failed to write transaction");
            StorageError::from(e)
        })?;
        Ok(())
    }

    async fn find_transaction(&self, id: TransactionId) -> Result<Transaction, StorageError> {
        let key = self.storage_key(id);

        let record = {
            let _guard = self.lock.read().await;
            match self.operator.read(&key).await {
                Ok(buffer) => buffer.to_vec(),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(StorageError::TransactionNotFound(id));
                }
                Err(e) => {
                    error!(error = %e, key = %key, "failed to read transaction");
                    return Err(e.into());
                }
            }
        };

        Ok(serde_json::from_slice(&record)?)
    }
}

/// Bucket becomes the first path segment, so it must be a single segment.
fn validate_bucket(bucket: &str) -> Result<String, StorageError> {
    let bucket = bucket.trim();
    if bucket.is_empty() || bucket.contains('/') {
        return Err(StorageError::InvalidBucket(bucket.to_string()));
    }
    Ok(bucket.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn sample(description: &str) -> Transaction {
        let ts = Utc.with_ymd_and_hms(2023, 11, 6, 15, 4, 5).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Transaction::new_at(description, ts, dec!(28.75), now).unwrap()
    }

    #[test]
    fn test_storage_key_format() {
        let store = TransactionStore::in_memory().expect("should create store");
        let id: TransactionId = "0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b".parse().unwrap();

        assert_eq!(
            store.storage_key(id),
            "transactions/0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b"
        );
        assert_eq!(store.provider_name(), "memory");
    }

    #[test]
    fn test_invalid_bucket_rejected() {
        for bucket in ["", "   ", "a/b"] {
            let config = StorageConfig::in_memory().with_bucket(bucket);
            let err = TransactionStore::from_config(&config).err().unwrap();
            assert!(matches!(err, StorageError::InvalidBucket(_)));
        }
    }

    #[tokio::test]
    async fn test_save_then_find_round_trip() {
        let store = TransactionStore::in_memory().unwrap();
        let tx = sample("Sample");

        store.save_transaction(&tx).await.unwrap();
        let found = store.find_transaction(tx.id()).await.unwrap();

        assert_eq!(found, tx);
    }

    #[tokio::test]
    async fn test_find_unknown_id_is_not_found() {
        let store = TransactionStore::in_memory().unwrap();
        let id = TransactionId::new();

        let err = store.find_transaction(id).await.unwrap_err();

        assert!(matches!(err, StorageError::TransactionNotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_buckets_are_separate_namespaces() {
        let root = std::env::temp_dir().join(format!("purchasefx-buckets-{}", TransactionId::new()));
        let provider = StorageProvider::local_fs(&root);
        let tx = sample("Sample");

        let store = TransactionStore::from_config(&StorageConfig::new(provider.clone())).unwrap();
        store.save_transaction(&tx).await.unwrap();

        let archive =
            TransactionStore::from_config(&StorageConfig::new(provider).with_bucket("archive")).unwrap();
        assert!(matches!(
            archive.find_transaction(tx.id()).await,
            Err(StorageError::TransactionNotFound(_))
        ));
        assert_eq!(store.find_transaction(tx.id()).await.unwrap(), tx);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_corrupt_record_is_serialization_error() {
        let store = TransactionStore::in_memory().unwrap();
        let id = TransactionId::new();
        store
            .operator
            .write(&store.storage_key(id), b"{not json".to_vec())
            .await
            .unwrap();

        let err = store.find_transaction(id).await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_concurrent_writers_and_readers() {
        let store = Arc::new(TransactionStore::in_memory().unwrap());
        let transactions: Vec<Transaction> = (0..16).map(|i| sample(&format!("Purchase {i}"))).collect();

        let mut handles = Vec::new();
        for tx in transactions.clone() {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.save_transaction(&tx).await.unwrap();
                store.find_transaction(tx.id()).await.unwrap()
            }));
        }

        for (handle, tx) in handles.into_iter().zip(&transactions) {
            assert_eq!(&handle.await.unwrap(), tx);
        }
    }

    #[tokio::test]
    async fn test_local_fs_backend_persists_records() {
        let root = std::env::temp_dir().join(format!("purchasefx-store-{}", TransactionId::new()));
        let config = StorageConfig::new(StorageProvider::local_fs(&root));
        let tx = sample("On disk");

        {
            let store = TransactionStore::from_config(&config).unwrap();
            store.save_transaction(&tx).await.unwrap();
        }

        let reopened = TransactionStore::from_config(&config).unwrap();
        assert_eq!(reopened.find_transaction(tx.id()).await.unwrap(), tx);

        let _ = std::fs::remove_dir_all(&root);
    }
}
