//! Transaction store using Apache OpenDAL.
//!
//! Transactions are JSON records in a key-value namespace. OpenDAL keeps the
//! backend swappable:
//! - In-memory (tests, throwaway runs)
//! - Local filesystem (development)
//! - S3-compatible: Cloudflare R2, AWS S3, MinIO
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    TransactionStore                      │
//! │        RwLock: many readers, one exclusive writer        │
//! ├──────────────────────────────────────────────────────────┤
//! │ save  -> op.write("{bucket}/{id}", json)                 │
//! │ find  -> op.read("{bucket}/{id}")                        │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod error;
mod service;

pub use error::StorageError;
pub use service::TransactionStore;
