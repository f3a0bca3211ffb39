pub mod store;
pub mod versioning;

pub use store::{StoreError, SummaryStore};
pub use versioning::{StoreFeatures, StoreFile, StoreRecord, STORE_FORMAT_VERSION};
