pub mod error;
pub mod record;
pub mod schema;
pub mod store;

pub use error::{Result, StoreError};
pub use record::{CompatibilityRecord, canonical_pair};
pub use store::Store;
