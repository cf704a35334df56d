pub mod board_storage;
pub mod keys;
pub mod store;
pub mod traits;

pub use board_storage::BoardStorage;
pub use keys::StorageKey;
pub use store::*;
pub use traits::*;
