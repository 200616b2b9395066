mod override_store;

pub use override_store::{override_key, OverrideStore};
