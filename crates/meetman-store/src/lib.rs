pub mod db;
pub mod error;
pub mod meetings;
pub mod participants;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::StoreError;
pub use types::{Meeting, Participant};
