use thiserror::Error;

use meetman_store::StoreError;

/// Errors that can occur while composing or delivering notifications.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A template placeholder had no value supplied. The templates are
    /// fixed at compile time, so this is a programming defect, never input.
    #[error("no value for template placeholder: ${placeholder}")]
    Template { placeholder: String },

    /// A stored email address does not parse as a mailbox.
    #[error("invalid mail address {address}: {reason}")]
    Address { address: String, reason: String },

    /// The relay rejected the message or was unreachable. The affected
    /// meeting stays unnotified and is retried on the next run.
    #[error("mail delivery failed: {0}")]
    Delivery(String),

    /// A stored timestamp is outside the representable instant range.
    #[error("meeting {meeting_id} has an unrepresentable timestamp")]
    Timestamp { meeting_id: i64 },

    /// A store read or write failed underneath the composer.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, NotifyError>;
