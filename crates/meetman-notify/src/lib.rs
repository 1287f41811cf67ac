pub mod composer;
pub mod error;
pub mod invite;
pub mod mailer;
pub mod template;

pub use composer::{Notifier, NotifyOutcome};
pub use error::NotifyError;
pub use invite::CalendarInvite;
pub use mailer::{Mailer, OutboundMail, SmtpMailer};
