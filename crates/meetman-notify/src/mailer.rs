use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::{Message, SmtpTransport, Transport};
use tracing::debug;

use crate::error::{NotifyError, Result};

/// Name of the calendar attachment on every invitation mail.
pub const ATTACHMENT_NAME: &str = "Meeting.ics";

/// One fully-composed outbound message.
#[derive(Debug, Clone)]
pub struct OutboundMail {
    pub to: String,
    pub subject: String,
    /// Plain-text UTF-8 body.
    pub body: String,
    /// Rendered iCalendar payload, attached as [`ATTACHMENT_NAME`].
    pub calendar_payload: String,
}

/// Transport seam. Production uses [`SmtpMailer`]; tests record sends.
pub trait Mailer {
    fn send(&self, mail: &OutboundMail) -> Result<()>;
}

/// Delivers via a plain SMTP relay — no TLS, no auth. The relay is expected
/// to be a trusted local MTA that handles onward routing.
pub struct SmtpMailer {
    transport: SmtpTransport,
    sender: String,
}

impl SmtpMailer {
    pub fn new(relay_host: &str, relay_port: u16, sender: &str) -> Self {
        let transport = SmtpTransport::builder_dangerous(relay_host)
            .port(relay_port)
            .build();
        Self {
            transport,
            sender: sender.to_string(),
        }
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, mail: &OutboundMail) -> Result<()> {
        let message = Message::builder()
            .from(parse_mailbox(&self.sender)?)
            .to(parse_mailbox(&mail.to)?)
            .subject(mail.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(mail.body.clone()),
                    )
                    .singlepart(
                        Attachment::new(ATTACHMENT_NAME.to_string()).body(
                            mail.calendar_payload.clone(),
                            "text/calendar; charset=utf-8"
                                .parse::<ContentType>()
                                .map_err(|e| NotifyError::Delivery(e.to_string()))?,
                        ),
                    ),
            )
            .map_err(|e| NotifyError::Delivery(format!("message build failed: {e}")))?;

        self.transport
            .send(&message)
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;
        debug!(to = %mail.to, subject = %mail.subject, "mail delivered to relay");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address.parse().map_err(|e| NotifyError::Address {
        address: address.to_string(),
        reason: format!("{e}"),
    })
}
