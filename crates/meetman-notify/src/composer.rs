use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use rusqlite::Connection;
use tracing::{info, warn};

use meetman_store::types::Meeting;
use meetman_store::{meetings, participants};

use crate::error::{NotifyError, Result};
use crate::invite::CalendarInvite;
use crate::mailer::{Mailer, OutboundMail};
use crate::template::{Template, ATTENDEE_TEMPLATE, ORGANIZER_TEMPLATE};

pub const ATTENDEE_SUBJECT: &str = "Invitation to a videoconference";
pub const ORGANIZER_SUBJECT: &str = "Videoconference organizer";

/// Result of one notification pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotifyOutcome {
    /// Meetings fully delivered and marked notified.
    pub notified: usize,
    /// Meetings that hit a send or lookup failure and stay unsent.
    pub failed: usize,
}

/// Composes and delivers invitation mails for unsent meetings.
pub struct Notifier<M: Mailer> {
    mailer: M,
    tz: Tz,
}

impl<M: Mailer> Notifier<M> {
    pub fn new(mailer: M, tz: Tz) -> Self {
        Self { mailer, tz }
    }

    /// Process every meeting with notified=0.
    ///
    /// A failure is scoped to its meeting: the meeting stays unsent for the
    /// next run and the pass continues. Attendee mails already sent before a
    /// later send fails are not recalled, so delivery is at-least-once.
    pub fn send_unsent(&self, conn: &Connection) -> Result<NotifyOutcome> {
        let unsent = meetings::unsent_meetings(conn)?;
        let mut outcome = NotifyOutcome::default();
        for meeting in &unsent {
            match self.notify_meeting(conn, meeting) {
                Ok(()) => outcome.notified += 1,
                Err(e) => {
                    warn!(meeting_id = meeting.id, error = %e, "notification failed, meeting stays unsent");
                    outcome.failed += 1;
                }
            }
        }
        Ok(outcome)
    }

    fn notify_meeting(&self, conn: &Connection, meeting: &Meeting) -> Result<()> {
        let organizer = participants::get_by_id(conn, meeting.organizer_id)?;
        let attendees = participants::attendees_for_meeting(conn, meeting.id)?;

        let starts_at = instant(meeting.starts_at_ms, meeting.id)?;
        let ends_at = instant(meeting.ends_at_ms, meeting.id)?;
        // Human-facing date in the configured timezone; calendar fields stay UTC.
        let date = starts_at
            .with_timezone(&self.tz)
            .format("%d.%m.%Y")
            .to_string();

        let invite = CalendarInvite {
            uid: format!("meeting-{}@meetman", meeting.id),
            summary: format!("Videoconference {}", meeting.name),
            starts_at,
            ends_at,
            created_at: Utc::now(),
            description: format!(
                "You have been invited by {} to a videoconference on {}.\n\
                 To join the conference, please follow this link:\n {}",
                organizer.email, date, meeting.url
            ),
            organizer_email: organizer.email.clone(),
            attendee_emails: attendees.iter().map(|a| a.email.clone()).collect(),
        };
        let payload = invite.to_ics();

        let attendee_body = Template::new(ATTENDEE_TEMPLATE).render(&[
            ("organizer_email", organizer.email.as_str()),
            ("date", date.as_str()),
            ("url", meeting.url.as_str()),
        ])?;
        for attendee in &attendees {
            self.mailer.send(&OutboundMail {
                to: attendee.email.clone(),
                subject: ATTENDEE_SUBJECT.to_string(),
                body: attendee_body.clone(),
                calendar_payload: payload.clone(),
            })?;
        }

        let organizer_body = Template::new(ORGANIZER_TEMPLATE).render(&[
            ("date", date.as_str()),
            ("url", meeting.url.as_str()),
            ("organizer_uid", organizer.uid.as_str()),
            ("organizer_password", organizer.password.as_str()),
            ("meeting_password", meeting.password.as_str()),
        ])?;
        self.mailer.send(&OutboundMail {
            to: organizer.email.clone(),
            subject: ORGANIZER_SUBJECT.to_string(),
            body: organizer_body,
            calendar_payload: payload,
        })?;

        meetings::mark_notified(conn, meeting.id)?;
        info!(
            meeting_id = meeting.id,
            attendees = attendees.len(),
            "meeting notified"
        );
        Ok(())
    }
}

fn instant(epoch_ms: i64, meeting_id: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(epoch_ms)
        .single()
        .ok_or(NotifyError::Timestamp { meeting_id })
}
