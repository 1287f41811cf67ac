//! iCalendar (RFC 5545) invite rendering.
//!
//! Hand-rolled: one VCALENDAR with a single VEVENT is all that is ever
//! produced, so a full ical library buys nothing. Covers the parts of the
//! format the payload touches: CRLF line endings, TEXT escaping, and
//! 75-octet line folding.

use chrono::{DateTime, Utc};

pub const PRODID: &str = "-//meetman//MeetingsManager//EN";
pub const ICAL_VERSION: &str = "2.0";
pub const PRIORITY: u8 = 5;

/// Fields of the calendar invite attached to every invitation mail.
#[derive(Debug, Clone)]
pub struct CalendarInvite {
    pub uid: String,
    pub summary: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub organizer_email: String,
    pub attendee_emails: Vec<String>,
}

impl CalendarInvite {
    /// Render to transport encoding: CRLF-separated, escaped, folded.
    pub fn to_ics(&self) -> String {
        let mut lines: Vec<String> = vec![
            "BEGIN:VCALENDAR".into(),
            format!("PRODID:{PRODID}"),
            format!("VERSION:{ICAL_VERSION}"),
            "BEGIN:VEVENT".into(),
            format!("UID:{}", escape_text(&self.uid)),
            format!("SUMMARY:{}", escape_text(&self.summary)),
            format!("DTSTART:{}", format_utc(self.starts_at)),
            format!("DTEND:{}", format_utc(self.ends_at)),
            format!("DTSTAMP:{}", format_utc(self.created_at)),
            format!("PRIORITY:{PRIORITY}"),
            format!("DESCRIPTION:{}", escape_text(&self.description)),
            format!("ORGANIZER:MAILTO:{}", self.organizer_email),
        ];
        for email in &self.attendee_emails {
            lines.push(format!("ATTENDEE:MAILTO:{email}"));
        }
        lines.push("END:VEVENT".into());
        lines.push("END:VCALENDAR".into());

        let mut out = String::new();
        for line in lines {
            out.push_str(&fold(&line));
            out.push_str("\r\n");
        }
        out
    }
}

/// UTC instant in basic format, e.g. `20260826T143000Z`.
fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// RFC 5545 §3.3.11 TEXT escaping.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

/// RFC 5545 §3.1 line folding: no content line longer than 75 octets,
/// continuation lines start with a single space.
fn fold(line: &str) -> String {
    const LIMIT: usize = 75;
    if line.len() <= LIMIT {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + line.len() / LIMIT * 3);
    let mut budget = LIMIT;
    let mut used = 0;
    for c in line.chars() {
        let width = c.len_utf8();
        if used + width > budget {
            out.push_str("\r\n ");
            // Continuation lines carry the leading space within the limit.
            budget = LIMIT - 1;
            used = 0;
        }
        out.push(c);
        used += width;
    }
    out
}
