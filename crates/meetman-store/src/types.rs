use serde::{Deserialize, Serialize};

/// A scheduled videoconference, one row in `meetings`.
///
/// `starts_at_ms` / `ends_at_ms` are epoch milliseconds stored without a
/// timezone. Expiry comparisons interpret them in the configured local
/// timezone; calendar fields interpret them as UTC instants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    pub name: String,
    pub starts_at_ms: i64,
    pub ends_at_ms: i64,
    /// References `teilnehmer.id`; the organizer is always an internal
    /// participant.
    pub organizer_id: i64,
    pub resource: String,
    pub url: String,
    pub password: String,
    /// Set once invitation delivery for this meeting has fully succeeded.
    pub notified: bool,
}

/// A participant account, one row in `teilnehmer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    /// Login for the conference service, valid on the meeting date only.
    pub uid: String,
    pub email: String,
    /// Exempt from automatic deactivation.
    pub permanent: bool,
    /// Provisioned only while at least one meeting references it.
    pub external: bool,
    pub password: String,
    pub active: bool,
}

/// Column list shared by every meeting SELECT in this crate.
pub(crate) const MEETING_COLUMNS: &str =
    "id, name, beginn, ende, organisator_id, resource, url, password, notified";

/// Map a SELECT row (column order from MEETING_COLUMNS) to a Meeting.
pub(crate) fn row_to_meeting(row: &rusqlite::Row<'_>) -> rusqlite::Result<Meeting> {
    Ok(Meeting {
        id: row.get(0)?,
        name: row.get(1)?,
        starts_at_ms: row.get(2)?,
        ends_at_ms: row.get(3)?,
        organizer_id: row.get(4)?,
        resource: row.get(5)?,
        url: row.get(6)?,
        password: row.get(7)?,
        notified: row.get::<_, i64>(8)? != 0,
    })
}

pub(crate) const PARTICIPANT_COLUMNS: &str =
    "id, uid, email, permanent, external, password, active";

pub(crate) fn row_to_participant(row: &rusqlite::Row<'_>) -> rusqlite::Result<Participant> {
    Ok(Participant {
        id: row.get(0)?,
        uid: row.get(1)?,
        email: row.get(2)?,
        permanent: row.get::<_, i64>(3)? != 0,
        external: row.get::<_, i64>(4)? != 0,
        password: row.get(5)?,
        active: row.get::<_, i64>(6)? != 0,
    })
}
