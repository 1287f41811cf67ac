//! Row-insert helpers shared by the store tests.

use rusqlite::Connection;

pub(crate) fn insert_participant(
    conn: &Connection,
    id: i64,
    uid: &str,
    email: &str,
    permanent: bool,
    external: bool,
    active: bool,
) {
    conn.execute(
        "INSERT INTO teilnehmer (id, uid, email, permanent, external, password, active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            id,
            uid,
            email,
            permanent as i64,
            external as i64,
            format!("pw-{id}"),
            active as i64
        ],
    )
    .expect("insert participant");
}

pub(crate) fn insert_meeting(
    conn: &Connection,
    id: i64,
    name: &str,
    starts_at_ms: i64,
    ends_at_ms: i64,
    organizer_id: i64,
    notified: bool,
) {
    conn.execute(
        "INSERT INTO meetings (id, name, beginn, ende, organisator_id, resource, url, password, notified)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            id,
            name,
            starts_at_ms,
            ends_at_ms,
            organizer_id,
            format!("room-{id}"),
            format!("https://conf.example.org/m{id}"),
            format!("meet-pw-{id}"),
            notified as i64
        ],
    )
    .expect("insert meeting");
}

pub(crate) fn insert_association(conn: &Connection, meeting_id: i64, participant_id: i64) {
    conn.execute(
        "INSERT INTO meeting_teilnehmer (meeting_id, teilnehmer_id) VALUES (?1, ?2)",
        rusqlite::params![meeting_id, participant_id],
    )
    .expect("insert association");
}

/// Epoch millis `days` whole days before now.
pub(crate) fn ms_days_ago(days: i64) -> i64 {
    chrono::Utc::now().timestamp_millis() - days * 86_400_000
}

/// Epoch millis `days` whole days after now.
pub(crate) fn ms_days_ahead(days: i64) -> i64 {
    chrono::Utc::now().timestamp_millis() + days * 86_400_000
}
