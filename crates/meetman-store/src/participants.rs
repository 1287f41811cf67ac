use rusqlite::Connection;

use crate::error::{Result, StoreError};
use crate::types::{row_to_participant, Participant, PARTICIPANT_COLUMNS};

/// Look up a single participant. Exactly one row is expected; zero rows is
/// a data-integrity fault surfaced as `ParticipantNotFound`.
pub fn get_by_id(conn: &Connection, id: i64) -> Result<Participant> {
    match conn.query_row(
        &format!("SELECT {PARTICIPANT_COLUMNS} FROM teilnehmer WHERE id = ?1"),
        rusqlite::params![id],
        row_to_participant,
    ) {
        Ok(p) => Ok(p),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::ParticipantNotFound { id }),
        Err(e) => Err(StoreError::Database(e)),
    }
}

/// List a meeting's attendees, ordered by id. The organizer is linked via
/// `meetings.organisator_id`, not the association table, so it never appears
/// here. A meeting with no attendees yields an empty vec.
pub fn attendees_for_meeting(conn: &Connection, meeting_id: i64) -> Result<Vec<Participant>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PARTICIPANT_COLUMNS} FROM teilnehmer
         WHERE id IN (SELECT teilnehmer_id FROM meeting_teilnehmer WHERE meeting_id = ?1)
         ORDER BY id"
    ))?;
    let rows = stmt.query_map(rusqlite::params![meeting_id], row_to_participant)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(StoreError::Database)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::test_support::{insert_association, insert_participant};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("open");
        init_db(&conn).expect("init");
        conn
    }

    #[test]
    fn get_by_id_returns_row() {
        let conn = test_conn();
        insert_participant(&conn, 7, "vc-user-7", "alice@example.org", false, false, true);
        let p = get_by_id(&conn, 7).expect("lookup");
        assert_eq!(p.uid, "vc-user-7");
        assert_eq!(p.email, "alice@example.org");
        assert!(p.active);
        assert!(!p.external);
    }

    #[test]
    fn get_by_id_missing_is_not_found() {
        let conn = test_conn();
        let err = get_by_id(&conn, 99).unwrap_err();
        assert!(matches!(err, StoreError::ParticipantNotFound { id: 99 }));
    }

    #[test]
    fn attendees_exclude_organizer_and_are_ordered() {
        let conn = test_conn();
        insert_participant(&conn, 1, "org", "org@example.org", false, false, true);
        insert_participant(&conn, 3, "b", "b@example.org", false, true, true);
        insert_participant(&conn, 2, "a", "a@example.org", false, true, true);
        insert_association(&conn, 10, 3);
        insert_association(&conn, 10, 2);

        let attendees = attendees_for_meeting(&conn, 10).expect("list");
        let ids: Vec<i64> = attendees.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn no_attendees_is_empty_not_error() {
        let conn = test_conn();
        let attendees = attendees_for_meeting(&conn, 42).expect("list");
        assert!(attendees.is_empty());
    }
}
