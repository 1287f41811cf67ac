use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::types::{row_to_meeting, Meeting, MEETING_COLUMNS};

/// Calendar date of an epoch-millis instant in `tz`.
///
/// Returns `None` only for instants outside chrono's representable range,
/// which a well-formed store never contains.
pub fn local_date(starts_at_ms: i64, tz: Tz) -> Option<NaiveDate> {
    Utc.timestamp_millis_opt(starts_at_ms)
        .single()
        .map(|dt| dt.with_timezone(&tz).date_naive())
}

/// All meetings that have not yet been notified, in store order.
pub fn unsent_meetings(conn: &Connection) -> Result<Vec<Meeting>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEETING_COLUMNS} FROM meetings WHERE notified = 0"
    ))?;
    let rows = stmt.query_map([], row_to_meeting)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Record that invitation delivery for a meeting has completed.
///
/// Idempotent at the storage level; the notification pass calls it once per
/// successful round.
pub fn mark_notified(conn: &Connection, meeting_id: i64) -> Result<()> {
    conn.execute(
        "UPDATE meetings SET notified = 1 WHERE id = ?1",
        rusqlite::params![meeting_id],
    )?;
    debug!(meeting_id, "marked notified");
    Ok(())
}

/// Delete every meeting whose start date in `tz` is strictly before today,
/// cascading to its dependents. Returns the number of meetings purged.
///
/// Per meeting, in one transaction: the meeting row goes, external attendees
/// linked through no other meeting go, the internal organizer is set
/// inactive unless permanent, and the meeting's association rows go. A crash between meetings
/// leaves earlier ones fully cleaned and later ones untouched.
pub fn purge_expired(conn: &mut Connection, tz: Tz) -> Result<usize> {
    let today = Utc::now().with_timezone(&tz).date_naive();

    let expired: Vec<(i64, i64)> = {
        let mut stmt = conn.prepare("SELECT id, beginn, organisator_id FROM meetings")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .filter(|&(_, starts_at_ms, _)| match local_date(starts_at_ms, tz) {
                Some(date) => date < today,
                None => {
                    warn!(starts_at_ms, "meeting start outside representable range, skipping");
                    false
                }
            })
            .map(|(id, _, organizer_id)| (id, organizer_id))
            .collect()
    };

    for &(meeting_id, organizer_id) in &expired {
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM meetings WHERE id = ?1",
            rusqlite::params![meeting_id],
        )?;
        // External attendees provisioned for this meeting alone.
        tx.execute(
            "DELETE FROM teilnehmer WHERE external = 1
               AND id IN (SELECT teilnehmer_id FROM meeting_teilnehmer WHERE meeting_id = ?1)
               AND id NOT IN (SELECT teilnehmer_id FROM meeting_teilnehmer WHERE meeting_id <> ?1)",
            rusqlite::params![meeting_id],
        )?;
        // Redundant with deactivate_idle_organizers, which recomputes from
        // the surviving meetings at the end of the pass. Kept so a pass that
        // aborts before that step still deactivates this organizer.
        tx.execute(
            "UPDATE teilnehmer SET active = 0
             WHERE external = 0 AND permanent = 0 AND id = ?1",
            rusqlite::params![organizer_id],
        )?;
        tx.execute(
            "DELETE FROM meeting_teilnehmer WHERE meeting_id = ?1",
            rusqlite::params![meeting_id],
        )?;
        tx.commit()?;
        info!(meeting_id, "purged expired meeting");
    }

    Ok(expired.len())
}

/// Delete external participants referenced by zero association rows.
///
/// Runs after `purge_expired`: meeting deletion is what creates orphans.
pub fn purge_orphan_externals(conn: &Connection) -> Result<usize> {
    let purged = conn.execute(
        "DELETE FROM teilnehmer WHERE external = 1
           AND id NOT IN (SELECT teilnehmer_id FROM meeting_teilnehmer)",
        [],
    )?;
    if purged > 0 {
        info!(purged, "purged orphaned external participants");
    }
    Ok(purged)
}

/// Deactivate internal, non-permanent participants who organize no remaining
/// meeting. Runs last in the cleanup pass — it depends on the final set of
/// surviving meetings.
pub fn deactivate_idle_organizers(conn: &Connection) -> Result<usize> {
    let deactivated = conn.execute(
        "UPDATE teilnehmer SET active = 0
         WHERE active = 1 AND permanent = 0 AND external = 0
           AND id NOT IN (SELECT organisator_id FROM meetings)",
        [],
    )?;
    if deactivated > 0 {
        info!(deactivated, "deactivated idle organizers");
    }
    Ok(deactivated)
}

/// The full cleanup pass in its fixed order. Reordering changes results:
/// orphan-purge before expiry-purge would under-count orphans, and organizer
/// deactivation must see the final meeting set.
pub fn cleanup(conn: &mut Connection, tz: Tz) -> Result<()> {
    purge_expired(conn, tz)?;
    purge_orphan_externals(conn)?;
    deactivate_idle_organizers(conn)?;
    Ok(())
}
