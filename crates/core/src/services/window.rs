//! Submission window gate.
//!
//! Pure time arithmetic over a lecture row and a caller-supplied clock.
//! The window is open while the lecture is `active` and, when a scheduled
//! end time exists, until that end time plus a fixed grace period. A
//! lecture with no scheduled end time stays open for as long as it is
//! `active`.
//!
//! Callers pass `now` explicitly so the gate is deterministic under test.

use chrono::{DateTime, Duration, Utc};
use lectureboard_db::entities::lecture;

/// Minutes after the scheduled end time during which posting is still
/// accepted.
pub const GRACE_PERIOD_MINUTES: i64 = 15;

/// When the window closes for this lecture, if an end time is scheduled.
#[must_use]
pub fn grace_period_end(lecture: &lecture::Model) -> Option<DateTime<Utc>> {
    lecture
        .scheduled_end_time
        .map(|end| end.with_timezone(&Utc) + Duration::minutes(GRACE_PERIOD_MINUTES))
}

/// Whether the submission window is open at `now`.
///
/// Closed whenever the lecture is not `active`, regardless of the clock.
/// The boundary instant itself is closed: at exactly end + grace the
/// window has shut.
#[must_use]
pub fn is_open(lecture: &lecture::Model, now: DateTime<Utc>) -> bool {
    if lecture.status != lecture::Status::Active {
        return false;
    }

    grace_period_end(lecture).map_or(true, |close| now < close)
}

/// Minutes left until the window closes, rounded up.
///
/// `None` when no end time is scheduled (open-ended window), when the
/// lecture is not `active`, or once the window has closed.
#[must_use]
pub fn remaining_minutes(lecture: &lecture::Model, now: DateTime<Utc>) -> Option<i64> {
    if !is_open(lecture, now) {
        return None;
    }

    let close = grace_period_end(lecture)?;
    let seconds = (close - now).num_seconds();
    // Ceiling division; `div_ceil` on signed integers is not stable.
    Some((seconds + 59).div_euclid(60))
}
