use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};

/// Append-only record of check-in/check-out events, one owner for every
/// `AttendanceRecord` in the system.
///
/// Invariant: at most one open record (checked in, not yet out) exists per
/// employee per date. Each mutating call holds the lock for its whole
/// read-check-write, so concurrent callers see exactly one winner.
pub struct AttendanceLedger {
    records: Mutex<Vec<AttendanceRecord>>,
    late_after: NaiveTime,
}

impl AttendanceLedger {
    pub fn new(late_after: NaiveTime) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            late_after,
        }
    }

    /// Opens a record for the employee on `at`'s date. Status is `late` when
    /// the check-in time is past the configured threshold.
    pub fn check_in(
        &self,
        employee_id: &str,
        at: DateTime<Local>,
        location: &str,
    ) -> DomainResult<AttendanceRecord> {
        let date = at.date_naive();
        let time = at.time();

        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.employee_id == employee_id && r.date == date && r.is_open())
        {
            return Err(DomainError::AlreadyCheckedIn);
        }

        let status = if time > self.late_after {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };

        let record = AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            date,
            check_in: Some(time),
            check_out: None,
            status,
            location: location.to_string(),
        };
        records.push(record.clone());
        Ok(record)
    }

    /// Closes the open record for the employee on `at`'s date.
    pub fn check_out(&self, employee_id: &str, at: DateTime<Local>) -> DomainResult<AttendanceRecord> {
        let date = at.date_naive();

        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.employee_id == employee_id && r.date == date && r.is_open())
            .ok_or(DomainError::NoOpenRecord)?;

        record.check_out = Some(at.time());
        Ok(record.clone())
    }

    /// All records for the employee, insertion order.
    pub fn by_employee(&self, employee_id: &str) -> Vec<AttendanceRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect()
    }

    /// Everyone's records for one date.
    pub fn on_date(&self, date: NaiveDate) -> Vec<AttendanceRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect()
    }

    /// Counts records by status within the inclusive range. Pure read-side
    /// aggregation; nothing is stored.
    pub fn summary(&self, employee_id: &str, from: NaiveDate, to: NaiveDate) -> AttendanceSummary {
        let records = self.records.lock().unwrap();
        let mut present = 0;
        let mut late = 0;
        for record in records
            .iter()
            .filter(|r| r.employee_id == employee_id && r.date >= from && r.date <= to)
        {
            match record.status {
                AttendanceStatus::Present => present += 1,
                AttendanceStatus::Late => late += 1,
            }
        }
        AttendanceSummary {
            from,
            to,
            present,
            late,
        }
    }
}
