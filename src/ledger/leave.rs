use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::clock::Clock;
use crate::error::{DomainError, DomainResult, FieldError};
use crate::gate;
use crate::model::leave::{LeaveApplication, LeaveStatus, LeaveType};
use crate::model::role::Role;

/// Minimum trimmed length of the free-text reason.
const MIN_REASON_LEN: usize = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unvalidated application input as submitted. Fields stay raw strings so
/// every problem can be reported at once, field by field.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LeaveDraft {
    #[schema(example = "annual")]
    pub leave_type: String,
    #[schema(example = "2024-08-20", format = "date")]
    pub start_date: String,
    #[schema(example = "2024-08-22", format = "date")]
    pub end_date: String,
    #[schema(example = "Family vacation in the mountains")]
    pub reason: String,
}

/// Owns every `LeaveApplication` and drives its lifecycle:
/// `pending --approve--> approved`, `pending --reject--> rejected`, both
/// terminal. Mutations lock for the whole read-check-write, so one of two
/// racing finalizations always loses with `AlreadyFinalized`.
pub struct LeaveLedger {
    applications: Mutex<Vec<LeaveApplication>>,
    next_seq: Mutex<u64>,
    clock: Arc<dyn Clock>,
}

impl LeaveLedger {
    pub fn new(seed: Vec<LeaveApplication>, clock: Arc<dyn Clock>) -> Self {
        let next_seq = seed
            .iter()
            .filter_map(|l| l.id.strip_prefix("LA").and_then(|n| n.parse::<u64>().ok()))
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            applications: Mutex::new(seed),
            next_seq: Mutex::new(next_seq),
            clock,
        }
    }

    fn next_id(&self) -> String {
        let mut seq = self.next_seq.lock().unwrap();
        let id = format!("LA{:03}", *seq);
        *seq += 1;
        id
    }

    /// Validates the draft and records a new `pending` application. All
    /// field problems are collected and returned together.
    pub fn apply(
        &self,
        employee_id: &str,
        draft: &LeaveDraft,
        approver_id: &str,
    ) -> DomainResult<LeaveApplication> {
        let today = self.clock.today();
        let mut errors = Vec::new();

        let leave_type = if draft.leave_type.trim().is_empty() {
            errors.push(FieldError::new("leave_type", "Leave type is required"));
            None
        } else {
            match LeaveType::from_str(draft.leave_type.trim()) {
                Ok(t) => Some(t),
                Err(_) => {
                    errors.push(FieldError::new(
                        "leave_type",
                        "Leave type must be annual, sick or personal",
                    ));
                    None
                }
            }
        };

        let start_date = parse_date_field(&draft.start_date, "start_date", "Start", &mut errors);
        let end_date = parse_date_field(&draft.end_date, "end_date", "End", &mut errors);

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                errors.push(FieldError::new(
                    "end_date",
                    "End date must be after start date",
                ));
            }
            if start < today {
                errors.push(FieldError::new(
                    "start_date",
                    "Start date cannot be in the past",
                ));
            }
        }

        if draft.reason.trim().len() < MIN_REASON_LEN {
            errors.push(FieldError::new(
                "reason",
                format!("Reason must be at least {MIN_REASON_LEN} characters"),
            ));
        }

        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        let (start_date, end_date) = (start_date.unwrap(), end_date.unwrap());
        let application = LeaveApplication {
            id: self.next_id(),
            employee_id: employee_id.to_string(),
            leave_type: leave_type.unwrap(),
            start_date,
            end_date,
            days: day_count(start_date, end_date),
            reason: draft.reason.trim().to_string(),
            status: LeaveStatus::Pending,
            applied_date: today,
            approver: approver_id.to_string(),
            approved_date: None,
            rejection_reason: None,
        };

        self.applications.lock().unwrap().push(application.clone());
        Ok(application)
    }

    /// `pending -> approved`, stamped with today's date. Terminal.
    pub fn approve(&self, leave_id: &str, actor: Role) -> DomainResult<LeaveApplication> {
        if !gate::can_approve_leave(actor) {
            return Err(DomainError::NotAuthorized);
        }

        let today = self.clock.today();
        let mut applications = self.applications.lock().unwrap();
        let application = find_mut(applications.as_mut_slice(), leave_id)?;

        if application.is_finalized() {
            return Err(already_finalized(application));
        }
        application.status = LeaveStatus::Approved;
        application.approved_date = Some(today);
        Ok(application.clone())
    }

    /// `pending -> rejected`, with the reviewer's reason. Terminal.
    pub fn reject(&self, leave_id: &str, actor: Role, reason: &str) -> DomainResult<LeaveApplication> {
        if !gate::can_approve_leave(actor) {
            return Err(DomainError::NotAuthorized);
        }

        let mut applications = self.applications.lock().unwrap();
        let application = find_mut(applications.as_mut_slice(), leave_id)?;

        if application.is_finalized() {
            return Err(already_finalized(application));
        }
        application.status = LeaveStatus::Rejected;
        application.rejection_reason = Some(reason.to_string());
        Ok(application.clone())
    }

    pub fn get(&self, leave_id: &str) -> DomainResult<LeaveApplication> {
        self.applications
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == leave_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound {
                entity: "leave application",
                id: leave_id.to_string(),
            })
    }

    /// All applications for the employee, insertion order.
    pub fn by_employee(&self, employee_id: &str) -> Vec<LeaveApplication> {
        self.applications
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect()
    }

    /// Applications awaiting review, for the manager/admin views.
    pub fn pending(&self) -> Vec<LeaveApplication> {
        self.applications
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.status == LeaveStatus::Pending)
            .cloned()
            .collect()
    }

    pub fn all(&self) -> Vec<LeaveApplication> {
        self.applications.lock().unwrap().clone()
    }
}

/// Inclusive day count of the range, clamped to zero for inverted input.
fn day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    ((end - start).num_days() + 1).max(0) as u32
}

fn parse_date_field(
    raw: &str,
    field: &'static str,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} date is required")));
        return None;
    }
    match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError::new(
                field,
                format!("{label} date is not a valid date"),
            ));
            None
        }
    }
}

fn find_mut<'a>(
    applications: &'a mut [LeaveApplication],
    leave_id: &str,
) -> DomainResult<&'a mut LeaveApplication> {
    applications
        .iter_mut()
        .find(|l| l.id == leave_id)
        .ok_or_else(|| DomainError::NotFound {
            entity: "leave application",
            id: leave_id.to_string(),
        })
}

fn already_finalized(application: &LeaveApplication) -> DomainError {
    DomainError::AlreadyFinalized {
        id: application.id.clone(),
        status: application.status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::seed;

    fn draft(leave_type: &str, start: &str, end: &str, reason: &str) -> LeaveDraft {
        LeaveDraft {
            leave_type: leave_type.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Ledger seeded like the demo data, with "today" pinned to 2024-08-10.
    fn ledger() -> LeaveLedger {
        LeaveLedger::new(
            seed::demo_leave_applications(),
            Arc::new(FixedClock::on(2024, 8, 10)),
        )
    }

    fn fields(err: DomainError) -> Vec<&'static str> {
        match err {
            DomainError::Validation(errors) => errors.iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn apply_counts_inclusive_days() {
        let ledger = ledger();
        let application = ledger
            .apply(
                "EMP001",
                &draft("annual", "2024-08-20", "2024-08-22", "Family vacation trip"),
                "EMP002",
            )
            .unwrap();
        assert_eq!(application.days, 3);
        assert_eq!(application.status, LeaveStatus::Pending);
        assert_eq!(
            application.applied_date,
            NaiveDate::from_ymd_opt(2024, 8, 10).unwrap()
        );
        assert_eq!(application.approver, "EMP002");
    }

    #[test]
    fn single_day_leave_is_one_day() {
        let ledger = ledger();
        let application = ledger
            .apply(
                "EMP003",
                &draft("sick", "2024-08-13", "2024-08-13", "Medical appointment."),
                "EMP002",
            )
            .unwrap();
        assert_eq!(application.days, 1);
    }

    #[test]
    fn ids_continue_the_seeded_sequence() {
        let ledger = ledger();
        let application = ledger
            .apply(
                "EMP001",
                &draft("annual", "2024-08-20", "2024-08-22", "Family vacation trip"),
                "EMP002",
            )
            .unwrap();
        // seeds end at LA002
        assert_eq!(application.id, "LA003");
    }

    #[test]
    fn short_reason_fails_on_reason_field() {
        let ledger = ledger();
        let err = ledger
            .apply(
                "EMP001",
                &draft("annual", "2024-08-20", "2024-08-22", "short"),
                "EMP002",
            )
            .unwrap_err();
        assert_eq!(fields(err), vec!["reason"]);
    }

    #[test]
    fn reason_length_checks_trimmed_text() {
        let ledger = ledger();
        let err = ledger
            .apply(
                "EMP001",
                &draft("annual", "2024-08-20", "2024-08-22", "   padded   "),
                "EMP002",
            )
            .unwrap_err();
        assert_eq!(fields(err), vec!["reason"]);
    }

    #[test]
    fn inverted_range_fails_on_end_date() {
        let ledger = ledger();
        let err = ledger
            .apply(
                "EMP001",
                &draft("annual", "2024-08-22", "2024-08-20", "Family vacation trip"),
                "EMP002",
            )
            .unwrap_err();
        assert_eq!(fields(err), vec!["end_date"]);
    }

    #[test]
    fn past_start_date_fails() {
        let ledger = ledger();
        let err = ledger
            .apply(
                "EMP001",
                &draft("annual", "2024-08-01", "2024-08-22", "Family vacation trip"),
                "EMP002",
            )
            .unwrap_err();
        assert_eq!(fields(err), vec!["start_date"]);
    }

    #[test]
    fn starting_today_is_allowed() {
        let ledger = ledger();
        assert!(
            ledger
                .apply(
                    "EMP001",
                    &draft("sick", "2024-08-10", "2024-08-10", "Sudden high fever"),
                    "EMP002",
                )
                .is_ok()
        );
    }

    #[test]
    fn all_field_problems_are_reported_together() {
        let ledger = ledger();
        let err = ledger
            .apply("EMP001", &draft("holiday", "nope", "", "short"), "EMP002")
            .unwrap_err();
        assert_eq!(
            fields(err),
            vec!["leave_type", "start_date", "end_date", "reason"]
        );
    }

    #[test]
    fn approve_stamps_today_and_is_terminal() {
        let ledger = ledger();
        let approved = ledger.approve("LA001", Role::Manager).unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(
            approved.approved_date,
            Some(NaiveDate::from_ymd_opt(2024, 8, 10).unwrap())
        );

        let err = ledger.approve("LA001", Role::Manager).unwrap_err();
        assert!(matches!(err, DomainError::AlreadyFinalized { .. }));
        let err = ledger.reject("LA001", Role::Admin, "changed my mind").unwrap_err();
        assert!(matches!(err, DomainError::AlreadyFinalized { .. }));

        // stamps unchanged by the failed attempts
        let current = ledger.get("LA001").unwrap();
        assert_eq!(current.status, LeaveStatus::Approved);
        assert_eq!(
            current.approved_date,
            Some(NaiveDate::from_ymd_opt(2024, 8, 10).unwrap())
        );
        assert_eq!(current.rejection_reason, None);
    }

    #[test]
    fn reject_stores_the_reason() {
        let ledger = ledger();
        let rejected = ledger
            .reject("LA001", Role::Admin, "Team is at capacity that week")
            .unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("Team is at capacity that week")
        );
        assert_eq!(rejected.approved_date, None);
    }

    #[test]
    fn employees_may_not_finalize() {
        let ledger = ledger();
        let err = ledger.approve("LA001", Role::Employee).unwrap_err();
        assert!(matches!(err, DomainError::NotAuthorized));
        let err = ledger.reject("LA001", Role::Employee, "no").unwrap_err();
        assert!(matches!(err, DomainError::NotAuthorized));
        // untouched
        assert_eq!(ledger.get("LA001").unwrap().status, LeaveStatus::Pending);
    }

    #[test]
    fn finalizing_unknown_id_is_not_found() {
        let ledger = ledger();
        let err = ledger.approve("LA999", Role::Manager).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn pending_lists_only_open_applications() {
        let ledger = ledger();
        // seeds: LA001 pending, LA002 approved
        let pending: Vec<_> = ledger.pending().iter().map(|l| l.id.clone()).collect();
        assert_eq!(pending, vec!["LA001"]);

        ledger.approve("LA001", Role::Manager).unwrap();
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn by_employee_filters_and_keeps_order() {
        let ledger = ledger();
        ledger
            .apply(
                "EMP001",
                &draft("personal", "2024-09-02", "2024-09-02", "Moving apartments."),
                "EMP002",
            )
            .unwrap();
        let ids: Vec<_> = ledger
            .by_employee("EMP001")
            .iter()
            .map(|l| l.id.clone())
            .collect();
        assert_eq!(ids, vec!["LA001", "LA003"]);
    }
}
