use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveType {
    Annual,
    Sick,
    Personal,
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// A leave request and its lifecycle. Created `pending`; transitions exactly
/// once to `approved` or `rejected` and is terminal thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "LA001",
    "employee_id": "EMP001",
    "leave_type": "annual",
    "start_date": "2024-08-20",
    "end_date": "2024-08-22",
    "days": 3,
    "reason": "Family vacation",
    "status": "pending",
    "applied_date": "2024-08-10",
    "approver": "EMP002"
}))]
pub struct LeaveApplication {
    #[schema(example = "LA001")]
    pub id: String,
    #[schema(example = "EMP001")]
    pub employee_id: String,
    pub leave_type: LeaveType,
    #[schema(example = "2024-08-20", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2024-08-22", value_type = String, format = "date")]
    pub end_date: NaiveDate,
    /// Inclusive day count, derived from the date range.
    #[schema(example = 3)]
    pub days: u32,
    #[schema(example = "Family vacation")]
    pub reason: String,
    pub status: LeaveStatus,
    #[schema(example = "2024-08-10", value_type = String, format = "date")]
    pub applied_date: NaiveDate,
    #[schema(example = "EMP002")]
    pub approver: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = "date")]
    pub approved_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl LeaveApplication {
    /// Approved or rejected; no further transitions are permitted.
    pub fn is_finalized(&self) -> bool {
        self.status != LeaveStatus::Pending
    }
}
