use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Late,
}

/// One check-in/check-out pair for an employee on a date. Created on
/// check-in, mutated once on check-out, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    pub id: String,
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "2024-08-12", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "09:00:00", value_type = String)]
    pub check_in: Option<NaiveTime>,
    #[schema(example = "17:30:00", value_type = String)]
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    #[schema(example = "Office - Main Building")]
    pub location: String,
}

impl AttendanceRecord {
    /// Checked in but not yet out. At most one such record may exist per
    /// employee per date.
    pub fn is_open(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_none()
    }
}

/// Read-side aggregation of records by status within a date range.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(example = "2024-08-12", value_type = String, format = "date")]
    pub from: NaiveDate,
    #[schema(example = "2024-08-16", value_type = String, format = "date")]
    pub to: NaiveDate,
    #[schema(example = 4)]
    pub present: usize,
    #[schema(example = 1)]
    pub late: usize,
}
