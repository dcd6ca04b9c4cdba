use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaveBalance {
    #[schema(example = 15)]
    pub annual: u32,
    #[schema(example = 8)]
    pub sick: u32,
    #[schema(example = 3)]
    pub personal: u32,
}

/// Roster entry. Provisioned at startup and immutable afterwards except for
/// the display-only leave balance.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub department: String,
    pub position: String,
    pub email: String,
    pub start_date: NaiveDate,
    pub leave_balance: LeaveBalance,
    /// Employee ids reporting to this person. Empty unless the role is manager.
    pub team_members: Vec<String>,
    /// Argon2 PHC string. Never leaves this struct; `profile()` strips it.
    pub password_hash: String,
}

impl Employee {
    pub fn profile(&self) -> EmployeeProfile {
        EmployeeProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            role: self.role,
            department: self.department.clone(),
            position: self.position.clone(),
            email: self.email.clone(),
            start_date: self.start_date,
            leave_balance: self.leave_balance.clone(),
            team_members: self.team_members.clone(),
        }
    }
}

/// The employee record as exposed to callers: the session blob, JWT subject
/// and every API response use this credential-free shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "EMP001",
    "name": "Sarah Johnson",
    "role": "employee",
    "department": "Engineering",
    "position": "Senior Developer",
    "email": "sarah.johnson@company.com",
    "start_date": "2022-01-15",
    "leave_balance": { "annual": 15, "sick": 8, "personal": 3 },
    "team_members": []
}))]
pub struct EmployeeProfile {
    #[schema(example = "EMP001")]
    pub id: String,
    #[schema(example = "Sarah Johnson")]
    pub name: String,
    pub role: Role,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Senior Developer")]
    pub position: String,
    #[schema(example = "sarah.johnson@company.com", format = "email")]
    pub email: String,
    #[schema(example = "2022-01-15", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    pub leave_balance: LeaveBalance,
    #[serde(default)]
    pub team_members: Vec<String>,
}
