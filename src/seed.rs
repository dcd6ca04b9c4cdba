//! Demo fixtures. Provisioning is outside the system, so the roster and the
//! starting ledger contents are seeded here at startup.

use chrono::NaiveDate;

use crate::auth::password::hash_password;
use crate::model::employee::{Employee, LeaveBalance};
use crate::model::leave::{LeaveApplication, LeaveStatus, LeaveType};
use crate::model::role::Role;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn demo_roster() -> Vec<Employee> {
    vec![
        Employee {
            id: "EMP001".to_string(),
            name: "Sarah Johnson".to_string(),
            role: Role::Employee,
            department: "Engineering".to_string(),
            position: "Senior Developer".to_string(),
            email: "sarah.johnson@company.com".to_string(),
            start_date: date(2022, 1, 15),
            leave_balance: LeaveBalance {
                annual: 15,
                sick: 8,
                personal: 3,
            },
            team_members: vec![],
            password_hash: hash_password("password123"),
        },
        Employee {
            id: "EMP002".to_string(),
            name: "Michael Chen".to_string(),
            role: Role::Manager,
            department: "Engineering".to_string(),
            position: "Engineering Manager".to_string(),
            email: "michael.chen@company.com".to_string(),
            start_date: date(2020, 3, 20),
            leave_balance: LeaveBalance {
                annual: 20,
                sick: 10,
                personal: 5,
            },
            team_members: vec![
                "EMP001".to_string(),
                "EMP003".to_string(),
                "EMP004".to_string(),
            ],
            password_hash: hash_password("manager123"),
        },
        Employee {
            id: "EMP003".to_string(),
            name: "Emily Rodriguez".to_string(),
            role: Role::Employee,
            department: "Engineering".to_string(),
            position: "Frontend Developer".to_string(),
            email: "emily.rodriguez@company.com".to_string(),
            start_date: date(2023, 2, 1),
            leave_balance: LeaveBalance {
                annual: 15,
                sick: 8,
                personal: 3,
            },
            team_members: vec![],
            password_hash: hash_password("password123"),
        },
        Employee {
            id: "EMP004".to_string(),
            name: "James Park".to_string(),
            role: Role::Employee,
            department: "Engineering".to_string(),
            position: "QA Engineer".to_string(),
            email: "james.park@company.com".to_string(),
            start_date: date(2021, 7, 12),
            leave_balance: LeaveBalance {
                annual: 15,
                sick: 8,
                personal: 3,
            },
            team_members: vec![],
            password_hash: hash_password("password123"),
        },
        Employee {
            id: "ADMIN001".to_string(),
            name: "David Wilson".to_string(),
            role: Role::Admin,
            department: "HR".to_string(),
            position: "HR Director".to_string(),
            email: "david.wilson@company.com".to_string(),
            start_date: date(2019, 9, 10),
            leave_balance: LeaveBalance {
                annual: 25,
                sick: 15,
                personal: 8,
            },
            team_members: vec![],
            password_hash: hash_password("admin123"),
        },
    ]
}

pub fn demo_leave_applications() -> Vec<LeaveApplication> {
    vec![
        LeaveApplication {
            id: "LA001".to_string(),
            employee_id: "EMP001".to_string(),
            leave_type: LeaveType::Annual,
            start_date: date(2024, 8, 20),
            end_date: date(2024, 8, 22),
            days: 3,
            reason: "Family vacation".to_string(),
            status: LeaveStatus::Pending,
            applied_date: date(2024, 8, 10),
            approver: "EMP002".to_string(),
            approved_date: None,
            rejection_reason: None,
        },
        LeaveApplication {
            id: "LA002".to_string(),
            employee_id: "EMP003".to_string(),
            leave_type: LeaveType::Sick,
            start_date: date(2024, 8, 13),
            end_date: date(2024, 8, 13),
            days: 1,
            reason: "Medical appointment".to_string(),
            status: LeaveStatus::Approved,
            applied_date: date(2024, 8, 12),
            approver: "EMP002".to_string(),
            approved_date: Some(date(2024, 8, 12)),
            rejection_reason: None,
        },
    ]
}
