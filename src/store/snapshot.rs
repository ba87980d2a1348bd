use crate::{
    auth::password::hash_password,
    error::StoreError,
    model::{
        attendance::AttendanceRecord, notification::Notification, role::Role, user::User,
    },
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the service persists, as it appears in the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub users: Vec<User>,
    pub attendance: Vec<AttendanceRecord>,
    pub notifications: Vec<Notification>,
    /// Shared id source for users, records and notifications.
    pub next_id: u64,
}

impl Snapshot {
    /// The four demo accounts a fresh install starts with.
    pub fn seeded() -> Result<Self, StoreError> {
        let demo = [
            ("admin", "admin123", "Admin User", Role::Admin, "admin@company.com"),
            ("hr001", "hr123", "HR Manager", Role::Hr, "hr@company.com"),
            ("mgr001", "mgr123", "Team Manager", Role::Manager, "manager@company.com"),
            ("emp001", "emp123", "John Doe", Role::Employee, "john@company.com"),
        ];

        let mut users = Vec::with_capacity(demo.len());
        for (i, (username, password, name, role, email)) in demo.into_iter().enumerate() {
            users.push(User {
                id: i as u64 + 1,
                username: username.to_string(),
                password: hash_password(password).map_err(|_| StoreError::Hash)?,
                name: name.to_string(),
                role,
                email: email.to_string(),
            });
        }

        Ok(Self {
            next_id: users.len() as u64 + 1,
            users,
            attendance: Vec::new(),
            notifications: Vec::new(),
        })
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    /// The day's record, open or closed.
    pub fn record_for_day(&self, employee_id: u64, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.attendance
            .iter()
            .find(|a| a.employee_id == employee_id && a.date == date)
    }

    /// The day's record if it still waits for a punch-out.
    pub fn open_record_mut(
        &mut self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Option<&mut AttendanceRecord> {
        self.attendance
            .iter_mut()
            .find(|a| a.employee_id == employee_id && a.date == date && a.is_open())
    }
}
