use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Access level carried by the identity token. Determines which views a
/// session may open.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Hr,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Hr => "HR",
            Role::Employee => "EMPLOYEE",
        }
    }

    /// The default landing view for this role, used when a guard bounces a
    /// session away from a view it may not open.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Hr => "/hr",
            Role::Employee => "/employee",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_details: Option<Department>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<DateTime<Utc>>,
}

impl User {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub is_active: bool,
    /// Derived server-side; never sent on writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u32>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TurnoverRisk {
    Low,
    Medium,
    High,
}

impl TurnoverRisk {
    pub fn label(&self) -> &'static str {
        match self {
            TurnoverRisk::Low => "Low Risk",
            TurnoverRisk::Medium => "Medium Risk",
            TurnoverRisk::High => "High Risk",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_details: Option<User>,
    pub position: String,
    pub hire_date: NaiveDate,
    pub is_active: bool,
    pub turnover_risk: TurnoverRisk,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Training {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub department: Option<i64>,
    pub is_active: bool,
    pub is_mandatory: bool,
    pub max_participants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainingStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainingAssignment {
    pub id: i64,
    pub training: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_details: Option<Training>,
    pub employee: i64,
    pub status: TrainingStatus,
    pub completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

/// Aggregated turnover picture for the analytics dashboard. The server emits
/// camelCase keys for this payload only.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverSnapshot {
    pub total: u32,
    pub by_risk: Vec<RiskBucket>,
    pub by_department: Vec<DepartmentCount>,
    pub pending_surveys: u32,
    pub completed_surveys: u32,
    pub high_risk_employees: Vec<HighRiskEmployee>,
    pub top_risk_factors: Vec<TopRiskFactor>,
    pub risk_by_department: Vec<DepartmentRisk>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RiskBucket {
    pub name: String,
    pub value: u32,
    pub color: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DepartmentCount {
    pub name: String,
    pub count: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HighRiskEmployee {
    pub name: String,
    pub department: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRiskFactor {
    pub factor: String,
    pub avg_score: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRisk {
    pub department: String,
    pub low_risk_count: u32,
    pub medium_risk_count: u32,
    pub high_risk_count: u32,
}
