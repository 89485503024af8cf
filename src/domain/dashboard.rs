// Dashboard domain model
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlan {
    pub summary: String,
    pub feeding_focus: String,
    pub sleep_focus: String,
    pub play_focus: String,
    pub development_focus: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reminders: Vec<String>,
}

/// Result of the dashboard query for one care profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub daily_tips: Vec<Tip>,
    #[serde(default)]
    pub care_plan: Option<CarePlan>,
}

impl DashboardData {
    pub fn new(daily_tips: Vec<Tip>, care_plan: Option<CarePlan>) -> Self {
        Self {
            daily_tips,
            care_plan,
        }
    }
}

// `dailyTips` is a nullable list in the schema
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
