use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    New,
    Change,
}

impl NotificationType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::New),
            2 => Some(Self::Change),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnNotificationRequest {
    pub reseller_id: i64,
    pub notification_type: i64,
    pub client_id: i64,
    pub creator_id: i64,
    pub expert_id: i64,
    pub complaint_id: i64,
    pub complaint_number: String,
    pub consumption_id: i64,
    pub consumption_number: String,
    pub agreement_number: String,
    pub date: String,
    pub differences: Option<Differences>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Differences {
    pub from: i64,
    pub to: i64,
}

impl ReturnNotificationRequest {
    pub fn kind(&self) -> Option<NotificationType> {
        NotificationType::from_code(self.notification_type)
    }

    /// Target status code of a status change, 0 when none was supplied.
    pub fn target_status(&self) -> i64 {
        self.differences.map(|d| d.to).unwrap_or(0)
    }
}
