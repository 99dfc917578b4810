use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::{
    error::NotificationError,
    models::{
        entities::{Contractor, Employee},
        request::ReturnNotificationRequest,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Int(n) => *n == 0,
            FieldValue::Text(s) => s.is_empty(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Int(n) => Value::from(*n),
            FieldValue::Text(s) => Value::String(s.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateData {
    #[serde(rename = "COMPLAINT_ID")]
    pub complaint_id: i64,

    #[serde(rename = "COMPLAINT_NUMBER")]
    pub complaint_number: String,

    #[serde(rename = "CREATOR_ID")]
    pub creator_id: i64,

    #[serde(rename = "CREATOR_NAME")]
    pub creator_name: String,

    #[serde(rename = "EXPERT_ID")]
    pub expert_id: i64,

    #[serde(rename = "EXPERT_NAME")]
    pub expert_name: String,

    #[serde(rename = "CLIENT_ID")]
    pub client_id: i64,

    #[serde(rename = "CLIENT_NAME")]
    pub client_name: String,

    #[serde(rename = "CONSUMPTION_ID")]
    pub consumption_id: i64,

    #[serde(rename = "CONSUMPTION_NUMBER")]
    pub consumption_number: String,

    #[serde(rename = "AGREEMENT_NUMBER")]
    pub agreement_number: String,

    #[serde(rename = "DATE")]
    pub date: String,

    #[serde(rename = "DIFFERENCES")]
    pub differences: String,
}

impl TemplateData {
    pub fn build(
        request: &ReturnNotificationRequest,
        client: &Contractor,
        creator: &Employee,
        expert: &Employee,
        differences: String,
    ) -> Self {
        Self {
            complaint_id: request.complaint_id,
            complaint_number: request.complaint_number.clone(),
            creator_id: creator.id,
            creator_name: creator.full_name(),
            expert_id: expert.id,
            expert_name: expert.full_name(),
            client_id: client.id,
            client_name: client.display_name(),
            consumption_id: request.consumption_id,
            consumption_number: request.consumption_number.clone(),
            agreement_number: request.agreement_number.clone(),
            date: request.date.clone(),
            differences,
        }
    }

    /// All 13 fields in their fixed schema order.
    pub fn entries(&self) -> [(&'static str, FieldValue); 13] {
        [
            ("COMPLAINT_ID", FieldValue::Int(self.complaint_id)),
            (
                "COMPLAINT_NUMBER",
                FieldValue::Text(self.complaint_number.clone()),
            ),
            ("CREATOR_ID", FieldValue::Int(self.creator_id)),
            ("CREATOR_NAME", FieldValue::Text(self.creator_name.clone())),
            ("EXPERT_ID", FieldValue::Int(self.expert_id)),
            ("EXPERT_NAME", FieldValue::Text(self.expert_name.clone())),
            ("CLIENT_ID", FieldValue::Int(self.client_id)),
            ("CLIENT_NAME", FieldValue::Text(self.client_name.clone())),
            ("CONSUMPTION_ID", FieldValue::Int(self.consumption_id)),
            (
                "CONSUMPTION_NUMBER",
                FieldValue::Text(self.consumption_number.clone()),
            ),
            (
                "AGREEMENT_NUMBER",
                FieldValue::Text(self.agreement_number.clone()),
            ),
            ("DATE", FieldValue::Text(self.date.clone())),
            ("DIFFERENCES", FieldValue::Text(self.differences.clone())),
        ]
    }

    /// Fails on the first zero/empty field. A blank DIFFERENCES (status
    /// change without a payload, unknown notification type codes) fails
    /// here too.
    pub fn ensure_complete(&self) -> Result<(), NotificationError> {
        for (name, value) in self.entries() {
            if value.is_empty() {
                return Err(NotificationError::IncompleteTemplate(name.to_string()));
            }
        }
        Ok(())
    }

    pub fn to_params(&self) -> HashMap<String, Value> {
        self.entries()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect()
    }
}
