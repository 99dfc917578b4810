use std::collections::HashMap;

use serde_json::Value;

use crate::{
    clients::localization::Localizer,
    error::NotificationError,
    models::request::{NotificationType, ReturnNotificationRequest},
};

pub const NEW_POSITION_KEY: &str = "return.complaint.new-position";
pub const STATUS_CHANGED_KEY: &str = "return.complaint.status-changed";

/// Localized description of what changed. Empty for a status change
/// without a differences payload and for unknown notification type codes.
pub async fn describe_changes(
    localizer: &dyn Localizer,
    request: &ReturnNotificationRequest,
) -> Result<String, NotificationError> {
    match request.kind() {
        Some(NotificationType::New) => {
            // a brand-new complaint ignores any differences payload
            let text = localizer
                .translate(NEW_POSITION_KEY, &HashMap::new(), request.reseller_id)
                .await?;
            Ok(text)
        }
        Some(NotificationType::Change) => match request.differences {
            Some(differences) => {
                let from_name = localizer.status_name_for(differences.from).await?;
                let to_name = localizer.status_name_for(differences.to).await?;

                let mut params = HashMap::new();
                params.insert("FROM".to_string(), Value::String(from_name));
                params.insert("TO".to_string(), Value::String(to_name));

                let text = localizer
                    .translate(STATUS_CHANGED_KEY, &params, request.reseller_id)
                    .await?;
                Ok(text)
            }
            None => Ok(String::new()),
        },
        None => Ok(String::new()),
    }
}
