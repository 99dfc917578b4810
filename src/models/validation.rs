use crate::{error::NotificationError, models::request::ReturnNotificationRequest};

pub fn validate_request(request: &ReturnNotificationRequest) -> Result<(), NotificationError> {
    if request.reseller_id == 0 || request.notification_type == 0 {
        return Err(NotificationError::Validation(
            "Reseller id and notification type are required!".to_string(),
        ));
    }

    Ok(())
}
