use tracing::{debug, info, warn};

use crate::{
    clients::{
        localization::Localizer,
        messaging::{DispatchContext, MessagingGateway},
        sms::{SmsDispatch, SmsManager},
    },
    error::NotificationError,
    models::{
        entities::Contractor,
        message::OutboundMessage,
        request::{NotificationType, ReturnNotificationRequest},
        result::SmsOutcome,
        template::TemplateData,
    },
};

/// Permission event gating the employee recipient list.
pub const GOODS_RETURN_EVENT: &str = "goods-return";

/// Event kind every dispatch in this workflow is tagged with.
pub const CHANGE_RETURN_STATUS_KIND: &str = "change-return-status";

const EMPLOYEE_SUBJECT_KEY: &str = "return.employee.subject";
const EMPLOYEE_BODY_KEY: &str = "return.employee.body";
const CLIENT_SUBJECT_KEY: &str = "return.client.subject";
const CLIENT_BODY_KEY: &str = "return.client.body";

/// Broadcasts the rendered notification to every permitted employee, one
/// gateway call per recipient. Returns whether a send was attempted; the
/// gateway's acceptance of individual messages is not inspected.
pub async fn notify_employees(
    gateway: &dyn MessagingGateway,
    localizer: &dyn Localizer,
    reseller_id: i64,
    template: &TemplateData,
) -> Result<bool, NotificationError> {
    let from = gateway.reseller_from_address(reseller_id).await?;
    let recipients = gateway
        .permitted_employee_emails(reseller_id, GOODS_RETURN_EVENT)
        .await?;

    if from.is_empty() || recipients.is_empty() {
        debug!(reseller_id, "No from-address or permitted recipients, skipping employee broadcast");
        return Ok(false);
    }

    let params = template.to_params();
    let subject = localizer
        .translate(EMPLOYEE_SUBJECT_KEY, &params, reseller_id)
        .await?;
    let body = localizer
        .translate(EMPLOYEE_BODY_KEY, &params, reseller_id)
        .await?;

    for recipient in &recipients {
        let message = OutboundMessage::new(
            recipient.clone(),
            from.clone(),
            subject.clone(),
            body.clone(),
        );

        gateway
            .dispatch_messages(&[message], reseller_id, CHANGE_RETURN_STATUS_KIND, None)
            .await?;
    }

    info!(
        reseller_id,
        recipient_count = recipients.len(),
        "Employee broadcast dispatched"
    );

    Ok(true)
}

#[derive(Debug, Clone, Default)]
pub struct ClientChannels {
    pub email_sent: bool,
    pub sms: SmsOutcome,
}

/// Notifies the client about a status change over email and SMS. Email
/// failures propagate; SMS failures are captured into the outcome.
pub async fn notify_client(
    gateway: &dyn MessagingGateway,
    localizer: &dyn Localizer,
    sms_manager: &dyn SmsManager,
    request: &ReturnNotificationRequest,
    client: &Contractor,
    template: &TemplateData,
) -> Result<ClientChannels, NotificationError> {
    let mut channels = ClientChannels::default();

    let target_status = request.target_status();
    if request.kind() != Some(NotificationType::Change) || target_status == 0 {
        return Ok(channels);
    }

    let from = gateway.reseller_from_address(request.reseller_id).await?;
    let email = client.email.as_deref().unwrap_or("");

    if !from.is_empty() && !email.is_empty() {
        let params = template.to_params();
        let subject = localizer
            .translate(CLIENT_SUBJECT_KEY, &params, request.reseller_id)
            .await?;
        let body = localizer
            .translate(CLIENT_BODY_KEY, &params, request.reseller_id)
            .await?;

        let message = OutboundMessage::new(email.to_string(), from, subject, body);
        let context = DispatchContext {
            client_id: client.id,
            status_code: target_status,
        };

        gateway
            .dispatch_messages(
                &[message],
                request.reseller_id,
                CHANGE_RETURN_STATUS_KIND,
                Some(context),
            )
            .await?;

        info!(client_id = client.id, "Client email dispatched");
        channels.email_sent = true;
    }

    let mobile = client.mobile.as_deref().unwrap_or("");

    if !mobile.is_empty() {
        let dispatch = match sms_manager
            .send_client_notification(
                request.reseller_id,
                client.id,
                CHANGE_RETURN_STATUS_KIND,
                target_status,
                template,
            )
            .await
        {
            Ok(dispatch) => dispatch,
            // the SMS channel never aborts the operation
            Err(e) => {
                warn!(client_id = client.id, error = %e, "Client SMS dispatch failed");
                SmsDispatch {
                    sent: false,
                    error: Some(e.to_string()),
                }
            }
        };

        channels.sms.is_sent = dispatch.sent;
        if let Some(message) = dispatch.error {
            channels.sms.message = message;
        }
    }

    Ok(channels)
}
