use std::sync::Arc;

use tracing::info;

use crate::{
    clients::{
        directory::Directory, localization::Localizer, messaging::MessagingGateway,
        sms::SmsManager,
    },
    differences::describe_changes,
    error::NotificationError,
    models::{
        request::ReturnNotificationRequest, result::NotificationResult, template::TemplateData,
        validation::validate_request,
    },
    notifier::{notify_client, notify_employees},
    resolver::EntityResolver,
};

pub struct ReturnNotificationService {
    directory: Arc<dyn Directory>,
    localizer: Arc<dyn Localizer>,
    gateway: Arc<dyn MessagingGateway>,
    sms_manager: Arc<dyn SmsManager>,
}

impl ReturnNotificationService {
    pub fn new(
        directory: Arc<dyn Directory>,
        localizer: Arc<dyn Localizer>,
        gateway: Arc<dyn MessagingGateway>,
        sms_manager: Arc<dyn SmsManager>,
    ) -> Self {
        Self {
            directory,
            localizer,
            gateway,
            sms_manager,
        }
    }

    /// Runs the whole goods-return notification workflow for one request.
    ///
    /// Validation, entity resolution and template assembly all abort on
    /// failure before anything is dispatched. Once dispatching starts, an
    /// email gateway failure still aborts, while an SMS failure is
    /// captured into the returned report.
    pub async fn perform_return_notification(
        &self,
        request: &ReturnNotificationRequest,
    ) -> Result<NotificationResult, NotificationError> {
        validate_request(request)?;

        info!(
            reseller_id = request.reseller_id,
            notification_type = request.notification_type,
            complaint_id = request.complaint_id,
            "Processing return notification"
        );

        let resolver = EntityResolver::new(self.directory.as_ref());

        let _seller = resolver.resolve_seller(request.reseller_id).await?;
        let client = resolver
            .resolve_client(request.client_id, request.reseller_id)
            .await?;
        let creator = resolver
            .resolve_employee(request.creator_id, "Creator not found!")
            .await?;
        let expert = resolver
            .resolve_employee(request.expert_id, "Expert not found!")
            .await?;

        let changes = describe_changes(self.localizer.as_ref(), request).await?;

        let template = TemplateData::build(request, &client, &creator, &expert, changes);
        template.ensure_complete()?;

        let employees_notified = notify_employees(
            self.gateway.as_ref(),
            self.localizer.as_ref(),
            request.reseller_id,
            &template,
        )
        .await?;

        let client_channels = notify_client(
            self.gateway.as_ref(),
            self.localizer.as_ref(),
            self.sms_manager.as_ref(),
            request,
            &client,
            &template,
        )
        .await?;

        let result = NotificationResult {
            notification_employee_by_email: employees_notified,
            notification_client_by_email: client_channels.email_sent,
            notification_client_by_sms: client_channels.sms,
        };

        info!(
            complaint_id = request.complaint_id,
            employee_email = result.notification_employee_by_email,
            client_email = result.notification_client_by_email,
            client_sms = result.notification_client_by_sms.is_sent,
            "Return notification completed"
        );

        Ok(result)
    }
}
