use autocare_di::Build;
use autocare_email_contracts::{template::TemplateEmailService, ContentType, Email, EmailService};
use autocare_models::email_address::EmailAddressWithName;
use autocare_templates_contracts::{ServiceRequestTemplate, Template, TemplateService};

#[derive(Debug, Clone, Build)]
pub struct TemplateEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<EmailS, Template> TemplateEmailService for TemplateEmailServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_service_request_email(
        &self,
        recipient: EmailAddressWithName,
        data: &ServiceRequestTemplate,
    ) -> anyhow::Result<bool> {
        let subject = format!("New Service Request from {}", data.name);
        self.send_email(recipient, data, subject).await
    }
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipient: EmailAddressWithName,
        data: &T,
        subject: impl Into<String>,
    ) -> anyhow::Result<bool> {
        self.email
            .send(Email {
                recipient,
                subject: subject.into(),
                body: self.template.render(data)?,
                content_type: ContentType::Html,
                reply_to: None,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use autocare_email_contracts::MockEmailService;
    use autocare_templates_contracts::MockTemplateService;

    use super::*;

    fn data() -> ServiceRequestTemplate {
        ServiceRequestTemplate {
            name: "Jo".into(),
            phone: "555-123-4567".into(),
            location: "Springfield".into(),
            service_type: "General Maintenance".into(),
            vehicle: None,
            message: "hi".into(),
        }
    }

    #[tokio::test]
    async fn send_service_request_email() {
        // Arrange
        let recipient = "owner@example.com".parse::<EmailAddressWithName>().unwrap();

        let template = MockTemplateService::new().with_render(data(), "<p>rendered</p>".into());

        let email = MockEmailService::new().with_send(
            Email {
                recipient: recipient.clone(),
                subject: "New Service Request from Jo".into(),
                body: "<p>rendered</p>".into(),
                content_type: ContentType::Html,
                reply_to: None,
            },
            true,
        );

        let sut = TemplateEmailServiceImpl { email, template };

        // Act
        let result = sut.send_service_request_email(recipient, &data()).await;

        // Assert
        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn send_rejected() {
        // Arrange
        let recipient = "owner@example.com".parse::<EmailAddressWithName>().unwrap();

        let template = MockTemplateService::new().with_render(data(), "<p>rendered</p>".into());

        let email = MockEmailService::new().with_send(
            Email {
                recipient: recipient.clone(),
                subject: "New Service Request from Jo".into(),
                body: "<p>rendered</p>".into(),
                content_type: ContentType::Html,
                reply_to: None,
            },
            false,
        );

        let sut = TemplateEmailServiceImpl { email, template };

        // Act
        let result = sut.send_service_request_email(recipient, &data()).await;

        // Assert
        assert!(!result.unwrap());
    }
}
