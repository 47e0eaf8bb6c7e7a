use autocare_config::Config;
use autocare_email_contracts::{ContentType, Email, EmailService};
use autocare_models::email_address::EmailAddressWithName;
use anyhow::ensure;
use clap::Subcommand;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test email to check that notifications can be delivered
    Test {
        /// Receiver of the test email, defaults to the service request recipient
        recipient: Option<EmailAddressWithName>,
    },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => {
                let recipient = recipient.unwrap_or_else(|| config.service_request.recipient.clone());
                test(config, recipient).await
            }
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email).await?;
    email_service.ping().await?;

    let ok = email_service
        .send(Email {
            recipient: recipient.clone(),
            subject: "Email Deliverability Test".into(),
            body: "Service request notifications can be delivered to this address.".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    ensure!(ok, "The smtp server rejected the test email");
    info!(%recipient, "Test email sent");

    Ok(())
}
