use autocare_config::EmailConfig;
use autocare_email_impl::EmailServiceImpl;
use anyhow::Context;

/// Creates the SMTP transport described by the config.
pub async fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&config.smtp_url, config.from.clone())
        .await
        .context("Invalid SMTP url")
}
