use anyhow::{anyhow, Context, Result};
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use super::NotificationSink;
use crate::config::NotifyConfig;

/// SMTP delivery via STARTTLS relay. One attempt per alert; failures are the
/// caller's to log and swallow.
pub struct EmailSink {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailSink {
    pub fn from_config(cfg: &NotifyConfig) -> Result<Self> {
        let host = cfg.smtp_host.as_deref().ok_or_else(|| anyhow!("smtp_host missing"))?;
        let from_addr = cfg.from.as_deref().ok_or_else(|| anyhow!("notify.from missing"))?;
        let to_addr = cfg.to.as_deref().ok_or_else(|| anyhow!("notify.to missing"))?;
        let pass = cfg.password.clone().ok_or_else(|| anyhow!("smtp credential missing"))?;

        let creds = Credentials::new(from_addr.to_string(), pass);
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .with_context(|| format!("invalid smtp_host {host}"))?
            .credentials(creds);
        if let Some(port) = cfg.smtp_port {
            builder = builder.port(port);
        }
        let mailer = builder.build();

        let from = from_addr.parse().context("invalid notify.from")?;
        let to = to_addr.parse().context("invalid notify.to")?;

        Ok(Self { mailer, from, to })
    }
}

#[async_trait::async_trait]
impl NotificationSink for EmailSink {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        let msg = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .context("build email")?;

        self.mailer.send(msg).await.context("send email")?;
        tracing::info!(subject, "email sent");
        Ok(())
    }
}
