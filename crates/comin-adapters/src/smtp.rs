//! Envío de informes por SMTP con lettre.

use async_trait::async_trait;
use comin_core::{DispatchError, Mailer, OutgoingEmail};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Datos de conexión. `user` es también el remitente.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub user: String,
    pub password: String,
}

pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

fn parse_mailbox(address: &str) -> Result<Mailbox, DispatchError> {
    address.parse::<Mailbox>().map_err(|e| DispatchError::Address { address: address.to_string(),
                                                                   reason: e.to_string() })
}

impl SmtpMailer {
    /// Prepara el transporte (TLS implícito vía relay). No abre conexión
    /// hasta el primer envío.
    pub fn new(settings: &SmtpSettings) -> Result<Self, DispatchError> {
        let from = parse_mailbox(&settings.user)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .map_err(|e| DispatchError::Transport(e.to_string()))?
            .credentials(Credentials::new(settings.user.clone(), settings.password.clone()))
            .build();
        Ok(Self { from, transport })
    }

    /// Construye el mensaje multipart (texto + planilla adjunta).
    pub async fn build_message(&self, email: &OutgoingEmail) -> Result<Message, DispatchError> {
        compose(&self.from, email).await
    }
}

pub(crate) async fn compose(from: &Mailbox, email: &OutgoingEmail) -> Result<Message, DispatchError> {
    let mut builder = Message::builder().from(from.clone()).subject(email.subject.clone());
    for to in &email.to {
        builder = builder.to(parse_mailbox(to)?);
    }
    let content = tokio::fs::read(&email.attachment)
        .await
        .map_err(|e| DispatchError::Attachment { path: email.attachment.clone(),
                                                 reason: e.to_string() })?;
    let content_type = ContentType::parse(XLSX_CONTENT_TYPE).map_err(|e| DispatchError::Build(e.to_string()))?;
    let attachment = Attachment::new(email.attachment_name.clone()).body(content, content_type);
    builder.multipart(MultiPart::mixed().singlepart(SinglePart::plain(email.body.clone()))
                                        .singlepart(attachment))
           .map_err(|e| DispatchError::Build(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DispatchError> {
        let message = self.build_message(email).await?;
        let response = self.transport
                           .send(message)
                           .await
                           .map_err(|e| DispatchError::Transport(e.to_string()))?;
        log::debug!("SMTP {} para {}", response.code(), email.to.join(", "));
        Ok(())
    }
}
