//! Command executor for dispatching CLI commands
//!
//! Each subcommand maps to exactly one [`NotificationClient`] call. Results
//! are written to stdout as pretty-printed JSON.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use super::parser::{Commands, notification_filter};
use crate::client::NotificationClient;
use crate::models::{EmailRequest, LetterRequest, PrecompiledLetterRequest, SmsRequest};

/// Execute a subcommand against the service, writing the result to `out`
pub async fn execute_command<W: Write>(
    command: &Commands,
    client: &NotificationClient,
    out: &mut W,
) -> anyhow::Result<()> {
    tracing::debug!(command = command.name(), "executing command");

    match command {
        Commands::SendSms {
            phone_number,
            template_id,
            personalisation,
            reference,
            sms_sender_id,
        } => {
            let mut request = SmsRequest::new(phone_number, template_id)
                .personalisation(personalisation.to_personalisation());
            if let Some(reference) = reference {
                request = request.reference(reference);
            }
            if let Some(sms_sender_id) = sms_sender_id {
                request = request.sms_sender_id(sms_sender_id);
            }
            print_json(out, &client.send_sms(&request).await?)
        }
        Commands::SendEmail {
            email_address,
            template_id,
            personalisation,
            reference,
            email_reply_to_id,
        } => {
            let mut request = EmailRequest::new(email_address, template_id)
                .personalisation(personalisation.to_personalisation());
            if let Some(reference) = reference {
                request = request.reference(reference);
            }
            if let Some(email_reply_to_id) = email_reply_to_id {
                request = request.email_reply_to_id(email_reply_to_id);
            }
            print_json(out, &client.send_email(&request).await?)
        }
        Commands::SendLetter {
            template_id,
            personalisation,
            reference,
        } => {
            let mut request =
                LetterRequest::new(template_id, personalisation.to_personalisation());
            if let Some(reference) = reference {
                request = request.reference(reference);
            }
            print_json(out, &client.send_letter(&request).await?)
        }
        Commands::SendPrecompiledLetter {
            reference,
            file,
            postage,
        } => {
            let pdf = tokio::fs::read(file)
                .await
                .with_context(|| format!("Failed to read letter '{}'", file.display()))?;
            let mut request = PrecompiledLetterRequest::new(reference, &pdf);
            if let Some(postage) = postage {
                request = request.postage(*postage);
            }
            print_json(out, &client.send_precompiled_letter(&request).await?)
        }
        Commands::GetNotification { id } => {
            print_json(out, &client.get_notification_by_id(id).await?)
        }
        Commands::ListNotifications {
            template_type,
            status,
            reference,
            older_than,
        } => {
            let filter = notification_filter(
                *template_type,
                status.as_deref(),
                reference.as_deref(),
                older_than.as_deref(),
            );
            print_json(out, &client.get_notifications(&filter).await?)
        }
        Commands::LetterPdf { id, output } => {
            let pdf = client.get_pdf_for_letter(id).await?;
            tokio::fs::write(output, &pdf)
                .await
                .with_context(|| format!("Failed to write '{}'", output.display()))?;
            tracing::info!(path = %output.display(), bytes = pdf.len(), "letter PDF saved");
            Ok(())
        }
        Commands::ReceivedTexts { older_than } => {
            print_json(out, &client.get_received_texts(older_than.as_deref()).await?)
        }
        Commands::GetTemplate { id, version } => {
            let template = match version {
                Some(version) => client.get_template_by_id_and_version(id, *version).await?,
                None => client.get_template_by_id(id).await?,
            };
            print_json(out, &template)
        }
        Commands::ListTemplates { template_type } => {
            print_json(out, &client.get_all_templates(template_type.as_deref()).await?)
        }
        Commands::PreviewTemplate {
            template_id,
            personalisation,
        } => {
            let preview = client
                .generate_template_preview(template_id, &personalisation.to_personalisation())
                .await?;
            print_json(out, &preview)
        }
    }
}

/// Serializes first, then writes once, so stdout is only locked for the write
fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    let mut json = serde_json::to_vec_pretty(value).context("Failed to serialize JSON output")?;
    json.push(b'\n');
    out.write_all(&json).context("Failed to write JSON output")?;
    out.flush()?;
    Ok(())
}
