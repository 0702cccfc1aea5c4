//! CLI argument parsing with clap
//!
//! Defines the `notify` command line: global connection and logging options
//! plus one subcommand per client operation.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Environment;
use crate::models::{
    NotificationFilter, NotificationType, Personalisation, PersonalisationValue, Postage,
    personalisation,
};

/// Command-line client for the GOV.UK Notify API
#[derive(Parser, Debug)]
#[command(name = "notify")]
#[command(about = "Command-line client for the GOV.UK Notify API")]
#[command(long_about = "
Send SMS, email and letter notifications, check their status, read inbound
text messages and work with templates. Every command prints the service
response as JSON on stdout; logs go to stderr.

EXAMPLES:
    # Send a text message with personalisation
    notify send-sms 07700900123 -t f33517ff-2a88-4f6e-b855-c550268ce08a -p name=someone

    # Numbers and booleans use ':='
    notify send-email someone@example.com -t <template-id> -p count:=3

    # Check a notification
    notify get-notification 1e3ac5c4-d8ff-4a2a-a8f4-ee1e7bc8d4e8

    # List only failed letters
    notify list-notifications --type letter --status failed

    # Point at a local service with an explicit key
    notify --base-url http://localhost:6011 --api-key <key> list-templates

The API key is read from --api-key, NOTIFY_API_KEY, NOTIFY_CLIENT__API_KEY
or the [client] section of the configuration file, in that order.
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered files in the
    /// configuration directory. The file must exist and be readable.
    ///
    /// Example: --config /etc/notify/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` overlay is loaded.
    ///
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Service base URL
    ///
    /// Overrides `client.base_url` from configuration.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Combined API key
    #[arg(long, value_name = "KEY", env = "NOTIFY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Personalisation arguments shared by the sending and preview commands
#[derive(Args, Debug, Clone, Default)]
pub struct PersonalisationArgs {
    /// Template placeholder value, repeatable
    ///
    /// `KEY=VALUE` sends text; `KEY:=VALUE` sends a number or boolean.
    ///
    /// Example: -p name=someone -p count:=3
    #[arg(
        short = 'p',
        long = "personalisation",
        value_name = "KEY=VALUE",
        value_parser = super::validation::parse_placeholder
    )]
    pub values: Vec<(String, PersonalisationValue)>,
}

impl PersonalisationArgs {
    pub fn to_personalisation(&self) -> Personalisation {
        personalisation(self.values.iter().cloned())
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a text message using a template
    SendSms {
        /// Recipient phone number
        phone_number: String,

        /// Template id
        #[arg(short, long)]
        template_id: String,

        #[command(flatten)]
        personalisation: PersonalisationArgs,

        /// Caller reference stored with the notification
        #[arg(long)]
        reference: Option<String>,

        /// Sender id to use instead of the service default
        #[arg(long)]
        sms_sender_id: Option<String>,
    },

    /// Send an email using a template
    SendEmail {
        /// Recipient email address
        email_address: String,

        /// Template id
        #[arg(short, long)]
        template_id: String,

        #[command(flatten)]
        personalisation: PersonalisationArgs,

        /// Caller reference stored with the notification
        #[arg(long)]
        reference: Option<String>,

        /// Reply-to address id to use instead of the service default
        #[arg(long)]
        email_reply_to_id: Option<String>,
    },

    /// Send a letter using a template
    ///
    /// The address comes from personalisation: address_line_1 to
    /// address_line_7 (or the older postcode fields).
    SendLetter {
        /// Template id
        #[arg(short, long)]
        template_id: String,

        #[command(flatten)]
        personalisation: PersonalisationArgs,

        /// Caller reference stored with the notification
        #[arg(long)]
        reference: Option<String>,
    },

    /// Upload a ready-made PDF letter
    SendPrecompiledLetter {
        /// Caller reference stored with the notification
        reference: String,

        /// PDF file to send
        #[arg(value_name = "PDF", value_parser = super::validation::validate_pdf_path)]
        file: PathBuf,

        /// Postage class: first, second, economy, europe, rest-of-world
        #[arg(long)]
        postage: Option<Postage>,
    },

    /// Show one notification
    GetNotification {
        /// Notification id
        id: String,
    },

    /// List notifications, newest first
    ListNotifications {
        /// Only notifications of this type
        #[arg(long = "type", value_name = "TYPE")]
        template_type: Option<NotificationType>,

        /// Only notifications with this status
        #[arg(long)]
        status: Option<String>,

        /// Only notifications with this reference
        #[arg(long)]
        reference: Option<String>,

        /// Page through results: only notifications older than this id
        #[arg(long, value_name = "ID")]
        older_than: Option<String>,
    },

    /// Download the PDF for a letter notification
    LetterPdf {
        /// Notification id
        id: String,

        /// Where to write the PDF
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// List received text messages (needs an inbound SMS key)
    ReceivedTexts {
        /// Page through results: only messages older than this id
        #[arg(long, value_name = "ID")]
        older_than: Option<String>,
    },

    /// Show one template, optionally at a given version
    GetTemplate {
        /// Template id
        id: String,

        /// Template version
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        version: Option<u32>,
    },

    /// List templates
    ListTemplates {
        /// Only templates of this type: sms, email or letter
        #[arg(long = "type", value_name = "TYPE")]
        template_type: Option<String>,
    },

    /// Render a template with personalisation without sending it
    PreviewTemplate {
        /// Template id
        template_id: String,

        #[command(flatten)]
        personalisation: PersonalisationArgs,
    },
}

impl Commands {
    /// Operation name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Commands::SendSms { .. } => "send-sms",
            Commands::SendEmail { .. } => "send-email",
            Commands::SendLetter { .. } => "send-letter",
            Commands::SendPrecompiledLetter { .. } => "send-precompiled-letter",
            Commands::GetNotification { .. } => "get-notification",
            Commands::ListNotifications { .. } => "list-notifications",
            Commands::LetterPdf { .. } => "letter-pdf",
            Commands::ReceivedTexts { .. } => "received-texts",
            Commands::GetTemplate { .. } => "get-template",
            Commands::ListTemplates { .. } => "list-templates",
            Commands::PreviewTemplate { .. } => "preview-template",
        }
    }
}

/// Builds the notification filter for `list-notifications`
pub(crate) fn notification_filter(
    template_type: Option<NotificationType>,
    status: Option<&str>,
    reference: Option<&str>,
    older_than: Option<&str>,
) -> NotificationFilter {
    let mut filter = NotificationFilter::default();
    if let Some(template_type) = template_type {
        filter = filter.template_type(template_type);
    }
    if let Some(status) = status {
        filter = filter.status(status);
    }
    if let Some(reference) = reference {
        filter = filter.reference(reference);
    }
    if let Some(older_than) = older_than {
        filter = filter.older_than(older_than);
    }
    filter
}
