//! Signed HTTP calls to the notification service.

use super::auth::ApiKey;
use super::http::{build_http_client, endpoint_url, parse_base_url};
use super::options::ClientOptions;
use crate::error::{ApiError, NotifyError, NotifyResult};
use crate::models::{
    EmailNotificationResponse, EmailRequest, LetterNotificationResponse, LetterRequest,
    Notification, NotificationFilter, NotificationList, Personalisation,
    PrecompiledLetterRequest, PrecompiledLetterResponse, PreviewRequest, ReceivedTextList,
    SmsNotificationResponse, SmsRequest, Template, TemplateList, TemplatePreview,
};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Client for the notification service.
///
/// Holds only the parsed API key, the base URL and an HTTP client handle, so
/// it is cheap to clone and safe to share across tasks. Every operation is a
/// single request; nothing is retried.
///
/// # Example
/// ```no_run
/// use notify_rs::NotificationClient;
/// use notify_rs::models::SmsRequest;
///
/// # async fn run() -> notify_rs::NotifyResult<()> {
/// let client = NotificationClient::new(
///     "https://api.notifications.service.gov.uk",
///     "my_key-26785a09-ab16-4eb0-8407-a37497a57506-3d844edf-8d35-48ac-975b-e847b4f122b0",
/// )?;
///
/// let request = SmsRequest::new("07700900123", "f33517ff-2a88-4f6e-b855-c550268ce08a")
///     .placeholder("name", "someone")
///     .reference("sample-test-ref");
/// let response = client.send_sms(&request).await?;
/// println!("sent {}", response.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NotificationClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Arc<ApiKey>,
}

impl NotificationClient {
    /// Creates a client for the given base URL and combined API key.
    ///
    /// # Errors
    /// Fails with [`NotifyError::InvalidApiKey`] or
    /// [`NotifyError::Configuration`] before any network call is made.
    pub fn new(base_url: impl Into<String>, api_key: &str) -> NotifyResult<Self> {
        Self::with_options(ClientOptions::new(base_url), api_key)
    }

    /// Creates a client against the production base URL
    pub fn with_api_key(api_key: &str) -> NotifyResult<Self> {
        Self::with_options(ClientOptions::default(), api_key)
    }

    pub fn with_options(options: ClientOptions, api_key: &str) -> NotifyResult<Self> {
        let api_key = ApiKey::parse(api_key)?;
        options.validate()?;
        let base_url = parse_base_url(&options.base_url)?;
        let http = build_http_client(&options)?;

        tracing::debug!(
            base_url = %base_url,
            service_id = %api_key.service_id(),
            "notification client created"
        );

        Ok(Self {
            http,
            base_url,
            api_key: Arc::new(api_key),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Sends an SMS using a template.
    ///
    /// Fails with a client error when the template id, phone number or
    /// personalisation are invalid, or the sms sender id is unknown.
    pub async fn send_sms(&self, request: &SmsRequest) -> NotifyResult<SmsNotificationResponse> {
        self.post("send_sms", &["v2", "notifications", "sms"], request)
            .await
    }

    /// Sends an email using a template.
    ///
    /// An `email_reply_to_id` that does not belong to the caller's service is
    /// rejected with a message naming that id.
    pub async fn send_email(
        &self,
        request: &EmailRequest,
    ) -> NotifyResult<EmailNotificationResponse> {
        self.post("send_email", &["v2", "notifications", "email"], request)
            .await
    }

    /// Sends a letter using a template; the address comes from personalisation
    pub async fn send_letter(
        &self,
        request: &LetterRequest,
    ) -> NotifyResult<LetterNotificationResponse> {
        self.post("send_letter", &["v2", "notifications", "letter"], request)
            .await
    }

    /// Uploads a ready-made PDF letter
    pub async fn send_precompiled_letter(
        &self,
        request: &PrecompiledLetterRequest,
    ) -> NotifyResult<PrecompiledLetterResponse> {
        self.post(
            "send_precompiled_letter",
            &["v2", "notifications", "letter"],
            request,
        )
        .await
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Fetches a single notification; unknown ids fail with "No result found"
    pub async fn get_notification_by_id(&self, id: &str) -> NotifyResult<Notification> {
        self.get(
            "get_notification_by_id",
            &["v2", "notifications", id],
            &[],
        )
        .await
    }

    /// Lists notifications in the order returned by the service
    pub async fn get_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> NotifyResult<NotificationList> {
        self.get("get_notifications", &["v2", "notifications"], &filter.query_pairs())
            .await
    }

    /// Downloads the rendered PDF for a letter notification
    pub async fn get_pdf_for_letter(&self, id: &str) -> NotifyResult<Vec<u8>> {
        const OPERATION: &str = "get_pdf_for_letter";

        let url = endpoint_url(
            &self.base_url,
            &["v2", "notifications", id, "pdf"],
            &[],
        )?;
        let response = self
            .send(OPERATION, self.request(Method::GET, url)?)
            .await?;
        let bytes = response.bytes().await.map_err(|source| NotifyError::Http {
            operation: OPERATION.to_string(),
            source,
        })?;

        Ok(bytes.to_vec())
    }

    /// Lists inbound text messages; requires a key scoped for inbound SMS
    pub async fn get_received_texts(&self, older_than: Option<&str>) -> NotifyResult<ReceivedTextList> {
        let query: Vec<(&'static str, String)> = older_than
            .map(|id| vec![("older_than", id.to_string())])
            .unwrap_or_default();

        self.get("get_received_texts", &["v2", "received-text-messages"], &query)
            .await
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// Fetches the latest version of a template.
    ///
    /// The id is passed through unchecked: malformed ids fail with
    /// "id is not a valid UUID", unknown ones with "No result found".
    /// Only ids that would change the path (empty, `.`, `..`) are refused
    /// locally with [`NotifyError::InvalidId`].
    pub async fn get_template_by_id(&self, id: &str) -> NotifyResult<Template> {
        self.get("get_template_by_id", &["v2", "template", id], &[])
            .await
    }

    /// Fetches a specific version of a template
    pub async fn get_template_by_id_and_version(
        &self,
        id: &str,
        version: u32,
    ) -> NotifyResult<Template> {
        let version = version.to_string();
        self.get(
            "get_template_by_id_and_version",
            &["v2", "template", id, "version", &version],
            &[],
        )
        .await
    }

    /// Lists templates, optionally of one type.
    ///
    /// The type is sent as given so the service's validation message reaches
    /// the caller (`type invalid is not one of [sms, email, letter]`). Use
    /// [`NotificationType::as_str`](crate::models::NotificationType::as_str)
    /// for the valid values.
    pub async fn get_all_templates(&self, template_type: Option<&str>) -> NotifyResult<TemplateList> {
        let query: Vec<(&'static str, String)> = template_type
            .map(|t| vec![("type", t.to_string())])
            .unwrap_or_default();

        self.get("get_all_templates", &["v2", "templates"], &query)
            .await
    }

    /// Renders a template with personalisation without sending it.
    ///
    /// Each missing placeholder is reported as `Missing personalisation: <key>`.
    pub async fn generate_template_preview(
        &self,
        template_id: &str,
        personalisation: &Personalisation,
    ) -> NotifyResult<TemplatePreview> {
        self.post(
            "generate_template_preview",
            &["v2", "template", template_id, "preview"],
            &PreviewRequest { personalisation },
        )
        .await
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    async fn get<T: DeserializeOwned>(
        &self,
        operation: &str,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> NotifyResult<T> {
        let url = endpoint_url(&self.base_url, segments, query)?;
        let response = self.send(operation, self.request(Method::GET, url)?).await?;
        Self::decode(operation, response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        operation: &str,
        segments: &[&str],
        body: &B,
    ) -> NotifyResult<T> {
        let url = endpoint_url(&self.base_url, segments, &[])?;
        let request = self.request(Method::POST, url)?.json(body);
        let response = self.send(operation, request).await?;
        Self::decode(operation, response).await
    }

    /// Starts a request carrying a freshly signed bearer token
    fn request(&self, method: Method, url: Url) -> NotifyResult<reqwest::RequestBuilder> {
        let token = self.api_key.token()?;
        tracing::debug!(method = %method, path = url.path(), "sending request");
        Ok(self
            .http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, "application/json"))
    }

    /// Sends the request and turns any non-2xx status into [`NotifyError::Client`]
    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> NotifyResult<Response> {
        let response = request.send().await.map_err(|source| {
            tracing::warn!(operation, error = %source, "request failed");
            NotifyError::Http {
                operation: operation.to_string(),
                source,
            }
        })?;

        let status = response.status();
        tracing::debug!(operation, status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.map_err(|source| NotifyError::Http {
            operation: operation.to_string(),
            source,
        })?;
        let api_error = ApiError::from_response(status.as_u16(), &body);

        tracing::warn!(
            operation,
            status = status.as_u16(),
            errors = %api_error.message(),
            "service returned an error"
        );

        Err(api_error.into())
    }

    async fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> NotifyResult<T> {
        let body = response.text().await.map_err(|source| NotifyError::Http {
            operation: operation.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| NotifyError::Decode {
            operation: operation.to_string(),
            source,
        })
    }
}
