//! Typed request and response bodies for the notification service.

mod notification;
mod personalisation;
mod received_text;
mod requests;
mod template;

pub use notification::{
    EmailNotificationResponse, EmailResponseContent, LetterNotificationResponse,
    LetterResponseContent, Links, Notification, NotificationFilter, NotificationList,
    NotificationType, PrecompiledLetterResponse, SmsNotificationResponse, SmsResponseContent,
    TemplateRef,
};
pub use personalisation::{Personalisation, PersonalisationValue, personalisation};
pub use received_text::{ReceivedText, ReceivedTextList};
pub(crate) use requests::PreviewRequest;
pub use requests::{EmailRequest, LetterRequest, Postage, PrecompiledLetterRequest, SmsRequest};
pub use template::{Template, TemplateList, TemplatePreview};
