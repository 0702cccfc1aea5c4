mod api_error;
mod notify_error;

pub use api_error::{ApiError, ErrorDetail};
pub use notify_error::{NotifyError, NotifyResult};
