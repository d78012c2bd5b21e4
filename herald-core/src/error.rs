use thiserror::Error;
use twilight_http::{
    api_error::ApiError as DiscordError, error::ErrorType, response::DeserializeBodyError,
};

/// Failure of a single outbound Discord call.
///
/// The message text is kept verbatim so handlers can surface it to the invoking user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Discord answered 403: the bot lacks access or hierarchy for the action.
    #[error("{0}")]
    Forbidden(String),
    /// Discord answered 404 for the addressed resource.
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Request(String),
}

impl ApiError {
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<twilight_http::Error> for ApiError {
    fn from(source: twilight_http::Error) -> Self {
        let ErrorType::Response { status, error, .. } = source.kind() else {
            return Self::Request(source.to_string());
        };

        let text = match error {
            DiscordError::General(general) => general.message.clone(),
            _ => source.to_string(),
        };

        match status.get() {
            403 => Self::Forbidden(text),
            404 => Self::NotFound(text),
            _ => Self::Request(text),
        }
    }
}

impl From<DeserializeBodyError> for ApiError {
    fn from(source: DeserializeBodyError) -> Self {
        Self::Request(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_raw_message() {
        let error = ApiError::Forbidden("Missing Permissions".to_owned());

        assert_eq!(error.to_string(), "Missing Permissions");
        assert!(error.is_forbidden());
        assert!(!error.is_not_found());
    }
}
