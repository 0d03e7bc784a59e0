pub mod domain_error;

use thiserror::Error;

use self::domain_error::DomainError;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("Domain Error. Error: '{0}'.")]
    Domain(DomainError),
    #[error("Internal Error. Error: '{0}'.")]
    Internal(String),
    #[error("The score storage failed. Error: '{0}'.")]
    Storage(String),
    #[error("The word source is unavailable. Error: '{0}'.")]
    WordSource(String),
    #[error("Received a bad formatted message. Message: '{1}', Error: '{0}'.")]
    UnprocessableMessage(String, String),
    #[error("The websocket with the client is closed. Reason: '{0}'.")]
    WebsocketClosed(String),
}

impl Error {
    pub fn log_and_create_internal(message: &str) -> Error {
        log::error!("{message}");
        Error::Internal(message.to_string())
    }

    /// Whether the connection with the client should be dropped after reporting this error.
    pub fn is_fatal_for_client(&self) -> bool {
        match self {
            Error::Domain(_) => false,
            Error::UnprocessableMessage(_, _) => false,
            Error::Storage(_) => false,
            Error::Internal(_) => true,
            Error::WordSource(_) => true,
            Error::WebsocketClosed(_) => true,
        }
    }
}

impl From<DomainError> for Error {
    fn from(error: DomainError) -> Self {
        Error::Domain(error)
    }
}

#[cfg(test)]
mod tests {
    use super::domain_error::DomainError;
    use super::Error;

    #[test]
    fn when_error_is_not_fatal_then_client_stays_connected() {
        assert!(!Error::Domain(DomainError::EmptyPlayerName).is_fatal_for_client());
        assert!(!Error::UnprocessableMessage("".to_string(), "".to_string()).is_fatal_for_client());
        assert!(!Error::Storage("".to_string()).is_fatal_for_client());
    }

    #[test]
    fn when_error_is_fatal_then_client_is_disconnected() {
        assert!(Error::Internal("".to_string()).is_fatal_for_client());
        assert!(Error::WordSource("".to_string()).is_fatal_for_client());
        assert!(Error::WebsocketClosed("".to_string()).is_fatal_for_client());
    }
}
