use thiserror::Error;

/// Error taxonomy shared by the poller and the notifier.
///
/// The `Display` text of every variant is what ends up in the chat when the
/// poll loop reports a failure, so it is written for the person reading the
/// channel.
#[derive(Debug, Error)]
pub enum HeraldError {
    /// The request never completed (DNS, refused connection, timeout).
    #[error("Ошибка при запросе к основному API: {0}")]
    Transport(String),

    /// The review API answered with something other than 200.
    #[error("Ошибка запроса к API: {status}")]
    Http { status: u16 },

    #[error("{0}")]
    Shape(String),

    #[error("{0}")]
    MissingField(String),

    #[error("Неизвестный статус проверки домашней работы: {code}!")]
    UnknownStatus { code: String },

    #[error("Ошибка отправки сообщения: {0}")]
    Delivery(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HeraldError>;
