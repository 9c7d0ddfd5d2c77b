use std::error::Error as StdError;
use std::fmt;

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    ConfigInvalid,
    ConfigKeyMissing,
    ConfigLoadFailed,
    DuplicateEvents,
    InvalidPackageData,
    MessageBuildingFailed,
    MessageParsingFailed,
    PublishFailed,
    ZodiacRequestFailed,
}

// (kind, title)
impl From<ErrorKind> for (&'static str, &'static str) {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::ConfigInvalid => ("config_invalid", "Config invalid"),
            ErrorKind::ConfigKeyMissing => ("config_key_missing", "Config key missing"),
            ErrorKind::ConfigLoadFailed => ("config_load_failed", "Config load failed"),
            ErrorKind::DuplicateEvents => ("duplicate_events", "Duplicate events"),
            ErrorKind::InvalidPackageData => ("invalid_package_data", "Invalid package data"),
            ErrorKind::MessageBuildingFailed => {
                ("message_building_failed", "Message building failed")
            }
            ErrorKind::MessageParsingFailed => {
                ("message_parsing_failed", "Message parsing failed")
            }
            ErrorKind::PublishFailed => ("publish_failed", "Publish failed"),
            ErrorKind::ZodiacRequestFailed => ("zodiac_request_failed", "Zodiac request failed"),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_kind, title): (&str, &str) = (*self).into();
        write!(f, "{}", title)
    }
}

////////////////////////////////////////////////////////////////////////////////

pub(crate) struct Error {
    kind: ErrorKind,
    source: anyhow::Error,
}

impl Error {
    pub(crate) fn new<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self {
            kind,
            source: source.into(),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        let (kind, _title): (&'static str, &str) = self.kind.into();
        kind
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.kind, self.source)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.source)
    }
}

////////////////////////////////////////////////////////////////////////////////

pub(crate) trait ErrorExt<T> {
    fn error(self, kind: ErrorKind) -> Result<T, Error>;
}

impl<T, E: Into<anyhow::Error>> ErrorExt<T> for Result<T, E> {
    fn error(self, kind: ErrorKind) -> Result<T, Error> {
        self.map_err(|source| Error::new(kind, source))
    }
}
