/// Errors raised while resolving or serializing a component.
///
/// A bus interface without a registered resolver is not represented here:
/// the registry lookup simply returns `None` and the interface is flattened
/// into plain ports.
#[derive(Debug, thiserror::Error)]
pub enum PackagerError {
    /// Unknown file extension or parameter value format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A resolver's name map does not match the structure of the interface.
    #[error("Lookup failure: no name map entry for '{path}' in bus interface '{interface}'")]
    LookupFailure { interface: String, path: String },

    #[error("XML error: {0}")]
    Xml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackagerError {
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat(message.into())
    }

    pub fn lookup_failure(interface: impl Into<String>, path: impl Into<String>) -> Self {
        Self::LookupFailure {
            interface: interface.into(),
            path: path.into(),
        }
    }

    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }
}

pub type Result<T> = std::result::Result<T, PackagerError>;
