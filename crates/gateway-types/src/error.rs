/// Validation error for caller-supplied inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Address(String),
    Descriptor(String),
    ZeroComputeLimit,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address(msg) => write!(f, "malformed address: {msg}"),
            Self::Descriptor(msg) => write!(f, "bad interface descriptor: {msg}"),
            Self::ZeroComputeLimit => write!(f, "compute limit must be positive"),
        }
    }
}

impl std::error::Error for ParseError {}
