/// Errors raised while generating a pattern.
/// All of them are fatal to generation and surface before any flight action.
#[derive(Debug)]
pub enum PatternError {
    /// The point-cloud source does not exist.
    NotFound(std::path::PathBuf),
    /// The source exists but cannot be interpreted (bad header, missing x/y/z).
    InvalidFormat(String),
    /// Reading the source failed part way.
    Io(std::io::Error),
    /// Pattern name not present in the registry.
    Unknown(String),
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "point cloud not found: {}", path.display()),
            Self::InvalidFormat(s) => write!(f, "invalid point cloud: {}", s),
            Self::Io(e) => write!(f, "point cloud read failed: {}", e),
            Self::Unknown(s) => write!(
                f,
                "unknown pattern '{}' (available: {})",
                s,
                super::Pattern::NAMES.join(", ")
            ),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PatternError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::InvalidFormat(format!("truncated: {}", e)),
            std::io::ErrorKind::InvalidData => Self::InvalidFormat(e.to_string()),
            _ => Self::Io(e),
        }
    }
}
