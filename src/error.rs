// Gestion des erreurs personnalisées

use std::fmt;
use std::error::Error as StdError;

#[derive(Debug)]
pub enum AppError {
    /// Ligne d'entrée mal formée (numéro de ligne à partir de 1)
    InputError { line: usize, message: String },
    TopologyError(String),
    ConfigError(String),
    ConvergenceError(String),
    IOError(std::io::Error),
    SerializationError(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputError { line, message } => write!(f, "Input error at line {}: {}", line, message),
            AppError::TopologyError(msg) => write!(f, "Topology error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::ConvergenceError(msg) => write!(f, "Convergence error: {}", msg),
            AppError::IOError(err) => write!(f, "IO error: {}", err),
            AppError::SerializationError(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AppError::IOError(err) => Some(err),
            AppError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IOError(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
