/// Deliberately small error surface: unknown chart or indicator ids degrade
/// to silent no-ops in the store layer (a stale reference must not crash a
/// render), so only the catalog boundary can actually fail.
#[derive(Debug, Clone)]
pub enum AppError {
    CatalogError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::CatalogError(msg) => write!(f, "Catalog Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

pub type CatalogResult<T> = Result<T, AppError>;
