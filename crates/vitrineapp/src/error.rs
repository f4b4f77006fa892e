use thiserror::Error;

#[derive(Error, Debug)]
pub enum VitrineError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Cart error: {0}")]
    Cart(String),

    #[error("Login error: {0}")]
    Login(String),
}

pub type Result<T> = std::result::Result<T, VitrineError>;
