#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected document: {0}")]
    UnexpectedDocument(&'static str),

    #[error("mongo error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}
