pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unrecognized view mode: {name}")]
    InvalidMode { name: String },

    #[error("presentation teardown failed: {message}")]
    Teardown { message: String },
}
