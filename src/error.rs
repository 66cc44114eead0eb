#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown validation error category: {name}")]
    UnknownCategory { name: String },
}
