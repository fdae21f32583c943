use thiserror::Error;

pub type Result<T, E = BrillError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrillError {
    #[error("invalid argument `{arg}`: {msg}")]
    InvalidArgument { arg: &'static str, msg: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed sentence: {0}")]
    MalformedSentence(String),
    #[error("cannot parse rule `{0}`")]
    ParseRule(String),
    #[error("unknown rule template `{0}`")]
    UnknownTemplate(String),
}

impl BrillError {
    pub(crate) fn invalid_argument<S: Into<String>>(arg: &'static str, msg: S) -> Self {
        BrillError::InvalidArgument {
            arg,
            msg: msg.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ModelLoadingError {
    #[error("cannot read model from file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("malformed model file: {0}")]
    Deserialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ModelSavingError {
    #[error("cannot write model into file: {0}")]
    WriteFile(#[from] std::io::Error),
    #[error("can't serialize model: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CorpusLoadingError {
    #[error("cannot read corpus from file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("malformed corpus: {0}")]
    Parse(#[from] BrillError),
}
