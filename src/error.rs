use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArborError {
    #[error("config error: {0}")]
    Config(String),

    #[error("no classifier API key configured. Set one with `arbor-inspect config --set-api-key YOUR_KEY` or export OPENAI_API_KEY")]
    MissingApiKey,

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("classifier call failed: {0}")]
    ClassifierFailure(String),

    #[error("email delivery failed: {0}")]
    DeliveryFailure(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("folder not found: {0}")]
    FolderNotFound(String),

    #[error("no images to analyze: {0}")]
    NoImagesFound(String),

    #[error("too many images: {0} (limit is {1})")]
    TooManyImages(usize, usize),

    #[error("record not found: {0}")]
    RecordNotFound(i64),

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    #[error("CSV export error: {0}")]
    CsvExport(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for ArborError {
    fn from(e: rusqlite::Error) -> Self {
        ArborError::StorageUnavailable(e.to_string())
    }
}

impl From<csv::Error> for ArborError {
    fn from(e: csv::Error) -> Self {
        ArborError::CsvExport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ArborError>;
