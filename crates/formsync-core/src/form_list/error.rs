use thiserror::Error;

/// The form list document itself could not be used.
#[derive(Debug, Error)]
pub enum FormListError {
    #[error("form list is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("expected <xforms> root element, found <{0}>")]
    UnexpectedRoot(String),
}
