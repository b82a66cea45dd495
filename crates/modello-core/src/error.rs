use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Definition-time failure: a record type or field descriptor that is
/// internally inconsistent. Raised eagerly while the catalog is built,
/// never deferred to validation time; a broken definition must not be
/// installed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("field '{field}': exact length cannot be combined with min/max length")]
    ConflictingLength { field: &'static str },

    #[error("field '{field}': min length {min} exceeds max length {max}")]
    InvertedLengthBounds {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("field '{field}': choices must not be empty")]
    EmptyChoices { field: &'static str },

    #[error("field '{field}': {places} decimal places exceed max digits {max_digits}")]
    PlacesExceedDigits {
        field: &'static str,
        places: u32,
        max_digits: u32,
    },

    #[error("field '{field}': {places} decimal places exceed the supported maximum of {max}")]
    ExcessivePlaces {
        field: &'static str,
        places: u32,
        max: u32,
    },

    #[error("record '{record}': duplicate field '{field}'")]
    DuplicateField {
        record: &'static str,
        field: &'static str,
    },

    #[error("record '{record}': fields '{left}' and '{right}' share output tag '{tag}'")]
    DuplicateTag {
        record: &'static str,
        tag: String,
        left: &'static str,
        right: &'static str,
    },
}

///
/// Error
///
/// Top-level error for the engine. Validation outcomes are not errors;
/// they travel as [`crate::Report`] data.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Instance(#[from] crate::record::InstanceError),

    #[error(transparent)]
    Render(#[from] crate::record::RenderError),

    #[error(transparent)]
    Tree(#[from] crate::tree::TreeError),
}
