use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Md3Error {
    #[error("an i/o error occurred: {0}")]
    Io(#[from] io::Error),

    #[error("malformed md3 data: {0}")]
    Malformed(String),

    #[error("not an md3 file (magic bytes {0:?})")]
    UnsupportedFormat([u8; 4]),

    #[error("unsupported md3 version {0} (expected 15)")]
    UnsupportedVersion(i32),

    #[error("name '{name}' does not fit in a {width}-byte field")]
    FieldTooLong { name: String, width: usize },

    #[error("shader number {number} is out of range (model has {total} shaders)")]
    OutOfRange { number: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, Md3Error>;
