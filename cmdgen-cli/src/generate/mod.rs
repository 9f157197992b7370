//! Command generation: validate a source against a template, then render one
//! command per complete row

mod engine;
mod error;

pub use engine::{
    ColumnBindings, CommandRecord, GenerateOptions, GenerationResult, SkippedRow, generate,
    generate_from_template, generate_with,
};
pub use error::GenerateError;
