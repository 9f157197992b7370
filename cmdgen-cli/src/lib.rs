//! Generate batches of text commands from spreadsheet rows.
//!
//! A command template such as `Mod Bscex:MSISDN={x},SMSRouterID={y};` names
//! its variables in braces. Each data row of a spreadsheet whose header
//! contains those names yields one command; rows with a blank required value
//! are skipped and reported.
//!
//! ```
//! use cmdgen::generate::{GenerateOptions, generate_from_template};
//! use cmdgen::table::MemorySource;
//!
//! let source = MemorySource::new(["x", "y"])
//!     .with_cells([Some(1001_i64), Some(5)])
//!     .with_cells([None, Some(6_i64)]);
//!
//! let result = generate_from_template(
//!     "Mod Bscex:MSISDN={x},SMSRouterID={y};",
//!     &source,
//!     &GenerateOptions::default(),
//! )?;
//! assert_eq!(result.command_strings(), ["Mod Bscex:MSISDN=1001,SMSRouterID=5;"]);
//! assert_eq!(result.skipped_rows(), [3]);
//! # Ok::<(), cmdgen::generate::GenerateError>(())
//! ```

pub mod cli;
pub mod config;
pub mod generate;
pub mod output;
pub mod table;
pub mod template;

pub use generate::{GenerateError, GenerationResult, generate, generate_from_template};
pub use table::{CellValue, TabularSource};
pub use template::{Template, VariableSet, extract_variables};
