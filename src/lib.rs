pub mod ast;
pub mod catalog;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod relation;
pub mod report;
pub mod server;
pub mod suggest;
pub mod table;
pub mod types;
pub mod validator;
pub mod value;

use wasm_bindgen::prelude::*;

use catalog::CatalogReport;
use parser::Parser;

pub use error::ValidationError;
pub use options::{OptionSchema, RawOption};
pub use server::{ServerConfig, resolve_server};
pub use table::{PhysicalColumn, TableConfig, load_table, resolve_table, validate};
pub use validator::{ObjectKind, validate_options};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Check a catalog definition and render the report.
///
/// Fails only if the source cannot be parsed; rejected objects are part of
/// the report.
#[wasm_bindgen(js_name = "checkCatalog")]
pub fn check_catalog(source: &str) -> Result<String, String> {
    let mut parser = Parser::new(source).map_err(|e| e.to_string())?;
    let catalog = parser.parse().map_err(|e| e.to_string())?;

    let checked = CatalogReport::check(&catalog);
    Ok(report::render(&checked))
}
