pub mod export;

pub use export::{load_csv, read_csv, save, write_csv, write_json, ExportFormat};
