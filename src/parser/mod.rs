pub mod base;
pub mod html;
pub mod record;

pub use base::Parser;
pub use html::JobParser;
pub use record::{JobRecord, CSV_HEADERS, NOT_AVAILABLE, NO_LINK};
