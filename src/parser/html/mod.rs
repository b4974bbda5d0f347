mod job_parser;

pub use job_parser::JobParser;
