pub mod analyzer;
pub mod error;
pub mod fetch;
pub mod model;
pub mod output;
pub mod parser;
pub mod store;
