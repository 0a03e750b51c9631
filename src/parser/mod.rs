// Parser module: raw provider records into the uniform tabular shape.

pub mod market_parser;

pub use market_parser::{MarketParser, Parser};
