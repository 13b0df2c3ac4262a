//! Response decoding.

mod node;
mod parser;

pub use node::Node;
pub use parser::ResponseParser;
