//! Data model: input values and the node cards built from them.

pub mod card;
pub mod node;
pub mod value;

pub use card::{CardLine, CardMetrics, LineRole};
pub use node::{Node, NodeId, NodeKind};
pub use value::Value;
