mod node;
mod raw_ordered_index;

pub(crate) use node::Node;
pub(crate) use raw_ordered_index::RawOrderedIndex;
