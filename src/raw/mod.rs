mod node;
mod raw_rb_tree_map;

pub(crate) use node::Node;
pub(crate) use raw_rb_tree_map::RawRBTreeMap;
