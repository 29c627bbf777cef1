mod arena;
mod handle;
mod iter;
mod node;
mod raw_bst;
mod tree_id;

pub(crate) use handle::Handle;
pub(crate) use iter::RawIter;
pub(crate) use raw_bst::{InsertResult, RawBst};
pub(crate) use tree_id::TreeId;
