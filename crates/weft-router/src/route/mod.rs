//! Route template parsing and the segment tree.
//!
//! [`param`] turns a single segment pattern like `[:id:int]` into a typed
//! descriptor; [`segment`] is the recursive tree that stores registered
//! templates and resolves navigation paths against them.

pub mod param;
pub(crate) mod segment;

pub use param::ParamDescriptor;
