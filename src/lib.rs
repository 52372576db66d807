//! Serializable data-structure library.
//!
//! Each container keeps an element count, supports clear and deep copy,
//! and implements the [`codec::Serial`] contract: a binary and a text
//! encoding over caller-supplied byte sinks and sources, both
//! round-tripping exact content. The centerpiece is
//! [`full_binary_tree::FullBinaryTree`], which also round-trips exact
//! *shape* through preorder encodings with explicit null markers.

pub mod array;
pub mod codec;
pub mod double_list;
pub mod forward_list;
pub mod full_binary_tree;
pub mod hash_table;
pub mod queue;
pub mod stack;

/// Error returned by the index-addressed operations of [`array::Array`],
/// [`forward_list::ForwardList`] and [`double_list::DoubleList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("index out of range")]
pub struct IndexOutOfRange;
