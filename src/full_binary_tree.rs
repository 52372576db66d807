use std::collections::VecDeque;
use std::fmt;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::str::{FromStr, SplitWhitespace};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::codec::{self, CodecError, Decode, Encode, Serial};

/// A binary tree in which every node has either zero or exactly two
/// children.
///
/// Insertion attaches a pair of children (both holding the inserted
/// value) to the first leaf found in level order, so the tree fills
/// level by level and its height stays near `log2(len)` without any
/// balancing. Removal deletes leaves in pairs; removing an internal
/// node overwrites it with the value of the last leaf in level order
/// and deletes that leaf pair instead, so the node count shrinks by
/// two per removal (or to zero when the sole root goes).
///
/// Values only need equality, not ordering, and duplicates are fine.
/// Note that because internal removal substitutes a value rather than
/// deleting the matched node, `find(v)` can still be true right after
/// `remove(v)` when another copy of `v` remains reachable.
pub struct FullBinaryTree<T> {
    root: Link<T>,
    size: usize,
    _marker: PhantomData<T>,
}

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

type Link<T> = Option<NonNull<Node<T>>>;

/// Level-order walk yielding each node together with its parent.
/// Lazy and single-use; insert, find and both removal scans run on it.
struct LevelOrder<T> {
    queue: VecDeque<(NonNull<Node<T>>, Link<T>)>,
}

/// Borrowing level-order iterator over the stored values.
pub struct Iter<'a, T> {
    inner: LevelOrder<T>,
    _marker: PhantomData<&'a T>,
}

impl<T> LevelOrder<T> {
    fn new(root: Link<T>) -> Self {
        let mut queue = VecDeque::new();
        if let Some(ptr) = root {
            queue.push_back((ptr, None));
        }
        LevelOrder { queue }
    }
}

impl<T> Iterator for LevelOrder<T> {
    type Item = (NonNull<Node<T>>, Link<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let (ptr, parent) = self.queue.pop_front()?;
        // SAFETY: queued pointers come from live nodes of the tree being walked
        unsafe {
            let node = ptr.as_ref();
            if let Some(left) = node.left {
                self.queue.push_back((left, Some(ptr)));
            }
            if let Some(right) = node.right {
                self.queue.push_back((right, Some(ptr)));
            }
        }
        Some((ptr, parent))
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: the pointer is valid for the lifetime of the borrowed tree
        self.inner.next().map(|(ptr, _)| unsafe { &(*ptr.as_ptr()).value })
    }
}

impl<T> Node<T> {
    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

fn node_for_value<T>(value: T) -> NonNull<Node<T>> {
    // SAFETY: we just created raw pointer to non null box
    unsafe {
        NonNull::new_unchecked(Box::into_raw(Box::new(Node {
            value,
            left: None,
            right: None,
        })))
    }
}

fn destroy<T>(link: Link<T>) {
    if let Some(ptr) = link {
        // SAFETY: every link was produced by Box::into_raw and is released
        // exactly once here
        unsafe {
            let node = Box::from_raw(ptr.as_ptr());
            destroy(node.left);
            destroy(node.right);
        }
    }
}

fn copy_subtree<T: Clone>(link: Link<T>) -> Link<T> {
    link.map(|ptr| {
        // SAFETY: source links reference live nodes; the copy is freshly owned
        unsafe {
            let node = ptr.as_ref();
            let new = node_for_value(node.value.clone());
            (*new.as_ptr()).left = copy_subtree(node.left);
            (*new.as_ptr()).right = copy_subtree(node.right);
            new
        }
    })
}

fn is_full<T>(link: Link<T>) -> bool {
    let Some(ptr) = link else {
        return true;
    };
    // SAFETY: links reference live nodes owned by this tree
    let node = unsafe { ptr.as_ref() };
    if node.left.is_some() != node.right.is_some() {
        return false;
    }
    is_full(node.left) && is_full(node.right)
}

impl<T> FullBinaryTree<T> {
    pub fn new() -> Self {
        FullBinaryTree {
            root: None,
            size: 0,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        destroy(self.root.take());
        self.size = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: LevelOrder::new(self.root),
            _marker: PhantomData,
        }
    }

    /// Checks that every reachable node has zero or two children.
    /// Observational only; mutations uphold this on their own.
    pub fn is_full_binary_tree(&self) -> bool {
        is_full(self.root)
    }
}

impl<T: Clone> FullBinaryTree<T> {
    /// Inserts `value`, keeping every node at zero or two children.
    ///
    /// An empty tree gets `value` as its root. Otherwise the first leaf
    /// in level order receives two new children, both holding `value`.
    pub fn insert(&mut self, value: T) {
        if self.root.is_none() {
            self.root = Some(node_for_value(value));
            self.size = 1;
            return;
        }

        for (ptr, _) in LevelOrder::new(self.root) {
            // SAFETY: the scan stops at the node we mutate; no other
            // pointer to it is dereferenced afterwards
            unsafe {
                let node = &mut *ptr.as_ptr();
                if node.is_leaf() {
                    node.left = Some(node_for_value(value.clone()));
                    node.right = Some(node_for_value(value));
                    self.size += 2;
                    return;
                }
            }
        }
    }
}

impl<T: PartialEq> FullBinaryTree<T> {
    pub fn find(&self, value: &T) -> bool {
        self.iter().any(|stored| stored == value)
    }

    /// Removes one occurrence of `value`; absent values are a no-op.
    ///
    /// A matched leaf is deleted together with its sibling. A matched
    /// internal node instead takes over the value of the last leaf in
    /// level order, and that leaf pair is deleted.
    pub fn remove(&mut self, value: &T) {
        let mut found = None;
        for (ptr, parent) in LevelOrder::new(self.root) {
            // SAFETY: the scan only reads; nothing is mutated until it ends
            if unsafe { ptr.as_ref().value == *value } {
                found = Some((ptr, parent));
                break;
            }
        }
        let Some((target, parent)) = found else {
            return;
        };

        // SAFETY: target and parent are live nodes of this tree
        if unsafe { target.as_ref().is_leaf() } {
            match parent {
                Some(par) => {
                    // SAFETY: the leaf and its sibling are exactly the
                    // parent's two children; taking both keeps the parent
                    // at zero children
                    unsafe {
                        let par = &mut *par.as_ptr();
                        destroy(par.left.take());
                        destroy(par.right.take());
                    }
                    self.size -= 2;
                }
                None => self.clear(),
            }
            return;
        }

        // Internal target: a second full scan finds the last leaf in
        // level order and its parent.
        let mut rightmost = None;
        for (ptr, parent) in LevelOrder::new(self.root) {
            // SAFETY: read-only scan, same as above
            if unsafe { ptr.as_ref().is_leaf() } {
                rightmost = Some((ptr, parent));
            }
        }
        let Some((leaf, leaf_parent)) = rightmost else {
            return;
        };

        // An internal target is never itself the last leaf, and a leaf
        // below an internal node always has a parent.
        if let Some(par) = leaf_parent {
            // SAFETY: detach both children first, then move the leaf's
            // value into the target; the borrows never overlap
            unsafe {
                let (first, second) = {
                    let par = &mut *par.as_ptr();
                    (par.left.take(), par.right.take())
                };
                let (leaf_link, sibling) = if second == Some(leaf) {
                    (second, first)
                } else {
                    (first, second)
                };
                if let Some(ptr) = leaf_link {
                    let leaf_node = Box::from_raw(ptr.as_ptr());
                    (*target.as_ptr()).value = leaf_node.value;
                }
                destroy(sibling);
            }
            self.size -= 2;
        }
    }
}

impl<T> Default for FullBinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for FullBinaryTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for FullBinaryTree<T> {
    fn clone(&self) -> Self {
        FullBinaryTree {
            root: copy_subtree(self.root),
            size: self.size,
            _marker: PhantomData,
        }
    }

    /// Builds the full replacement before releasing anything held here,
    /// so a panic partway through duplication leaves `self` untouched.
    fn clone_from(&mut self, source: &Self) {
        let root = copy_subtree(source.root);
        self.clear();
        self.root = root;
        self.size = source.size;
    }
}

fn write_subtree<T, W>(link: Link<T>, out: &mut W) -> Result<(), CodecError>
where
    T: Encode,
    W: Write + ?Sized,
{
    match link {
        None => Ok(out.write_u8(1)?),
        Some(ptr) => {
            // SAFETY: links reference live nodes owned by this tree
            let node = unsafe { ptr.as_ref() };
            out.write_u8(0)?;
            node.value.encode(out)?;
            write_subtree(node.left, out)?;
            write_subtree(node.right, out)
        }
    }
}

fn read_subtree<T, R>(input: &mut R, count: &mut u64) -> Result<Link<T>, CodecError>
where
    T: Decode,
    R: Read + ?Sized,
{
    match input.read_u8()? {
        1 => Ok(None),
        0 => {
            *count += 1;
            let value = T::decode(input)?;
            let left = read_subtree(input, count)?;
            let right = match read_subtree(input, count) {
                Ok(right) => right,
                Err(err) => {
                    destroy(left);
                    return Err(err);
                }
            };
            let node = node_for_value(value);
            // SAFETY: the node was just allocated and is not yet linked
            unsafe {
                (*node.as_ptr()).left = left;
                (*node.as_ptr()).right = right;
            }
            Ok(Some(node))
        }
        flag => Err(CodecError::InvalidMarker(flag)),
    }
}

fn write_subtree_text<T, W>(link: Link<T>, out: &mut W) -> Result<(), CodecError>
where
    T: fmt::Display,
    W: Write + ?Sized,
{
    match link {
        None => Ok(write!(out, "null ")?),
        Some(ptr) => {
            // SAFETY: links reference live nodes owned by this tree
            let node = unsafe { ptr.as_ref() };
            write!(out, "{} ", node.value)?;
            write_subtree_text(node.left, out)?;
            write_subtree_text(node.right, out)
        }
    }
}

fn read_subtree_text<T: FromStr>(
    tokens: &mut SplitWhitespace<'_>,
    count: &mut u64,
) -> Result<Link<T>, CodecError> {
    let token = codec::next_token(tokens)?;
    if token == "null" {
        return Ok(None);
    }
    *count += 1;
    let value: T = codec::parse_token(token)?;
    let left = read_subtree_text(tokens, count)?;
    let right = match read_subtree_text(tokens, count) {
        Ok(right) => right,
        Err(err) => {
            destroy(left);
            return Err(err);
        }
    };
    let node = node_for_value(value);
    // SAFETY: the node was just allocated and is not yet linked
    unsafe {
        (*node.as_ptr()).left = left;
        (*node.as_ptr()).right = right;
    }
    Ok(Some(node))
}

/// Both encodings are preorder with an explicit null marker per absent
/// child, headed by the node count, so the exact shape round-trips.
impl<T> Serial for FullBinaryTree<T>
where
    T: Encode + Decode + fmt::Display + FromStr,
{
    fn serialize_binary<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        out.write_u64::<LittleEndian>(self.size as u64)?;
        write_subtree(self.root, out)
    }

    fn deserialize_binary<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), CodecError> {
        self.clear();
        let expected = input.read_u64::<LittleEndian>()?;
        let mut count = 0;
        let root = read_subtree(input, &mut count)?;
        if count != expected {
            destroy(root);
            return Err(CodecError::CountMismatch {
                expected,
                found: count,
            });
        }
        self.root = root;
        self.size = count as usize;
        Ok(())
    }

    fn serialize_text<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        writeln!(out, "{}", self.size)?;
        write_subtree_text(self.root, out)?;
        writeln!(out)?;
        Ok(())
    }

    fn deserialize_text<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), CodecError> {
        self.clear();
        let text = codec::read_all(input)?;
        let mut tokens = text.split_whitespace();
        let expected: u64 = codec::parse_token(codec::next_token(&mut tokens)?)?;
        let mut count = 0;
        let root = read_subtree_text(&mut tokens, &mut count)?;
        if count != expected {
            destroy(root);
            return Err(CodecError::CountMismatch {
                expected,
                found: count,
            });
        }
        self.root = root;
        self.size = count as usize;
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for FullBinaryTree<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("FullBinaryTree")
            .field("size", &self.size)
            .field("root", &self.root.map(|ptr| unsafe { ptr.as_ref() }))
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left.map(|ptr| unsafe { ptr.as_ref() }))
            .field("right", &self.right.map(|ptr| unsafe { ptr.as_ref() }))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{Arbitrary, Gen};
    use rand::SeedableRng;
    use rand::seq::SliceRandom;

    use super::FullBinaryTree;
    use crate::codec::{CodecError, Serial};

    fn text_of<T>(tree: &FullBinaryTree<T>) -> String
    where
        FullBinaryTree<T>: Serial,
    {
        let mut out = Vec::new();
        tree.serialize_text(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_after_creation() {
        let tree = FullBinaryTree::<i32>::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert!(tree.is_full_binary_tree());
        assert!(!tree.find(&1));
    }

    #[test]
    fn insert_grows_by_leaf_pairs() {
        let mut tree = FullBinaryTree::new();
        tree.insert(10);
        assert_eq!(tree.len(), 1);
        tree.insert(20);
        assert_eq!(tree.len(), 3);
        tree.insert(30);
        assert_eq!(tree.len(), 5);
        for k in 1..20 {
            let mut tree = FullBinaryTree::new();
            for i in 0..k {
                tree.insert(i);
                assert!(tree.is_full_binary_tree());
            }
            assert_eq!(tree.len(), 1 + 2 * (k - 1) as usize);
        }
    }

    #[test]
    fn level_order_shape_after_three_inserts() {
        let mut tree = FullBinaryTree::new();
        tree.insert(10);
        tree.insert(20);
        tree.insert(30);
        // root 10, its children both 20, first 20 gets the pair of 30s
        let values: Vec<i32> = tree.iter().copied().collect();
        assert_eq!(values, [10, 20, 20, 30, 30]);
        assert_eq!(text_of(&tree), "5\n10 20 30 null null 30 null null 20 null null \n");
        assert!(tree.is_full_binary_tree());
        assert!(tree.find(&30));
        assert!(!tree.find(&99));
    }

    #[test]
    fn insert_then_find() {
        let mut tree = FullBinaryTree::new();
        for i in 0..25 {
            tree.insert(i);
            assert!(tree.find(&i));
        }
    }

    #[test]
    fn find_after_many_shuffled_inserts() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut numbers: Vec<i32> = (0..50).collect();
        numbers.shuffle(&mut rng);

        let mut tree = FullBinaryTree::new();
        for &number in numbers.iter() {
            tree.insert(number);
        }

        assert_eq!(tree.len(), 1 + 2 * 49);
        assert!(tree.is_full_binary_tree());
        for number in 0..50 {
            assert!(tree.find(&number));
        }
        assert!(!tree.find(&50));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut tree = FullBinaryTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.remove(&99);
        assert_eq!(tree.len(), 3);
        assert!(tree.is_full_binary_tree());
    }

    #[test]
    fn remove_leaf_deletes_sibling_pair() {
        let mut tree = FullBinaryTree::new();
        tree.insert(10);
        tree.insert(20);
        tree.insert(30);
        tree.remove(&30);
        assert_eq!(tree.len(), 3);
        assert!(tree.is_full_binary_tree());
        let values: Vec<i32> = tree.iter().copied().collect();
        assert_eq!(values, [10, 20, 20]);
    }

    #[test]
    fn remove_sole_root_empties_tree() {
        let mut tree = FullBinaryTree::new();
        tree.insert(7);
        tree.remove(&7);
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert!(tree.is_full_binary_tree());
    }

    #[test]
    fn remove_internal_substitutes_last_leaf() {
        let mut tree = FullBinaryTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.insert(3);
        // level order before: 1, 2, 2, 3, 3 - the last leaf is the
        // second 3, so removing the root swaps that value in
        tree.remove(&1);
        assert_eq!(tree.len(), 3);
        assert!(tree.is_full_binary_tree());
        let values: Vec<i32> = tree.iter().copied().collect();
        assert_eq!(values, [3, 2, 2]);
        assert!(!tree.find(&1));
    }

    #[test]
    fn removed_value_still_found_via_duplicate() {
        let mut tree = FullBinaryTree::new();
        tree.insert(10);
        tree.insert(20);
        tree.insert(30);
        // both 20s are in the tree; removing 20 hits the internal one,
        // substitutes a 30 into it, and leaves the other 20 reachable
        tree.remove(&20);
        assert_eq!(tree.len(), 3);
        assert!(tree.is_full_binary_tree());
        assert!(tree.find(&20));
        let values: Vec<i32> = tree.iter().copied().collect();
        assert_eq!(values, [10, 30, 20]);
    }

    #[test]
    fn clone_is_deep() {
        let mut tree = FullBinaryTree::new();
        for i in 0..10 {
            tree.insert(i);
        }
        let copy = tree.clone();
        tree.remove(&0);
        assert_eq!(copy.len(), 19);
        assert!(copy.find(&0));
        assert!(copy.is_full_binary_tree());
    }

    #[test]
    fn clone_from_replaces_content() {
        let mut source = FullBinaryTree::new();
        source.insert(1);
        source.insert(2);
        let mut dest = FullBinaryTree::new();
        dest.insert(9);
        dest.clone_from(&source);
        assert_eq!(text_of(&dest), text_of(&source));
    }

    #[test]
    fn binary_layout_of_empty_tree() {
        let tree = FullBinaryTree::<u32>::new();
        let mut bytes = Vec::new();
        tree.serialize_binary(&mut bytes).unwrap();
        assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn binary_layout_of_single_leaf() {
        let mut tree = FullBinaryTree::<u32>::new();
        tree.insert(7);
        let mut bytes = Vec::new();
        tree.serialize_binary(&mut bytes).unwrap();
        assert_eq!(
            bytes,
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0, 1, 1]
        );
    }

    #[test]
    fn text_layout_of_single_leaf() {
        let mut tree = FullBinaryTree::<u32>::new();
        tree.insert(7);
        assert_eq!(text_of(&tree), "1\n7 null null \n");
    }

    #[test]
    fn binary_round_trip() {
        let mut tree = FullBinaryTree::new();
        for i in 0..40 {
            tree.insert(i * 3);
        }
        tree.remove(&9);
        let mut bytes = Vec::new();
        tree.serialize_binary(&mut bytes).unwrap();

        let mut restored = FullBinaryTree::<i32>::new();
        restored.deserialize_binary(&mut bytes.as_slice()).unwrap();
        assert_eq!(restored.len(), tree.len());
        assert!(restored.is_full_binary_tree());
        assert_eq!(text_of(&restored), text_of(&tree));
        for i in 0..40 {
            assert_eq!(restored.find(&(i * 3)), tree.find(&(i * 3)));
        }
    }

    #[test]
    fn text_round_trip() {
        let mut tree = FullBinaryTree::new();
        for i in 0..25 {
            tree.insert(i * 7);
        }
        let mut bytes = Vec::new();
        tree.serialize_text(&mut bytes).unwrap();

        let mut restored = FullBinaryTree::<i32>::new();
        restored.deserialize_text(&mut bytes.as_slice()).unwrap();
        assert_eq!(restored.len(), tree.len());
        assert!(restored.is_full_binary_tree());
        assert_eq!(text_of(&restored), text_of(&tree));
    }

    #[test]
    fn default_serialize_is_binary() {
        let mut tree = FullBinaryTree::<u32>::new();
        tree.insert(7);
        let mut via_default = Vec::new();
        tree.serialize(&mut via_default).unwrap();
        let mut via_binary = Vec::new();
        tree.serialize_binary(&mut via_binary).unwrap();
        assert_eq!(via_default, via_binary);

        let mut restored = FullBinaryTree::<u32>::new();
        restored.deserialize(&mut via_default.as_slice()).unwrap();
        assert_eq!(restored.len(), 1);
    }

    #[test]
    fn truncated_binary_stream_fails_and_clears() {
        let mut tree = FullBinaryTree::new();
        tree.insert(1);
        tree.insert(2);
        let mut bytes = Vec::new();
        tree.serialize_binary(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 1);

        let mut target = FullBinaryTree::<i32>::new();
        target.insert(5);
        let err = target.deserialize_binary(&mut bytes.as_slice());
        assert!(matches!(err, Err(CodecError::Io(_))));
        assert!(target.is_empty());
        assert!(target.is_full_binary_tree());
    }

    #[test]
    fn bad_marker_byte_rejected() {
        let mut bytes = vec![1, 0, 0, 0, 0, 0, 0, 0];
        bytes.push(2);
        let mut target = FullBinaryTree::<u32>::new();
        let err = target.deserialize_binary(&mut bytes.as_slice());
        assert!(matches!(err, Err(CodecError::InvalidMarker(2))));
        assert!(target.is_empty());
    }

    #[test]
    fn binary_count_mismatch_rejected() {
        let mut tree = FullBinaryTree::<u32>::new();
        tree.insert(7);
        let mut bytes = Vec::new();
        tree.serialize_binary(&mut bytes).unwrap();
        // lie in the header
        bytes[0] = 3;

        let mut target = FullBinaryTree::<u32>::new();
        let err = target.deserialize_binary(&mut bytes.as_slice());
        assert!(matches!(
            err,
            Err(CodecError::CountMismatch {
                expected: 3,
                found: 1
            })
        ));
        assert!(target.is_empty());
    }

    #[test]
    fn text_bad_token_rejected() {
        let mut target = FullBinaryTree::<u32>::new();
        target.insert(5);
        let err = target.deserialize_text(&mut "1\nxyz null null\n".as_bytes());
        assert!(matches!(err, Err(CodecError::InvalidToken(token)) if token == "xyz"));
        assert!(target.is_empty());
    }

    #[test]
    fn text_truncated_stream_rejected() {
        let mut target = FullBinaryTree::<u32>::new();
        let err = target.deserialize_text(&mut "3\n7 null\n".as_bytes());
        assert!(matches!(err, Err(CodecError::UnexpectedEnd)));
        assert!(target.is_empty());
    }

    #[test]
    fn text_count_mismatch_rejected() {
        let mut target = FullBinaryTree::<u32>::new();
        let err = target.deserialize_text(&mut "3\n7 null null\n".as_bytes());
        assert!(matches!(
            err,
            Err(CodecError::CountMismatch {
                expected: 3,
                found: 1
            })
        ));
        assert!(target.is_empty());
    }

    #[derive(Copy, Clone, Debug)]
    enum Op {
        Insert(i16),
        Remove(i16),
    }

    impl Arbitrary for Op {
        fn arbitrary(g: &mut Gen) -> Self {
            match g.choose(&[0, 1]).unwrap() {
                0 => Op::Insert(i16::arbitrary(g)),
                _ => Op::Remove(i16::arbitrary(g)),
            }
        }
    }

    #[test]
    fn invariant_holds_over_random_op_sequences() {
        fn prop(ops: Vec<Op>) -> bool {
            let mut tree = FullBinaryTree::new();
            for op in ops {
                match op {
                    Op::Insert(value) => tree.insert(value),
                    Op::Remove(value) => tree.remove(&value),
                }
                let len_ok = tree.len() == 0 || tree.len() % 2 == 1;
                if !tree.is_full_binary_tree() || !len_ok || tree.iter().count() != tree.len() {
                    return false;
                }
            }
            true
        }
        quickcheck::quickcheck(prop as fn(Vec<Op>) -> bool);
    }
}
