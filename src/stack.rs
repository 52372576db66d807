use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::codec::{self, CodecError, Decode, Encode, Serial};

/// LIFO stack over a linked chain of nodes.
pub struct Stack<T> {
    top: Option<Box<SNode<T>>>,
    size: usize,
}

struct SNode<T> {
    value: T,
    next: Option<Box<SNode<T>>>,
}

/// Iterates from the top of the stack down.
pub struct Iter<'a, T> {
    next: Option<&'a SNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Stack { top: None, size: 0 }
    }

    pub fn push(&mut self, value: T) {
        let next = self.top.take();
        self.top = Some(Box::new(SNode { value, next }));
        self.size += 1;
    }

    pub fn pop(&mut self) -> Option<T> {
        self.top.take().map(|mut node| {
            self.top = node.next.take();
            self.size -= 1;
            node.value
        })
    }

    pub fn top(&self) -> Option<&T> {
        self.top.as_deref().map(|node| &node.value)
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.top.as_deref(),
        }
    }
}

impl<T: PartialEq> Stack<T> {
    pub fn find(&self, value: &T) -> bool {
        self.iter().any(|stored| stored == value)
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        let values: Vec<&T> = self.iter().collect();
        let mut stack = Stack::new();
        // push bottom first so the copy keeps the same top
        for value in values.into_iter().rev() {
            stack.push(value.clone());
        }
        stack
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

/// Serialized bottom-to-top, so deserialization re-pushes the elements
/// in stream order and restores the original stack.
impl<T> Serial for Stack<T>
where
    T: Encode + Decode + fmt::Display + FromStr,
{
    fn serialize_binary<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        out.write_u64::<LittleEndian>(self.size as u64)?;
        let values: Vec<&T> = self.iter().collect();
        for value in values.into_iter().rev() {
            value.encode(out)?;
        }
        Ok(())
    }

    fn deserialize_binary<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), CodecError> {
        self.clear();
        let count = input.read_u64::<LittleEndian>()?;
        let mut restored = Stack::new();
        for _ in 0..count {
            restored.push(T::decode(input)?);
        }
        *self = restored;
        Ok(())
    }

    fn serialize_text<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        writeln!(out, "{}", self.size)?;
        let values: Vec<&T> = self.iter().collect();
        for (i, value) in values.into_iter().rev().enumerate() {
            if i > 0 {
                write!(out, " ")?;
            }
            write!(out, "{value}")?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn deserialize_text<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), CodecError> {
        self.clear();
        let text = codec::read_all(input)?;
        let mut tokens = text.split_whitespace();
        let count: u64 = codec::parse_token(codec::next_token(&mut tokens)?)?;
        let mut restored = Stack::new();
        for _ in 0..count {
            restored.push(codec::parse_token(codec::next_token(&mut tokens)?)?);
        }
        *self = restored;
        Ok(())
    }
}
