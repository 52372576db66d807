use std::fmt;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::str::FromStr;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::codec::{self, CodecError, Decode, Encode, Serial};

/// FIFO queue over a linked chain with front and back links.
pub struct Queue<T> {
    front: Link<T>,
    back: Link<T>,
    size: usize,
    _marker: PhantomData<T>,
}

struct QNode<T> {
    value: T,
    next: Link<T>,
}

type Link<T> = Option<NonNull<QNode<T>>>;

/// Iterates from the front of the queue to the back.
pub struct Iter<'a, T> {
    next: Link<T>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: queued links reference live nodes for the borrow's lifetime
        self.next.map(|ptr| unsafe {
            let node = &(*ptr.as_ptr());
            self.next = node.next;
            &node.value
        })
    }
}

fn node_for_value<T>(value: T) -> NonNull<QNode<T>> {
    // SAFETY: we just created raw pointer to non null box
    unsafe {
        NonNull::new_unchecked(Box::into_raw(Box::new(QNode { value, next: None })))
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Queue {
            front: None,
            back: None,
            size: 0,
            _marker: PhantomData,
        }
    }

    pub fn enqueue(&mut self, value: T) {
        let node = node_for_value(value);
        match self.back {
            // SAFETY: back is a live node; linking the fresh one after it
            Some(back) => unsafe { (*back.as_ptr()).next = Some(node) },
            None => self.front = Some(node),
        }
        self.back = Some(node);
        self.size += 1;
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.front.map(|ptr| {
            // SAFETY: the front link owns its node and is released exactly once
            unsafe {
                let node = Box::from_raw(ptr.as_ptr());
                self.front = node.next;
                if self.front.is_none() {
                    self.back = None;
                }
                self.size -= 1;
                node.value
            }
        })
    }

    pub fn front(&self) -> Option<&T> {
        // SAFETY: links reference live nodes owned by this queue
        self.front.map(|ptr| unsafe { &(*ptr.as_ptr()).value })
    }

    pub fn back(&self) -> Option<&T> {
        // SAFETY: links reference live nodes owned by this queue
        self.back.map(|ptr| unsafe { &(*ptr.as_ptr()).value })
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        while self.dequeue().is_some() {}
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.front,
            _marker: PhantomData,
        }
    }
}

impl<T: PartialEq> Queue<T> {
    pub fn find(&self, value: &T) -> bool {
        self.iter().any(|stored| stored == value)
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for Queue<T> {
    fn clone(&self) -> Self {
        let mut queue = Queue::new();
        for value in self.iter() {
            queue.enqueue(value.clone());
        }
        queue
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Serial for Queue<T>
where
    T: Encode + Decode + fmt::Display + FromStr,
{
    fn serialize_binary<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        out.write_u64::<LittleEndian>(self.size as u64)?;
        for value in self.iter() {
            value.encode(out)?;
        }
        Ok(())
    }

    fn deserialize_binary<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), CodecError> {
        self.clear();
        let count = input.read_u64::<LittleEndian>()?;
        let mut restored = Queue::new();
        for _ in 0..count {
            restored.enqueue(T::decode(input)?);
        }
        *self = restored;
        Ok(())
    }

    fn serialize_text<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        writeln!(out, "{}", self.size)?;
        for (i, value) in self.iter().enumerate() {
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
        let mut restored = Queue::new();
        for _ in 0..count {
            restored.enqueue(codec::parse_token(codec::next_token(&mut tokens)?)?);
        }
        *self = restored;
        Ok(())
    }
}
