use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::IndexOutOfRange;
use crate::codec::{self, CodecError, Decode, Encode, Serial};

/// Growable array with doubling capacity.
#[derive(Clone)]
pub struct Array<T> {
    data: Vec<T>,
}

impl<T> Array<T> {
    pub fn new() -> Self {
        Array { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Array {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: T) {
        self.grow_if_full();
        self.data.push(value);
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfRange> {
        if index > self.data.len() {
            return Err(IndexOutOfRange);
        }
        self.grow_if_full();
        self.data.insert(index, value);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<T, IndexOutOfRange> {
        if index >= self.data.len() {
            return Err(IndexOutOfRange);
        }
        Ok(self.data.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<(), IndexOutOfRange> {
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(IndexOutOfRange),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    // Doubles the buffer once it is full, so a run of pushes reallocates
    // O(log n) times.
    fn grow_if_full(&mut self) {
        if self.data.len() == self.data.capacity() {
            let grown = if self.data.capacity() == 0 {
                1
            } else {
                self.data.capacity()
            };
            self.data.reserve_exact(grown);
        }
    }
}

impl<T: PartialEq> Array<T> {
    pub fn find(&self, value: &T) -> bool {
        self.data.iter().any(|stored| stored == value)
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T> Serial for Array<T>
where
    T: Encode + Decode + fmt::Display + FromStr,
{
    fn serialize_binary<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        out.write_u64::<LittleEndian>(self.data.len() as u64)?;
        for value in &self.data {
            value.encode(out)?;
        }
        Ok(())
    }

    fn deserialize_binary<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), CodecError> {
        self.clear();
        let count = input.read_u64::<LittleEndian>()?;
        // decoded into a fresh buffer so a failed stream leaves self cleared
        let mut restored = Array::new();
        for _ in 0..count {
            restored.push(T::decode(input)?);
        }
        *self = restored;
        Ok(())
    }

    fn serialize_text<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        writeln!(out, "{}", self.data.len())?;
        for (i, value) in self.data.iter().enumerate() {
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
        let mut restored = Array::new();
        for _ in 0..count {
            restored.push(codec::parse_token(codec::next_token(&mut tokens)?)?);
        }
        *self = restored;
        Ok(())
    }
}
