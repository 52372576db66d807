use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};
use std::str::FromStr;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::codec::{self, CodecError, Decode, Encode, Serial};

const INITIAL_BUCKETS: usize = 16;
const MAX_LOAD_FACTOR: f64 = 0.75;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over whatever bytes the key's `Hash` impl feeds in.
struct Fnv1a(u64);

impl Hasher for Fnv1a {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= u64::from(byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }
}

/// Separate-chaining hash table. Buckets double once the load factor
/// passes 0.75.
pub struct HashTable<K, V> {
    buckets: Vec<Option<Box<Entry<K, V>>>>,
    size: usize,
}

struct Entry<K, V> {
    key: K,
    value: V,
    next: Option<Box<Entry<K, V>>>,
}

pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Option<Box<Entry<K, V>>>>,
    chain: Option<&'a Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                return Some((&entry.key, &entry.value));
            }
            match self.buckets.next() {
                Some(slot) => self.chain = slot.as_deref(),
                None => return None,
            }
        }
    }
}

fn bucket_index<K: Hash>(bucket_count: usize, key: &K) -> usize {
    let mut hasher = Fnv1a(FNV_OFFSET);
    key.hash(&mut hasher);
    (hasher.finish() % bucket_count as u64) as usize
}

fn empty_buckets<K, V>(count: usize) -> Vec<Option<Box<Entry<K, V>>>> {
    (0..count).map(|_| None).collect()
}

impl<K, V> HashTable<K, V> {
    pub fn new() -> Self {
        Self::with_buckets(INITIAL_BUCKETS)
    }

    pub fn with_buckets(count: usize) -> Self {
        let count = if count == 0 { INITIAL_BUCKETS } else { count };
        HashTable {
            buckets: empty_buckets(count),
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    pub fn clear(&mut self) {
        for slot in &mut self.buckets {
            // unlink entries one at a time so dropping a chain cannot recurse
            let mut chain = slot.take();
            while let Some(mut entry) = chain {
                chain = entry.next.take();
            }
        }
        self.size = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
        }
    }
}

impl<K: Eq + Hash, V> HashTable<K, V> {
    /// Inserts the pair, overwriting the value of an existing key.
    pub fn insert(&mut self, key: K, value: V) {
        if self.load_factor() > MAX_LOAD_FACTOR {
            self.rehash();
        }

        let index = bucket_index(self.buckets.len(), &key);
        let mut cur = &mut self.buckets[index];
        while let Some(entry) = cur {
            if entry.key == key {
                entry.value = value;
                return;
            }
            cur = &mut entry.next;
        }

        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Entry { key, value, next }));
        self.size += 1;
    }

    pub fn remove(&mut self, key: &K) -> bool {
        let index = bucket_index(self.buckets.len(), key);
        let mut cur = &mut self.buckets[index];
        loop {
            match cur.take() {
                None => return false,
                Some(mut entry) => {
                    if entry.key == *key {
                        *cur = entry.next.take();
                        self.size -= 1;
                        return true;
                    }
                    cur = &mut cur.insert(entry).next;
                }
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let index = bucket_index(self.buckets.len(), key);
        let mut cur = self.buckets[index].as_deref();
        while let Some(entry) = cur {
            if entry.key == *key {
                return Some(&entry.value);
            }
            cur = entry.next.as_deref();
        }
        None
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = bucket_index(self.buckets.len(), key);
        let mut cur = self.buckets[index].as_deref_mut();
        while let Some(entry) = cur {
            if entry.key == *key {
                return Some(&mut entry.value);
            }
            cur = entry.next.as_deref_mut();
        }
        None
    }

    pub fn find(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    // Doubles the bucket vector and relinks every entry under its new
    // index.
    fn rehash(&mut self) {
        let new_count = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_count));
        self.size = 0;
        for mut slot in old {
            while let Some(mut entry) = slot {
                slot = entry.next.take();
                let index = bucket_index(new_count, &entry.key);
                entry.next = self.buckets[index].take();
                self.buckets[index] = Some(entry);
                self.size += 1;
            }
        }
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for HashTable<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Eq + Hash + Clone, V: Clone> Clone for HashTable<K, V> {
    fn clone(&self) -> Self {
        let mut table = HashTable::with_buckets(self.buckets.len());
        for (key, value) in self.iter() {
            table.insert(key.clone(), value.clone());
        }
        table
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for HashTable<K, V> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}

/// The binary layout leads with the bucket count, then the size, then
/// the pairs; the text layout leads with `size bucket_count`. Both
/// rebuild through `insert`, so restored chains land under the restored
/// bucket count.
impl<K, V> Serial for HashTable<K, V>
where
    K: Encode + Decode + fmt::Display + FromStr + Eq + Hash,
    V: Encode + Decode + fmt::Display + FromStr,
{
    fn serialize_binary<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        out.write_u64::<LittleEndian>(self.buckets.len() as u64)?;
        out.write_u64::<LittleEndian>(self.size as u64)?;
        for (key, value) in self.iter() {
            key.encode(out)?;
            value.encode(out)?;
        }
        Ok(())
    }

    fn deserialize_binary<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), CodecError> {
        self.clear();
        let bucket_count = input.read_u64::<LittleEndian>()?;
        let count = input.read_u64::<LittleEndian>()?;
        let mut restored = HashTable::with_buckets(bucket_count as usize);
        for _ in 0..count {
            let key = K::decode(input)?;
            let value = V::decode(input)?;
            restored.insert(key, value);
        }
        *self = restored;
        Ok(())
    }

    fn serialize_text<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        writeln!(out, "{} {}", self.size, self.buckets.len())?;
        for (key, value) in self.iter() {
            writeln!(out, "{key} {value}")?;
        }
        Ok(())
    }

    fn deserialize_text<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), CodecError> {
        self.clear();
        let text = codec::read_all(input)?;
        let mut tokens = text.split_whitespace();
        let count: u64 = codec::parse_token(codec::next_token(&mut tokens)?)?;
        let bucket_count: u64 = codec::parse_token(codec::next_token(&mut tokens)?)?;
        let mut restored = HashTable::with_buckets(bucket_count as usize);
        for _ in 0..count {
            let key = codec::parse_token(codec::next_token(&mut tokens)?)?;
            let value = codec::parse_token(codec::next_token(&mut tokens)?)?;
            restored.insert(key, value);
        }
        *self = restored;
        Ok(())
    }
}
