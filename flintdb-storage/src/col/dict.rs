//! Dictionary compressed column.
//!
//! Each distinct value is stored once, together with the number of
//! rows currently citing it. The position vector holds one dictionary
//! handle per row, so the column body is a dense array of small
//! integers regardless of the element type.

use crate::col::sidecar;
use crate::col::{Column, Tid};
use crate::error::{Error, Result};
use crate::value::{ColType, Val};
use flintdb_datatype::AttrType;
use log::debug;
use semistr::SemiStr;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::mem;
use std::path::Path;

/// Handle to a dictionary slot. A handle stays valid while its entry
/// is live; eviction recycles the slot through the free list.
pub type EntryId = u32;

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    refs: usize,
}

/// Slot arena plus an ordered index from value to slot.
///
/// Handles are arena indices, so they survive insertion of other
/// entries and refcount changes. The BTreeMap gives the serializer a
/// deterministic traversal order over the live entries.
#[derive(Debug, Clone)]
struct Dict<T: ColType> {
    slots: Vec<Option<Entry<T>>>,
    index: BTreeMap<T, EntryId>,
    free: Vec<EntryId>,
}

impl<T: ColType> Dict<T> {
    #[inline]
    fn new() -> Self {
        Dict {
            slots: vec![],
            index: BTreeMap::new(),
            free: vec![],
        }
    }

    /// Number of live entries.
    #[inline]
    fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    fn entry(&self, id: EntryId) -> &Entry<T> {
        self.slots[id as usize]
            .as_ref()
            .expect("vacant dictionary slot")
    }

    #[inline]
    fn value(&self, id: EntryId) -> &T {
        &self.entry(id).value
    }

    /// Bump the entry for `value`, creating it with one reference if
    /// it does not exist yet.
    fn acquire(&mut self, value: T) -> EntryId {
        if let Some(&id) = self.index.get(&value) {
            self.slots[id as usize]
                .as_mut()
                .expect("vacant dictionary slot")
                .refs += 1;
            return id;
        }
        self.insert_new(value, 1)
    }

    /// Drop one reference. The entry is evicted when its last
    /// reference goes away; the caller must have already overwritten
    /// or removed every position slot citing it.
    fn release(&mut self, id: EntryId) {
        let slot = &mut self.slots[id as usize];
        let entry = slot.as_mut().expect("vacant dictionary slot");
        debug_assert!(entry.refs > 0, "dictionary refcount underflow");
        entry.refs -= 1;
        if entry.refs == 0 {
            let entry = slot.take().expect("vacant dictionary slot");
            self.index.remove(&entry.value);
            self.free.push(id);
        }
    }

    /// Install a new entry with an explicit refcount, rejecting
    /// duplicates. Only the sidecar loader takes this path.
    fn emplace(&mut self, value: T, refs: usize) -> Result<EntryId> {
        if refs == 0 || self.index.contains_key(&value) {
            return Err(Error::InvalidFormat);
        }
        Ok(self.insert_new(value, refs))
    }

    fn insert_new(&mut self, value: T, refs: usize) -> EntryId {
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id as usize] = Some(Entry {
                    value: value.clone(),
                    refs,
                });
                id
            }
            None => {
                debug_assert!(self.slots.len() < EntryId::MAX as usize);
                let id = self.slots.len() as EntryId;
                self.slots.push(Some(Entry {
                    value: value.clone(),
                    refs,
                }));
                id
            }
        };
        self.index.insert(value, id);
        id
    }

    #[inline]
    fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.free.clear();
    }
}

/// A single-attribute in-memory column with dictionary encoding.
///
/// Implements [`Column`] for the dynamic boundary and offers typed
/// access on top.
#[derive(Debug, Clone)]
pub struct DictionaryColumn<T: ColType> {
    name: SemiStr,
    dict: Dict<T>,
    position: Vec<EntryId>,
}

impl<T: ColType> DictionaryColumn<T> {
    #[inline]
    pub fn new(name: &str) -> Self {
        DictionaryColumn {
            name: SemiStr::new(name),
            dict: Dict::new(),
            position: vec![],
        }
    }

    /// Append one row. The new row's TID equals the prior row count.
    #[inline]
    pub fn push(&mut self, value: T) {
        let id = self.dict.acquire(value);
        self.position.push(id);
    }

    /// Append each element in iteration order.
    #[inline]
    pub fn push_from<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.push(value);
        }
    }

    /// Borrow the value of one row. None when `tid` is out of range.
    #[inline]
    pub fn value(&self, tid: Tid) -> Option<&T> {
        self.position
            .get(tid as usize)
            .map(|&id| self.dict.value(id))
    }

    /// Row-order iteration over the decoded values.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.position.iter().map(|&id| self.dict.value(id))
    }

    /// Number of distinct values currently referenced.
    #[inline]
    pub fn dict_len(&self) -> usize {
        self.dict.len()
    }

    /// Number of rows currently holding `value`. Zero when the value
    /// is not in the dictionary.
    #[inline]
    pub fn occurrences(&self, value: &T) -> usize {
        match self.dict.index.get(value) {
            Some(&id) => self.dict.entry(id).refs,
            None => 0,
        }
    }

    #[inline]
    fn tid_index(&self, tid: Tid) -> Result<usize> {
        if (tid as usize) < self.position.len() {
            Ok(tid as usize)
        } else {
            Err(Error::IndexOutOfBound)
        }
    }

    fn store_values(&self, path: &Path) -> Result<Vec<usize>> {
        let mut writer = sidecar::create(path)?;
        // dense ordinals in index traversal order; vacant slots keep
        // a sentinel that no position can reach.
        let mut ordinals = vec![usize::MAX; self.dict.slots.len()];
        for (ordinal, (value, &id)) in self.dict.index.iter().enumerate() {
            writeln!(writer, "{} {}", self.dict.entry(id).refs, value)?;
            ordinals[id as usize] = ordinal;
        }
        writer.flush()?;
        Ok(ordinals)
    }

    fn store_position(&self, path: &Path, ordinals: &[usize]) -> Result<()> {
        let mut writer = sidecar::create(path)?;
        for &id in &self.position {
            writeln!(writer, "{}", ordinals[id as usize])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn load_values(path: &Path) -> Result<(Dict<T>, Vec<EntryId>)> {
        let reader = sidecar::open(path)?;
        let mut dict = Dict::new();
        let mut handles = vec![];
        for line in reader.lines() {
            let line = line?;
            let (refs, text) = line.split_once(' ').ok_or(Error::InvalidFormat)?;
            let refs: usize = refs.parse()?;
            let value = T::parse_text(text)?;
            handles.push(dict.emplace(value, refs)?);
        }
        Ok((dict, handles))
    }

    fn load_position(path: &Path, handles: &[EntryId]) -> Result<Vec<EntryId>> {
        let reader = sidecar::open(path)?;
        let mut position = vec![];
        for line in reader.lines() {
            let ordinal: usize = line?.trim().parse()?;
            let id = *handles.get(ordinal).ok_or(Error::InvalidFormat)?;
            position.push(id);
        }
        Ok(position)
    }
}

impl<T: ColType> Column for DictionaryColumn<T> {
    #[inline]
    fn name(&self) -> &str {
        self.name.as_str()
    }

    #[inline]
    fn attr_type(&self) -> AttrType {
        T::ATTR_TYPE
    }

    fn insert(&mut self, val: Val) -> Result<()> {
        if val.is_null() {
            return Err(Error::EmptyValue);
        }
        let value = T::from_val(val).ok_or(Error::TypeMismatch)?;
        self.push(value);
        Ok(())
    }

    fn get(&self, tid: Tid) -> Result<Val> {
        let idx = self.tid_index(tid)?;
        Ok(self.dict.value(self.position[idx]).clone().into_val())
    }

    fn update(&mut self, tid: Tid, val: Val) -> Result<()> {
        if val.is_null() {
            return Err(Error::EmptyValue);
        }
        let value = T::from_val(val).ok_or(Error::TypeMismatch)?;
        let idx = self.tid_index(tid)?;
        // Release before acquire: a self-update of a single-reference
        // value must evict and recreate, never double-count.
        self.dict.release(self.position[idx]);
        self.position[idx] = self.dict.acquire(value);
        Ok(())
    }

    fn remove(&mut self, tid: Tid) -> Result<()> {
        let idx = self.tid_index(tid)?;
        self.dict.release(self.position[idx]);
        // dense renumbering: every later row shifts down by one.
        self.position.remove(idx);
        Ok(())
    }

    #[inline]
    fn clear(&mut self) {
        self.dict.clear();
        self.position.clear();
    }

    #[inline]
    fn len(&self) -> usize {
        self.position.len()
    }

    fn mem_usage(&self) -> usize {
        self.position.capacity() * mem::size_of::<EntryId>()
            + self.dict.len() * (mem::size_of::<usize>() + mem::size_of::<T>())
    }

    fn store(&self, path: &Path) -> Result<()> {
        let ordinals = self.store_values(&sidecar::values_path(path))?;
        self.store_position(&sidecar::position_path(path), &ordinals)?;
        debug!(
            "stored column {}: {} rows, {} distinct values",
            self.name.as_str(),
            self.position.len(),
            self.dict.len()
        );
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let (dict, handles) = Self::load_values(&sidecar::values_path(path))?;
        let position = Self::load_position(&sidecar::position_path(path), &handles)?;
        // stored refcounts must agree with the positions citing them,
        // otherwise the sidecar pair is inconsistent.
        let mut counts = vec![0usize; dict.slots.len()];
        for &id in &position {
            counts[id as usize] += 1;
        }
        for (i, slot) in dict.slots.iter().enumerate() {
            let entry = slot.as_ref().expect("vacant dictionary slot");
            if entry.refs != counts[i] {
                return Err(Error::InvalidFormat);
            }
        }
        self.dict = dict;
        self.position = position;
        debug!(
            "loaded column {}: {} rows, {} distinct values",
            self.name.as_str(),
            self.position.len(),
            self.dict.len()
        );
        Ok(())
    }

    fn copy(&self) -> Box<dyn Column> {
        // handles are arena indices, so a member-wise clone already
        // refers to the clone's own dictionary.
        Box::new(self.clone())
    }
}

#[cfg(test)]
impl<T: ColType> DictionaryColumn<T> {
    /// Recount every invariant the structure relies on.
    pub(crate) fn assert_consistent(&self) {
        let mut counts = vec![0usize; self.dict.slots.len()];
        for &id in &self.position {
            assert!(
                self.dict.slots[id as usize].is_some(),
                "position cites vacant slot"
            );
            counts[id as usize] += 1;
        }
        for (i, slot) in self.dict.slots.iter().enumerate() {
            match slot {
                Some(entry) => {
                    assert!(entry.refs > 0, "live entry with zero refs");
                    assert_eq!(entry.refs, counts[i], "refcount drift");
                    assert_eq!(self.dict.index.get(&entry.value), Some(&(i as EntryId)));
                }
                None => {
                    assert_eq!(counts[i], 0);
                    assert!(self.dict.free.contains(&(i as EntryId)));
                }
            }
        }
        assert_eq!(self.dict.index.len() + self.dict.free.len(), self.dict.slots.len());
    }
}
