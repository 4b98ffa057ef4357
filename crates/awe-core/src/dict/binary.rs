use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use memmap2::Mmap;
use tracing::{debug, debug_span, warn};

use super::{DictEntry, DictError, Dictionary};
use crate::composer::WordComposer;

pub(super) const HEADER_SIZE: usize = 4;
pub const KEY_SIZE: usize = 5;
pub(super) const OFFSET_SIZE: usize = 4;
pub const RECORD_SIZE: usize = KEY_SIZE + OFFSET_SIZE;
/// Upper bound on matches read per query. Entries past the cap are dropped.
pub const MAX_MATCHES: usize = 100;

enum Region {
    Mapped(Mmap),
    Empty,
}

impl Region {
    fn bytes(&self) -> &[u8] {
        match self {
            Region::Mapped(m) => &m[..],
            Region::Empty => &[],
        }
    }
}

/// Read-only prefix dictionary over a sorted fixed-width key index.
///
/// Layout (big-endian): `item_count: u32`, then `item_count` records of a
/// 5-byte key and a 4-byte body offset, then the body of newline-terminated
/// UTF-8 words. A query reads every consecutive record whose key starts with
/// the query (up to [`MAX_MATCHES`]) and that many lines from the offset of
/// the first one.
///
/// The file is memory-mapped, so concurrent queries do not share a cursor.
/// `close` unmaps it; queries issued afterwards return nothing.
pub struct BinaryDictionary {
    path: PathBuf,
    region: RwLock<Option<Region>>,
}

impl BinaryDictionary {
    /// Open a dictionary file. Fails only if the file cannot be opened or
    /// mapped; a malformed body surfaces as empty query results.
    ///
    /// The file is mapped, not copied: it must not be modified or truncated
    /// while the dictionary is open. Replace it by writing a new file and
    /// renaming it over the old one, as [`BinaryDictionaryBuilder::save`]
    /// does.
    ///
    /// [`BinaryDictionaryBuilder::save`]: super::BinaryDictionaryBuilder::save
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        let region = if file.metadata()?.len() == 0 {
            Region::Empty
        } else {
            // SAFETY: The file is opened read-only and the mapping is immutable.
            // Truncation by another process while mapped faults on access; the
            // file is treated as immutable for the lifetime of the mapping.
            Region::Mapped(unsafe { Mmap::map(&file)? })
        };
        debug!(path = %path.display(), "opened binary dictionary");
        Ok(Self {
            path: path.to_path_buf(),
            region: RwLock::new(Some(region)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the mapping. Safe to call any number of times.
    pub fn close(&self) {
        let mut region = self.region.write().unwrap_or_else(PoisonError::into_inner);
        if region.take().is_some() {
            debug!(path = %self.path.display(), "closed binary dictionary");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.region
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Number of index records declared in the header.
    pub fn item_count(&self) -> Result<u32, DictError> {
        self.with_bytes(|data| read_u32(data, 0))
    }

    /// Prefix search for an already-lowercased query.
    ///
    /// Entries come back in on-disk order; the frequency of line `i` out of
    /// `n` matches is `n - i`. Keys are [`KEY_SIZE`] bytes wide, so a longer
    /// query matches nothing.
    pub fn search(&self, query: &str) -> Result<Vec<DictEntry>, DictError> {
        self.with_bytes(|data| search_bytes(data, query.as_bytes()))
    }

    fn with_bytes<T>(
        &self,
        f: impl FnOnce(&[u8]) -> Result<T, DictError>,
    ) -> Result<T, DictError> {
        let region = self.region.read().unwrap_or_else(PoisonError::into_inner);
        match region.as_ref() {
            Some(r) => f(r.bytes()),
            None => Err(DictError::Closed),
        }
    }
}

impl Dictionary for BinaryDictionary {
    fn lookup(&self, word: &WordComposer, emit: &mut dyn FnMut(&str, u32)) {
        let query = word.typed_word().to_lowercase();
        let _span = debug_span!("binary_lookup", query = %query).entered();
        match self.search(&query) {
            Ok(entries) => {
                debug!(matches = entries.len());
                for e in &entries {
                    emit(&e.word, e.frequency);
                }
            }
            Err(e) => warn!(path = %self.path.display(), "failed to query {query:?}: {e}"),
        }
    }
}

impl Drop for BinaryDictionary {
    fn drop(&mut self) {
        self.close();
    }
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32, DictError> {
    let bytes = data
        .get(offset..offset + 4)
        .ok_or(DictError::Truncated { offset })?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn record_offset(index: usize) -> usize {
    HEADER_SIZE + index * RECORD_SIZE
}

fn key_at(data: &[u8], index: usize) -> Result<&[u8], DictError> {
    let offset = record_offset(index);
    data.get(offset..offset + KEY_SIZE)
        .ok_or(DictError::Truncated { offset })
}

/// Smallest index whose key is `>= query` under byte-wise comparison.
pub(super) fn lower_bound(data: &[u8], item_count: usize, query: &[u8]) -> Result<usize, DictError> {
    let (mut lo, mut hi) = (0usize, item_count);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if key_at(data, mid)? < query {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}

pub(super) fn search_bytes(data: &[u8], query: &[u8]) -> Result<Vec<DictEntry>, DictError> {
    let item_count = read_u32(data, 0)? as usize;
    let body_offset = item_count
        .checked_mul(RECORD_SIZE)
        .and_then(|n| n.checked_add(HEADER_SIZE))
        .ok_or(DictError::InvalidHeader)?;
    if body_offset > data.len() {
        return Err(DictError::Truncated { offset: data.len() });
    }

    let start = lower_bound(data, item_count, query)?;

    // Every record of a prefix run points into the same body block, so only
    // the first offset is read.
    let mut matches = 0usize;
    let mut group_offset = None;
    let mut index = start;
    while index < item_count && matches < MAX_MATCHES {
        if !key_at(data, index)?.starts_with(query) {
            break;
        }
        if group_offset.is_none() {
            group_offset = Some(read_u32(data, record_offset(index) + KEY_SIZE)? as usize);
        }
        matches += 1;
        index += 1;
    }

    let Some(group_offset) = group_offset else {
        return Ok(Vec::new());
    };

    let mut pos = body_offset + group_offset;
    let mut entries = Vec::with_capacity(matches);
    for line in 0..matches {
        let rest = data.get(pos..).ok_or(DictError::Truncated { offset: pos })?;
        let len = rest
            .iter()
            .position(|&b| b == b'\n')
            .ok_or(DictError::Truncated { offset: data.len() })?;
        let word = std::str::from_utf8(&rest[..len]).map_err(|_| DictError::InvalidUtf8)?;
        entries.push(DictEntry::new(word, (matches - line) as u32));
        pos += len + 1;
    }
    Ok(entries)
}
