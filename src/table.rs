//! The transposition table: one byte per index over a shared file mapping or
//! an anonymous map. Bytes persist across runs in file-backed mode; the
//! mapping is flushed on drop, which also covers the SIGINT unwind path.

use std::fs::OpenOptions;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use memmap2::{MmapMut, MmapOptions};

use crate::codec::TableIndex;

/// Round-trip-verified by the check scan.
pub const LEGAL: u8 = 0x01;
/// Side to move wins with perfect play.
pub const WIN: u8 = 0x02;
/// Side to move loses with perfect play.
pub const LOSS: u8 = 0x04;

const DEPTH_TAG_SHIFT: u32 = 3;
const DEPTH_TAG_MAX: u8 = 0x1F;

/// Lifetime counters for the driver's per-iteration report.
#[derive(Clone, Copy, Debug, Default)]
pub struct Counters {
    pub wins: u64,
    pub losses: u64,
    pub queries: u64,
    pub matches: u64,
}

pub struct Table {
    map: MmapMut,
    size: u64,
    pub counters: Counters,
}

impl Table {
    /// Anonymous in-memory table; nothing survives the process.
    pub fn anonymous(size: u64) -> io::Result<Self> {
        let map = MmapOptions::new().len(size as usize).map_anon()?;
        Ok(Self {
            map,
            size,
            counters: Counters::default(),
        })
    }

    /// File-backed table. The file is grown by writing one 0xFF sentinel at
    /// offset `size` (the table bytes themselves stay sparse zeros on first
    /// creation) and mapped shared-writable.
    pub fn open(path: &Path, size: u64) -> io::Result<Self> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        file.seek(SeekFrom::Start(size))?;
        file.write_all(&[0xFF])?;
        let map = unsafe { MmapOptions::new().len(size as usize).map_mut(&file)? };
        Ok(Self {
            map,
            size,
            counters: Counters::default(),
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Record a search result: sets WIN or LOSS for a nonzero `result` and
    /// raises the depth tag to depth/2. Returns the byte written, or the bare
    /// verdict bits when the index cannot be stored (out of range or the
    /// encode-miss sentinel). The win/loss counters tick either way.
    pub fn enter(&mut self, index: TableIndex, depth: i32, result: i8) -> u8 {
        let verdict = if result > 0 {
            self.counters.wins += 1;
            WIN
        } else if result < 0 {
            self.counters.losses += 1;
            LOSS
        } else {
            0
        };

        if index.0 >= self.size {
            return verdict;
        }

        let byte = &mut self.map[index.0 as usize];
        let tag = (*byte >> DEPTH_TAG_SHIFT).max((depth / 2) as u8 & DEPTH_TAG_MAX);
        *byte = (*byte & 0x07) | (tag << DEPTH_TAG_SHIFT) | verdict;
        *byte
    }

    /// Probe for a stored verdict at the given depth budget. A hit returns
    /// ±1 for WIN/LOSS or 0 when the entry's depth tag already covers the
    /// budget. A miss raises the stored tag to depth/2, so a repetition
    /// reaching this index again before [`Table::enter`] reads as a draw
    /// instead of recursing forever.
    pub fn query(&mut self, index: TableIndex, depth: i32) -> Option<i8> {
        self.counters.queries += 1;

        if index.0 >= self.size {
            return None;
        }

        let byte = &mut self.map[index.0 as usize];
        let result = if *byte & (WIN | LOSS) != 0 {
            if *byte & WIN != 0 {
                1
            } else {
                -1
            }
        } else if (*byte >> DEPTH_TAG_SHIFT) as i32 * 2 >= depth {
            0
        } else {
            if ((*byte >> DEPTH_TAG_SHIFT) as i32) < depth / 2 {
                *byte = (*byte & 0x07) | (((depth / 2) as u8 & DEPTH_TAG_MAX) << DEPTH_TAG_SHIFT);
            }
            return None;
        };

        self.counters.matches += 1;
        Some(result)
    }

    /// Raw byte for the scan modes; `index` must be in range.
    pub fn get(&self, index: u64) -> u8 {
        self.map[index as usize]
    }

    /// Mark an index round-trip-verified (check mode).
    pub fn mark_legal(&mut self, index: u64) {
        self.map[index as usize] |= LEGAL;
    }

    /// Drop everything but the LEGAL bit (empty mode).
    pub fn retain_legal(&mut self, index: u64) {
        self.map[index as usize] &= LEGAL;
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        if let Err(err) = self.map.flush() {
            log::warn!("table flush failed: {err}");
        }
    }
}
