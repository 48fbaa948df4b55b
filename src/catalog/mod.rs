pub mod mishnah;

use lazy_static::lazy_static;
use sha2::{Digest, Sha256};

use crate::error::{PathError, Result};

/// Per-chapter size information for one section.
///
/// Some sections carry verified per-chapter counts, others only a verified
/// total. The variant decides which resolution branch runs; nothing inspects
/// array lengths at lookup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterSizes {
    /// Exact item count for every chapter, in order.
    Exact(Vec<u32>),
    /// Only the section total is known; a local index falls in chapter
    /// `floor(local / average) + 1`.
    Approximate { total_items: u32, chapter_count: u32 },
}

impl ChapterSizes {
    pub fn chapter_count(&self) -> u32 {
        match self {
            ChapterSizes::Exact(sizes) => sizes.len() as u32,
            ChapterSizes::Approximate { chapter_count, .. } => *chapter_count,
        }
    }

    pub fn total_items(&self) -> u32 {
        match self {
            ChapterSizes::Exact(sizes) => sizes.iter().sum(),
            ChapterSizes::Approximate { total_items, .. } => *total_items,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, ChapterSizes::Exact(_))
    }

    /// Average items per chapter, only meaningful for the fallback layout.
    pub fn average(&self) -> Option<f64> {
        match self {
            ChapterSizes::Exact(_) => None,
            ChapterSizes::Approximate {
                total_items,
                chapter_count,
            } => Some(*total_items as f64 / *chapter_count as f64),
        }
    }

    /// Local index of the first item of `chapter` (1-based).
    /// `chapter_count() + 1` yields the section total.
    pub fn chapter_start(&self, chapter: u32) -> u32 {
        let before = chapter.saturating_sub(1);
        match self {
            ChapterSizes::Exact(sizes) => sizes.iter().take(before as usize).sum(),
            ChapterSizes::Approximate {
                total_items,
                chapter_count,
            } => {
                if before >= *chapter_count {
                    *total_items
                } else {
                    fallback_chapter_start(*total_items, *chapter_count, chapter)
                }
            }
        }
    }

    /// Number of items in `chapter` (1-based).
    pub fn chapter_len(&self, chapter: u32) -> u32 {
        self.chapter_start(chapter + 1) - self.chapter_start(chapter)
    }

    fn validate(&self, name: &str) -> Result<()> {
        match self {
            ChapterSizes::Exact(sizes) => {
                if sizes.is_empty() {
                    return Err(PathError::InvalidCatalog(format!(
                        "{}: exact chapter list is empty",
                        name
                    )));
                }
                if let Some(pos) = sizes.iter().position(|&n| n == 0) {
                    return Err(PathError::InvalidCatalog(format!(
                        "{}: chapter {} has no items",
                        name,
                        pos + 1
                    )));
                }
            }
            ChapterSizes::Approximate {
                total_items,
                chapter_count,
            } => {
                if *chapter_count == 0 {
                    return Err(PathError::InvalidCatalog(format!(
                        "{}: no chapters",
                        name
                    )));
                }
                if total_items < chapter_count {
                    return Err(PathError::InvalidCatalog(format!(
                        "{}: {} items cannot fill {} chapters",
                        name, total_items, chapter_count
                    )));
                }
            }
        }
        Ok(())
    }
}

/// `floor((chapter - 1) * average)`: the item offset subtracted when
/// numbering items of `chapter` in a section without exact counts.
/// Floor, never ceiling.
pub(crate) fn fallback_items_before(total_items: u32, chapter_count: u32, chapter: u32) -> u32 {
    let average = total_items as f64 / chapter_count as f64;
    (chapter.saturating_sub(1) as f64 * average).floor() as u32
}

/// `min(floor(local / average) + 1, chapter_count)`.
pub(crate) fn fallback_chapter_of(total_items: u32, chapter_count: u32, local: u32) -> u32 {
    let average = total_items as f64 / chapter_count as f64;
    ((local as f64 / average).floor() as u32 + 1).min(chapter_count)
}

/// First local index that [`fallback_chapter_of`] assigns to `chapter` or later.
///
/// This is not always `fallback_items_before(chapter)`: when `(chapter - 1) *
/// average` is fractional the chapter opens one index later, and its first
/// item is numbered 2.
fn fallback_chapter_start(total_items: u32, chapter_count: u32, chapter: u32) -> u32 {
    let mut start = fallback_items_before(total_items, chapter_count, chapter);
    while start < total_items && fallback_chapter_of(total_items, chapter_count, start) < chapter {
        start += 1;
    }
    while start > 0 && fallback_chapter_of(total_items, chapter_count, start - 1) >= chapter {
        start -= 1;
    }
    start
}

/// One tractate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Transliterated identifier, underscores between words.
    pub name: String,
    pub hebrew: String,
    /// 0-based, corpus-wide. Assigned by [`Catalog::new`].
    pub ordinal: usize,
    pub chapters: ChapterSizes,
}

impl Section {
    pub fn new(name: &str, hebrew: &str, chapters: ChapterSizes) -> Self {
        Section {
            name: name.to_string(),
            hebrew: hebrew.to_string(),
            ordinal: 0,
            chapters,
        }
    }

    pub fn chapter_count(&self) -> u32 {
        self.chapters.chapter_count()
    }

    pub fn total_items(&self) -> u32 {
        self.chapters.total_items()
    }
}

/// A seder: a named run of consecutive sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub name: String,
    pub hebrew: String,
    pub sections: Vec<Section>,
}

impl Order {
    pub fn new(name: &str, hebrew: &str, sections: Vec<Section>) -> Self {
        Order {
            name: name.to_string(),
            hebrew: hebrew.to_string(),
            sections,
        }
    }

    pub fn total_items(&self) -> u32 {
        self.sections.iter().map(Section::total_items).sum()
    }
}

/// Global location of one chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterSpan {
    pub section_index: usize,
    /// 1-based within the section.
    pub chapter: u32,
    /// Global position of the chapter's first item.
    pub start: u32,
    pub len: u32,
}

impl ChapterSpan {
    pub fn positions(&self) -> std::ops::Range<u32> {
        self.start..self.start + self.len
    }
}

#[derive(Debug, Clone, Copy)]
struct SectionSlot {
    order: usize,
    within: usize,
    start: u32,
}

/// Immutable description of the whole corpus.
///
/// Built once, then only read. Tests construct small synthetic catalogs with
/// [`Catalog::from_sections`]; production code uses [`mishnah()`].
#[derive(Debug, Clone)]
pub struct Catalog {
    prefix: String,
    orders: Vec<Order>,
    slots: Vec<SectionSlot>,
    total_items: u32,
    total_chapters: u32,
}

impl Catalog {
    pub fn new(prefix: &str, mut orders: Vec<Order>) -> Result<Self> {
        let mut slots = Vec::new();
        let mut running: u64 = 0;
        let mut total_chapters: u32 = 0;

        for (order_idx, order) in orders.iter_mut().enumerate() {
            for (within, section) in order.sections.iter_mut().enumerate() {
                section.chapters.validate(&section.name)?;
                section.ordinal = slots.len();
                slots.push(SectionSlot {
                    order: order_idx,
                    within,
                    start: running as u32,
                });
                running += section.total_items() as u64;
                total_chapters += section.chapter_count();
            }
        }

        if slots.is_empty() {
            return Err(PathError::InvalidCatalog("catalog has no sections".into()));
        }
        if running > u32::MAX as u64 {
            return Err(PathError::InvalidCatalog(format!(
                "{} items overflow the position range",
                running
            )));
        }

        let catalog = Catalog {
            prefix: prefix.to_string(),
            orders,
            slots,
            total_items: running as u32,
            total_chapters,
        };

        let mut seen = std::collections::HashSet::new();
        for section in catalog.sections() {
            if !seen.insert(normalize_name(&section.name).to_lowercase()) {
                return Err(PathError::InvalidCatalog(format!(
                    "duplicate section name {}",
                    section.name
                )));
            }
        }

        Ok(catalog)
    }

    /// Single-order catalog, mostly for tests and small corpora.
    pub fn from_sections(prefix: &str, sections: Vec<Section>) -> Result<Self> {
        Catalog::new(prefix, vec![Order::new(prefix, "", sections)])
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    pub fn total_chapters(&self) -> u32 {
        self.total_chapters
    }

    pub fn section_count(&self) -> usize {
        self.slots.len()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.orders.iter().flat_map(|o| o.sections.iter())
    }

    pub fn section_at(&self, ordinal: usize) -> Option<&Section> {
        let slot = self.slots.get(ordinal)?;
        Some(&self.orders[slot.order].sections[slot.within])
    }

    /// Global position of the first item of the section at `ordinal`.
    pub fn section_start(&self, ordinal: usize) -> Option<u32> {
        self.slots.get(ordinal).map(|s| s.start)
    }

    pub fn last_section(&self) -> &Section {
        let slot = self.slots[self.slots.len() - 1];
        &self.orders[slot.order].sections[slot.within]
    }

    /// Exact match, then spaces/underscores normalised, then case-insensitive.
    pub fn section_by_name(&self, name: &str) -> Result<&Section> {
        if let Some(section) = self.sections().find(|s| s.name == name) {
            return Ok(section);
        }

        let wanted = normalize_name(name);
        if let Some(section) = self.sections().find(|s| normalize_name(&s.name) == wanted) {
            return Ok(section);
        }

        self.sections()
            .find(|s| normalize_name(&s.name).eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| PathError::UnknownSectionName(name.to_string()))
    }

    pub fn section_by_hebrew(&self, hebrew: &str) -> Result<&Section> {
        let wanted = hebrew.trim();
        self.sections()
            .find(|s| s.hebrew == wanted)
            .ok_or_else(|| PathError::UnknownSectionName(hebrew.to_string()))
    }

    /// Order containing `position`, if in range.
    pub fn order_for_position(&self, position: u32) -> Option<&Order> {
        let mut cumulative: u32 = 0;
        for order in &self.orders {
            let size = order.total_items();
            if position < cumulative + size {
                return Some(order);
            }
            cumulative += size;
        }
        None
    }

    /// Locate a chapter by its corpus-wide, 0-based chapter index.
    pub fn chapter_span(&self, chapter_index: u32) -> Option<ChapterSpan> {
        let mut remaining = chapter_index;
        for (ordinal, slot) in self.slots.iter().enumerate() {
            let section = &self.orders[slot.order].sections[slot.within];
            let count = section.chapter_count();
            if remaining < count {
                let chapter = remaining + 1;
                return Some(ChapterSpan {
                    section_index: ordinal,
                    chapter,
                    start: slot.start + section.chapters.chapter_start(chapter),
                    len: section.chapters.chapter_len(chapter),
                });
            }
            remaining -= count;
        }
        None
    }

    /// SHA-256 over a canonical rendering of the table.
    ///
    /// Two builds that resolve positions identically report the same value.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("prefix|{}\n", self.prefix).as_bytes());
        for order in &self.orders {
            hasher.update(format!("order|{}|{}\n", order.name, order.hebrew).as_bytes());
            for section in &order.sections {
                let layout = match &section.chapters {
                    ChapterSizes::Exact(sizes) => {
                        let sizes: Vec<String> = sizes.iter().map(u32::to_string).collect();
                        format!("exact|{}", sizes.join(","))
                    }
                    ChapterSizes::Approximate {
                        total_items,
                        chapter_count,
                    } => format!("approx|{}|{}", total_items, chapter_count),
                };
                hasher.update(
                    format!("section|{}|{}|{}\n", section.name, section.hebrew, layout).as_bytes(),
                );
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}

lazy_static! {
    static ref MISHNAH: Catalog =
        mishnah::build().expect("built-in Mishnah table passes catalog validation");
}

/// The process-wide Mishnah catalog (built on first use, never mutated).
pub fn mishnah() -> &'static Catalog {
    &MISHNAH
}
