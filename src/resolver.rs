use serde::Serialize;

use crate::catalog::{
    fallback_chapter_of, fallback_items_before, Catalog, ChapterSizes, ChapterSpan, Section,
};
use crate::display::hebrew_numeral;
use crate::error::{PathError, Result};

/// Corpus-wide, 0-based ordinal of one item.
pub type GlobalPosition = u32;

/// A position resolved against a catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedItem<'a> {
    pub position: GlobalPosition,
    pub section_index: usize,
    pub section: &'a Section,
    /// 1-based.
    pub chapter: u32,
    /// 1-based within the chapter.
    pub item: u32,
    section_start: GlobalPosition,
    prefix: &'a str,
}

impl<'a> ResolvedItem<'a> {
    /// Index of the item within its section, 0-based.
    pub fn local_index(&self) -> u32 {
        self.position - self.section_start
    }

    /// Global position of the section's first item.
    pub fn section_start(&self) -> GlobalPosition {
        self.section_start
    }

    /// Stable cache key: `<Prefix>_<SectionName>.<Chapter>.<Item>`.
    pub fn content_ref(&self) -> String {
        format!(
            "{}_{}.{}.{}",
            self.prefix,
            reference_name(&self.section.name),
            self.chapter,
            self.item
        )
    }

    /// Key of the enclosing chapter: `<Prefix>_<SectionName>.<Chapter>`.
    pub fn chapter_ref(&self) -> String {
        format!(
            "{}_{}.{}",
            self.prefix,
            reference_name(&self.section.name),
            self.chapter
        )
    }

    /// Display form such as `ברכות א:ה`.
    pub fn hebrew_label(&self) -> String {
        format!(
            "{} {}:{}",
            self.section.hebrew,
            hebrew_numeral(self.chapter),
            hebrew_numeral(self.item)
        )
    }

    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            position: self.position,
            section: self.section.name.clone(),
            section_hebrew: self.section.hebrew.clone(),
            chapter: self.chapter,
            item: self.item,
            reference: self.content_ref(),
        }
    }
}

/// Owned, serializable view of a [`ResolvedItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    pub position: GlobalPosition,
    pub section: String,
    pub section_hebrew: String,
    pub chapter: u32,
    pub item: u32,
    pub reference: String,
}

/// Map a global position to its `(section, chapter, item)` triple.
pub fn resolve(catalog: &Catalog, position: GlobalPosition) -> Result<ResolvedItem<'_>> {
    let total = catalog.total_items();
    if position >= total {
        return Err(PathError::out_of_range(position, total));
    }

    let mut running: u32 = 0;
    for (section_index, section) in catalog.sections().enumerate() {
        let size = section.total_items();
        if position < running + size {
            let (chapter, item) = locate_in_section(&section.chapters, position - running);
            return Ok(ResolvedItem {
                position,
                section_index,
                section,
                chapter,
                item,
                section_start: running,
                prefix: catalog.prefix(),
            });
        }
        running += size;
    }

    // Unreachable after the range check.
    Ok(last_item(catalog))
}

/// Resolve an untrusted integer, e.g. one read from a user record.
pub fn resolve_raw(catalog: &Catalog, raw: i64) -> Result<ResolvedItem<'_>> {
    let position = checked_position(catalog, raw)?;
    resolve(catalog, position)
}

pub fn checked_position(catalog: &Catalog, raw: i64) -> Result<GlobalPosition> {
    let total = catalog.total_items();
    if raw < 0 || raw >= total as i64 {
        return Err(PathError::out_of_range(raw, total));
    }
    Ok(raw as GlobalPosition)
}

pub fn content_ref(catalog: &Catalog, position: GlobalPosition) -> Result<String> {
    resolve(catalog, position).map(|r| r.content_ref())
}

/// References for `start..=end`, clamped to the corpus.
pub fn content_refs_for_range(
    catalog: &Catalog,
    start: GlobalPosition,
    end: GlobalPosition,
) -> Vec<String> {
    let total = catalog.total_items();
    let end = end.min(total.saturating_sub(1));
    if start > end || start >= total {
        return Vec::new();
    }
    (start..=end)
        .filter_map(|p| resolve(catalog, p).ok())
        .map(|r| r.content_ref())
        .collect()
}

/// Chapter key for a span located with [`Catalog::chapter_span`].
pub fn chapter_ref(catalog: &Catalog, span: &ChapterSpan) -> Option<String> {
    let section = catalog.section_at(span.section_index)?;
    Some(format!(
        "{}_{}.{}",
        catalog.prefix(),
        reference_name(&section.name),
        span.chapter
    ))
}

/// Chapter and item (both 1-based) for a section-local index.
fn locate_in_section(sizes: &ChapterSizes, local: u32) -> (u32, u32) {
    match sizes {
        ChapterSizes::Exact(sizes) => {
            let mut before: u32 = 0;
            for (idx, &len) in sizes.iter().enumerate() {
                if local < before + len {
                    return (idx as u32 + 1, local - before + 1);
                }
                before += len;
            }
            let last = sizes.len() as u32;
            (last, sizes.last().copied().unwrap_or(1))
        }
        ChapterSizes::Approximate {
            total_items,
            chapter_count,
        } => {
            let chapter = fallback_chapter_of(*total_items, *chapter_count, local);
            let before = fallback_items_before(*total_items, *chapter_count, chapter);
            let item = (local as i64 - before as i64 + 1).max(1) as u32;
            (chapter, item)
        }
    }
}

fn last_item(catalog: &Catalog) -> ResolvedItem<'_> {
    let section = catalog.last_section();
    let position = catalog.total_items() - 1;
    let (chapter, item) = locate_in_section(&section.chapters, section.total_items() - 1);
    ResolvedItem {
        position,
        section_index: catalog.section_count() - 1,
        section,
        chapter,
        item,
        section_start: position + 1 - section.total_items(),
        prefix: catalog.prefix(),
    }
}

fn reference_name(name: &str) -> String {
    name.replace(' ', "_")
}
