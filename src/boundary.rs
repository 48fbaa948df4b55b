use serde::Serialize;

use crate::catalog::{Catalog, ChapterSizes};
use crate::error::Result;
use crate::resolver::{resolve, GlobalPosition, ResolvedItem};

/// Chapter / section end flags for one resolved position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Boundary {
    pub chapter_end: bool,
    pub section_end: bool,
}

impl Boundary {
    /// Derive both flags from an existing resolution so boundaries can never
    /// disagree with the reference that was keyed on the same position.
    pub fn of(resolved: &ResolvedItem<'_>) -> Self {
        let chapters = &resolved.section.chapters;
        let chapter_end = match chapters {
            ChapterSizes::Exact(sizes) => {
                sizes.get(resolved.chapter as usize - 1) == Some(&resolved.item)
            }
            ChapterSizes::Approximate { .. } => {
                let end_local = chapters.chapter_start(resolved.chapter + 1) - 1;
                resolved.section_start() + end_local == resolved.position
            }
        };
        let section_end = chapter_end && resolved.chapter == chapters.chapter_count();

        Boundary {
            chapter_end,
            section_end,
        }
    }
}

pub fn boundary(catalog: &Catalog, position: GlobalPosition) -> Result<Boundary> {
    resolve(catalog, position).map(|r| Boundary::of(&r))
}

pub fn is_chapter_end(catalog: &Catalog, position: GlobalPosition) -> Result<bool> {
    boundary(catalog, position).map(|b| b.chapter_end)
}

pub fn is_section_end(catalog: &Catalog, position: GlobalPosition) -> Result<bool> {
    boundary(catalog, position).map(|b| b.section_end)
}
