use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::ScheduleConfig;
use crate::error::{PathError, Result};
use crate::resolver::{resolve, GlobalPosition};

/// Pace names as stored on user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceKind {
    OneMishna,
    TwoMishna,
    OneChapter,
    SederPerYear,
}

impl PaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaceKind::OneMishna => "one_mishna",
            PaceKind::TwoMishna => "two_mishna",
            PaceKind::OneChapter => "one_chapter",
            PaceKind::SederPerYear => "seder_per_year",
        }
    }
}

impl std::str::FromStr for PaceKind {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "one_mishna" => Ok(PaceKind::OneMishna),
            "two_mishna" => Ok(PaceKind::TwoMishna),
            "one_chapter" => Ok(PaceKind::OneChapter),
            "seder_per_year" => Ok(PaceKind::SederPerYear),
            other => Err(PathError::Config {
                message: format!("unknown pace '{}'", other),
            }),
        }
    }
}

/// How much content one admitted study day consumes.
///
/// Policies never look at dates. The cursor is a global item position for
/// `FixedCount` and `AverageRate`, and a corpus-wide chapter index for
/// `ChapterPerDay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PacePolicy {
    FixedCount(u32),
    ChapterPerDay,
    AverageRate { items_per_day: u32 },
}

/// Positions consumed on one day and the cursor for the following day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayAdvance {
    pub positions: Vec<GlobalPosition>,
    pub next: u32,
}

impl DayAdvance {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl PacePolicy {
    pub fn from_kind(kind: PaceKind, catalog: &Catalog, config: &ScheduleConfig) -> Result<Self> {
        match kind {
            PaceKind::OneMishna => PacePolicy::fixed_count(1),
            PaceKind::TwoMishna => PacePolicy::fixed_count(2),
            PaceKind::OneChapter => Ok(PacePolicy::ChapterPerDay),
            PaceKind::SederPerYear => {
                let orders = catalog.orders().len() as u32;
                let planned = orders.saturating_mul(config.study_days_per_year);
                PacePolicy::average_rate(catalog, planned)
            }
        }
    }

    /// `k` items per study day. Zero would never advance the cursor.
    pub fn fixed_count(items_per_day: u32) -> Result<Self> {
        if items_per_day == 0 {
            return Err(PathError::Config {
                message: "fixed-count pace needs at least one item per day".into(),
            });
        }
        Ok(PacePolicy::FixedCount(items_per_day))
    }

    /// `ceil(total_items / planned_study_days)`, computed once here.
    pub fn average_rate(catalog: &Catalog, planned_study_days: u32) -> Result<Self> {
        if planned_study_days == 0 {
            return Err(PathError::Config {
                message: "average-rate pace needs at least one planned study day".into(),
            });
        }
        let items_per_day = catalog.total_items().div_ceil(planned_study_days).max(1);
        Ok(PacePolicy::AverageRate { items_per_day })
    }

    /// Exclusive upper bound of the cursor.
    pub fn cursor_limit(&self, catalog: &Catalog) -> u32 {
        match self {
            PacePolicy::ChapterPerDay => catalog.total_chapters(),
            _ => catalog.total_items(),
        }
    }

    pub fn is_exhausted(&self, catalog: &Catalog, cursor: u32) -> bool {
        cursor >= self.cursor_limit(catalog)
    }

    /// Translate a stored item position into this policy's cursor.
    ///
    /// Chapter-per-day starts from the chapter that contains `position`.
    /// Positions past the corpus map to the cursor limit.
    pub fn cursor_for_position(&self, catalog: &Catalog, position: GlobalPosition) -> u32 {
        match self {
            PacePolicy::ChapterPerDay => match resolve(catalog, position) {
                Ok(item) => {
                    let before: u32 = catalog
                        .sections()
                        .take(item.section_index)
                        .map(|s| s.chapter_count())
                        .sum();
                    before + item.chapter - 1
                }
                Err(_) => catalog.total_chapters(),
            },
            _ => position.min(catalog.total_items()),
        }
    }

    /// Zero-based study day on which a path begun at cursor 0 reaches
    /// `position`.
    pub fn day_index(&self, catalog: &Catalog, position: GlobalPosition) -> u32 {
        match *self {
            PacePolicy::ChapterPerDay => self.cursor_for_position(catalog, position),
            PacePolicy::FixedCount(count) | PacePolicy::AverageRate { items_per_day: count } => {
                position.min(catalog.total_items()) / count.max(1)
            }
        }
    }

    /// Consume one day's worth of content starting at `cursor`.
    ///
    /// An exhausted cursor yields no positions; that is the normal end of
    /// the corpus, not an error. A short tail consumes whatever remains.
    pub fn advance(&self, catalog: &Catalog, cursor: u32) -> DayAdvance {
        if self.is_exhausted(catalog, cursor) {
            return DayAdvance {
                positions: Vec::new(),
                next: cursor,
            };
        }

        match *self {
            PacePolicy::FixedCount(count) | PacePolicy::AverageRate { items_per_day: count } => {
                let end = cursor.saturating_add(count).min(catalog.total_items());
                DayAdvance {
                    positions: (cursor..end).collect(),
                    next: end,
                }
            }
            PacePolicy::ChapterPerDay => match catalog.chapter_span(cursor) {
                Some(span) => DayAdvance {
                    positions: span.positions().collect(),
                    next: cursor + 1,
                },
                None => DayAdvance {
                    positions: Vec::new(),
                    next: cursor,
                },
            },
        }
    }
}
