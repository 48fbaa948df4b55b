//! The built-in Mishnah table.
//!
//! Changing an exact per-chapter array, the section order, or which sections
//! fall back to the average is a breaking change to every reference computed
//! so far. Treat edits here as a data migration.

use super::{Catalog, ChapterSizes, Order, Section};
use crate::error::Result;

/// Prefix shared by every Mishnah content reference.
pub const PREFIX: &str = "Mishnah";

pub const TOTAL_MISHNAYOT: u32 = 4506;
pub const TOTAL_CHAPTERS: u32 = 525;
pub const TOTAL_TRACTATES: usize = 63;

fn exact(name: &str, hebrew: &str, sizes: &[u32]) -> Section {
    Section::new(name, hebrew, ChapterSizes::Exact(sizes.to_vec()))
}

fn approx(name: &str, hebrew: &str, total_items: u32, chapter_count: u32) -> Section {
    Section::new(
        name,
        hebrew,
        ChapterSizes::Approximate {
            total_items,
            chapter_count,
        },
    )
}

/// Build the six orders in traditional sequence.
pub fn build() -> Result<Catalog> {
    Catalog::new(PREFIX, orders())
}

fn orders() -> Vec<Order> {
    vec![
        Order::new(
            "Zeraim",
            "זרעים",
            vec![
                exact("Berakhot", "ברכות", &[5, 8, 6, 7, 5, 8, 5, 8, 5]),
                exact("Peah", "פאה", &[6, 8, 8, 11, 8, 11, 8, 9]),
                exact("Demai", "דמאי", &[4, 5, 6, 7, 11, 12, 8]),
                exact("Kilayim", "כלאים", &[9, 11, 7, 9, 8, 9, 8, 6, 9]),
                exact("Sheviit", "שביעית", &[8, 10, 10, 10, 9, 6, 7, 11, 9, 9]),
                approx("Terumot", "תרומות", 109, 11),
                approx("Maasrot", "מעשרות", 44, 5),
                approx("Maaser_Sheni", "מעשר שני", 51, 5),
                exact("Challah", "חלה", &[9, 8, 10, 11]),
                approx("Orlah", "ערלה", 42, 3),
                approx("Bikkurim", "ביכורים", 26, 4),
            ],
        ),
        Order::new(
            "Moed",
            "מועד",
            vec![
                approx("Shabbat", "שבת", 138, 24),
                approx("Eruvin", "עירובין", 96, 10),
                approx("Pesachim", "פסחים", 89, 10),
                approx("Shekalim", "שקלים", 52, 8),
                approx("Yoma", "יומא", 61, 8),
                approx("Sukkah", "סוכה", 56, 5),
                approx("Beitzah", "ביצה", 42, 5),
                approx("Rosh_Hashanah", "ראש השנה", 35, 4),
                approx("Taanit", "תענית", 34, 4),
                approx("Megillah", "מגילה", 35, 4),
                approx("Moed_Katan", "מועד קטן", 29, 3),
                approx("Chagigah", "חגיגה", 27, 3),
            ],
        ),
        Order::new(
            "Nashim",
            "נשים",
            vec![
                approx("Yevamot", "יבמות", 122, 16),
                approx("Ketubot", "כתובות", 111, 13),
                approx("Nedarim", "נדרים", 91, 11),
                approx("Nazir", "נזיר", 66, 9),
                approx("Sotah", "סוטה", 49, 9),
                approx("Gittin", "גיטין", 90, 9),
                approx("Kiddushin", "קידושין", 82, 4),
            ],
        ),
        Order::new(
            "Nezikin",
            "נזיקין",
            vec![
                approx("Bava_Kamma", "בבא קמא", 119, 10),
                approx("Bava_Metzia", "בבא מציעא", 118, 10),
                approx("Bava_Batra", "בבא בתרא", 176, 10),
                approx("Sanhedrin", "סנהדרין", 71, 11),
                approx("Makkot", "מכות", 24, 3),
                approx("Shevuot", "שבועות", 49, 8),
                approx("Eduyot", "עדויות", 96, 8),
                approx("Avodah_Zarah", "עבודה זרה", 76, 5),
                approx("Avot", "אבות", 108, 6),
                approx("Horayot", "הוריות", 14, 3),
            ],
        ),
        Order::new(
            "Kodashim",
            "קדשים",
            vec![
                approx("Zevachim", "זבחים", 120, 14),
                approx("Menachot", "מנחות", 110, 13),
                approx("Chullin", "חולין", 142, 12),
                approx("Bekhorot", "בכורות", 61, 9),
                approx("Arakhin", "ערכין", 34, 9),
                approx("Temurah", "תמורה", 34, 7),
                approx("Keritot", "כריתות", 28, 6),
                approx("Meilah", "מעילה", 22, 6),
                approx("Tamid", "תמיד", 31, 7),
                approx("Middot", "מידות", 30, 5),
                approx("Kinnim", "קינים", 12, 3),
            ],
        ),
        Order::new(
            "Tohorot",
            "טהרות",
            vec![
                approx("Kelim", "כלים", 300, 30),
                approx("Oholot", "אהלות", 181, 18),
                approx("Negaim", "נגעים", 126, 14),
                approx("Parah", "פרה", 72, 12),
                approx("Tohorot", "טהרות", 100, 10),
                approx("Mikvaot", "מקואות", 60, 10),
                approx("Niddah", "נדה", 79, 10),
                approx("Machshirin", "מכשירין", 60, 6),
                approx("Zavim", "זבים", 40, 5),
                approx("Tevul_Yom", "טבול יום", 20, 4),
                approx("Yadayim", "ידים", 22, 4),
                approx("Uktzin", "עוקצין", 12, 3),
            ],
        ),
    ]
}
