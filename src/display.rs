const HEBREW_NUMERALS: [&str; 31] = [
    "", "א", "ב", "ג", "ד", "ה", "ו", "ז", "ח", "ט", "י", "יא", "יב", "יג", "יד", "טו", "טז",
    "יז", "יח", "יט", "כ", "כא", "כב", "כג", "כד", "כה", "כו", "כז", "כח", "כט", "ל",
];

/// Hebrew letter numeral for 1..=30 (15 and 16 use the traditional טו / טז),
/// plain decimal otherwise.
pub fn hebrew_numeral(n: u32) -> String {
    match HEBREW_NUMERALS.get(n as usize) {
        Some(letters) if n >= 1 => (*letters).to_string(),
        _ => n.to_string(),
    }
}
