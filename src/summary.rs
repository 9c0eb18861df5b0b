//! Slicer summary comments.
//!
//! Slicers append a block of `; key = value` comments describing the job.
//! This module recognises the filament and print time entries with a
//! plain lexical scan: locate the key phrase, then read an optional
//! bracketed unit, a separator, a number and an optional trailing unit.

/// A filament quantity reported directly by the slicer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilamentReport {
    Grams(f64),
    /// Length in millimeters; meter reports are converted on parse
    Millimeters(f64),
}

const FILAMENT_KEY: &str = "filament used";
const TIME_KEY: &str = "estimated printing time";

/// Parse a filament report from a single line.
///
/// Accepts `filament used [g] = X`, `filament used = X g`,
/// `filament used: X g` and the same shapes with `mm` or `m`.
/// Lines reporting other units (e.g. `[cm3]`) or no unit yield `None`.
pub fn parse_filament_report(line: &str) -> Option<FilamentReport> {
    let lower = line.to_ascii_lowercase();
    let start = lower.find(FILAMENT_KEY)? + FILAMENT_KEY.len();
    let mut rest = lower[start..].trim_start();

    let mut unit = None;
    if let Some(bracketed) = rest.strip_prefix('[') {
        let close = bracketed.find(']')?;
        unit = Some(bracketed[..close].trim());
        rest = bracketed[close + 1..].trim_start();
    }

    rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))?
        .trim_start();

    let number_len = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    let value: f64 = rest[..number_len].parse().ok()?;

    let rest = rest[number_len..].trim_start();
    let suffix_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let suffix = &rest[..suffix_len];

    match unit.unwrap_or(suffix) {
        "g" => Some(FilamentReport::Grams(value)),
        "mm" => Some(FilamentReport::Millimeters(value)),
        "m" => Some(FilamentReport::Millimeters(value * 1000.0)),
        _ => None,
    }
}

/// First reported mass and first reported length in `document`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilamentReports {
    pub grams: Option<f64>,
    pub millimeters: Option<f64>,
}

/// Scan every line for filament reports, keeping the first of each kind.
pub fn scan_filament_reports(document: &str) -> FilamentReports {
    let mut reports = FilamentReports::default();

    for line in document.lines() {
        match parse_filament_report(line) {
            Some(FilamentReport::Grams(g)) if reports.grams.is_none() => {
                reports.grams = Some(g);
            }
            Some(FilamentReport::Millimeters(mm)) if reports.millimeters.is_none() => {
                reports.millimeters = Some(mm);
            }
            _ => {}
        }

        if reports.grams.is_some() && reports.millimeters.is_some() {
            break;
        }
    }

    reports
}

/// Total print time in seconds from the first `estimated printing time` line.
///
/// Returns `None` only when no line carries the phrase followed by `=`.
/// Callers must treat that as missing data, never as a zero-length print.
/// Once the phrase is found, unreadable components contribute zero.
pub fn parse_print_time(text: &str) -> Option<u64> {
    text.lines().find_map(|line| {
        let lower = line.to_ascii_lowercase();
        let start = lower.find(TIME_KEY)? + TIME_KEY.len();
        let (_, duration) = lower[start..].split_once('=')?;
        Some(parse_duration(duration).unwrap_or(0))
    })
}

/// Parse a compound duration such as `1d 2h 3m 4s`.
///
/// Components may appear in any subset; absent ones contribute zero.
/// Parsing stops at the first word that is not `<integer><unit>`.
pub fn parse_duration(text: &str) -> Option<u64> {
    let mut rest = text.trim_start();
    let mut total: u64 = 0;
    let mut components = 0;

    loop {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            break;
        }
        let Ok(amount) = rest[..digits].parse::<u64>() else {
            break;
        };

        let after = rest[digits..].trim_start();
        let Some(unit) = after.chars().next() else {
            break;
        };
        let scale = match unit.to_ascii_lowercase() {
            'd' => 86_400,
            'h' => 3_600,
            'm' => 60,
            's' => 1,
            _ => break,
        };

        total = total.saturating_add(amount.saturating_mul(scale));
        components += 1;
        rest = after[unit.len_utf8()..].trim_start();
    }

    (components > 0).then_some(total)
}
