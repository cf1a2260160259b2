use crate::models::{Item, Receipt};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Points for a total with no cents
pub const ROUND_DOLLAR_POINTS: u64 = 50;
/// Points for a total that is a multiple of 0.25
pub const QUARTER_MULTIPLE_POINTS: u64 = 25;
/// Points awarded per two items
pub const ITEM_PAIR_POINTS: u64 = 5;
/// Points for a purchase on an odd day of the month
pub const ODD_DAY_POINTS: u64 = 6;
/// Points for a purchase between 14:00 and 16:00
pub const AFTERNOON_POINTS: u64 = 10;

const DESCRIPTION_PRICE_MULTIPLIER: f64 = 0.2;
const AFTERNOON_START_HOUR: u32 = 14;
const AFTERNOON_END_HOUR: u32 = 16;

/// A scoring rule. `None` means the rule does not apply to the receipt,
/// either because its condition failed or because a field did not parse.
type Rule = fn(&Receipt) -> Option<u64>;

const RULES: [(&str, Rule); 7] = [
    ("retailer_name", retailer_name_points),
    ("round_dollar", round_dollar_points),
    ("quarter_multiple", quarter_multiple_points),
    ("item_pairs", item_pair_points),
    ("item_descriptions", item_description_points),
    ("odd_day", odd_day_points),
    ("afternoon", afternoon_points),
];

/// Per-rule contributions to a receipt's score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsBreakdown {
    pub rules: Vec<(&'static str, u64)>,
}

impl PointsBreakdown {
    pub fn total(&self) -> u64 {
        self.rules
            .iter()
            .fold(0u64, |acc, (_, points)| acc.saturating_add(*points))
    }

    /// Contribution of a single rule by name
    pub fn get(&self, rule: &str) -> Option<u64> {
        self.rules
            .iter()
            .find(|(name, _)| *name == rule)
            .map(|(_, points)| *points)
    }
}

/// Calculate the loyalty points for a receipt
///
/// The score is the sum of independent rules:
/// - 1 point per alphanumeric character in the retailer name
/// - 50 points if the total ends in ".00"
/// - 25 points if the total is a multiple of 0.25
/// - 5 points for every two items
/// - ceil(price * 0.2) for each item whose trimmed description length is a multiple of 3
/// - 6 points if the purchase day is odd
/// - 10 points if the purchase time is from 14:00 up to 16:00
///
/// Fields that fail to parse simply earn nothing from their rule.
pub fn calculate_points(receipt: &Receipt) -> u64 {
    calculate_breakdown(receipt).total()
}

/// Evaluate every rule, keeping each contribution separately
pub fn calculate_breakdown(receipt: &Receipt) -> PointsBreakdown {
    let rules = RULES
        .iter()
        .map(|(name, rule)| (*name, rule(receipt).unwrap_or(0)))
        .collect();

    PointsBreakdown { rules }
}

/// One point for every ASCII letter or digit in the retailer name
pub fn retailer_name_points(receipt: &Receipt) -> Option<u64> {
    let count = receipt
        .retailer
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .count();

    Some(count as u64)
}

/// Textual check on the total; "1.000" does not qualify
pub fn round_dollar_points(receipt: &Receipt) -> Option<u64> {
    receipt
        .total
        .ends_with(".00")
        .then_some(ROUND_DOLLAR_POINTS)
}

pub fn quarter_multiple_points(receipt: &Receipt) -> Option<u64> {
    let total = parse_amount(&receipt.total)?;
    (total % 0.25 == 0.0).then_some(QUARTER_MULTIPLE_POINTS)
}

pub fn item_pair_points(receipt: &Receipt) -> Option<u64> {
    Some((receipt.items.len() / 2) as u64 * ITEM_PAIR_POINTS)
}

/// Sum of the per-item description bonus; items that don't qualify count as zero
pub fn item_description_points(receipt: &Receipt) -> Option<u64> {
    let points = receipt
        .items
        .iter()
        .filter_map(item_points)
        .fold(0u64, u64::saturating_add);

    Some(points)
}

/// Bonus for one item
///
/// Applies when the trimmed description length is a multiple of 3, an empty
/// description included. A price that does not parse, or a bonus that would be
/// negative, earns nothing.
pub fn item_points(item: &Item) -> Option<u64> {
    if item.short_description.trim().len() % 3 != 0 {
        return None;
    }

    let price = parse_amount(&item.price)?;
    let bonus = (price * DESCRIPTION_PRICE_MULTIPLIER).ceil();
    if !bonus.is_finite() || bonus < 0.0 {
        return None;
    }

    // Float-to-int casts saturate
    Some(bonus as u64)
}

pub fn odd_day_points(receipt: &Receipt) -> Option<u64> {
    let date = parse_purchase_date(&receipt.purchase_date)?;
    (date.day() % 2 == 1).then_some(ODD_DAY_POINTS)
}

pub fn afternoon_points(receipt: &Receipt) -> Option<u64> {
    let time = parse_purchase_time(&receipt.purchase_time)?;
    (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR)
        .contains(&time.hour())
        .then_some(AFTERNOON_POINTS)
}

fn parse_amount(value: &str) -> Option<f64> {
    value.parse::<f64>().ok()
}

/// Parse a strict `YYYY-MM-DD` date
///
/// The year is exactly four characters and may carry a sign (`-022-01-01`);
/// month and day are exactly two digits and must form a real calendar date.
pub fn parse_purchase_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let (sign, year) = match bytes[0] {
        b'-' => (-1, &value[1..4]),
        b'+' => (1, &value[1..4]),
        _ => (1, &value[0..4]),
    };
    let (month, day) = (&value[5..7], &value[8..10]);

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(year) || !all_digits(month) || !all_digits(day) {
        return None;
    }

    NaiveDate::from_ymd_opt(
        sign * year.parse::<i32>().ok()?,
        month.parse().ok()?,
        day.parse().ok()?,
    )
}

/// Parse a 24-hour `H:MM` or `HH:MM` time
pub fn parse_purchase_time(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.split_once(':')?;

    let hour_ok = (1..=2).contains(&hour.len()) && hour.bytes().all(|b| b.is_ascii_digit());
    let minute_ok = minute.len() == 2 && minute.bytes().all(|b| b.is_ascii_digit());
    if !hour_ok || !minute_ok {
        return None;
    }

    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}
