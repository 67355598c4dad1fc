use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::super::amount::Amount;
use super::super::calendar::{PurchaseDate, PurchaseTime};
use super::super::domain::{LineItem, PurchaseRecord};
use super::{ScoreComponent, ScoringRule};

const ROUND_TOTAL_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

const DESCRIPTION_LENGTH_DIVISOR: usize = 3;

const AFTERNOON_START: PurchaseTime = PurchaseTime { hour: 14, minute: 0 };
const AFTERNOON_END: PurchaseTime = PurchaseTime { hour: 16, minute: 0 };

pub(crate) fn score_record(record: &PurchaseRecord) -> Vec<ScoreComponent> {
    let total = record.total.as_deref().and_then(|raw| Amount::parse(raw).ok());

    vec![
        retailer_density(record.retailer.as_deref().unwrap_or_default()),
        round_total(total),
        quarter_multiple_total(total),
        item_pairs(record.items()),
        description_length(record.items()),
        odd_purchase_day(record.purchase_date.as_deref()),
        afternoon_window(record.purchase_time.as_deref()),
    ]
}

fn retailer_density(retailer: &str) -> ScoreComponent {
    let count = retailer
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .count() as u64;

    ScoreComponent {
        rule: ScoringRule::RetailerDensity,
        points: count,
        notes: format!("{count} alphanumeric character(s) in '{retailer}'"),
    }
}

fn round_total(total: Option<Amount>) -> ScoreComponent {
    match total {
        Some(total) if total.is_whole() => ScoreComponent {
            rule: ScoringRule::RoundTotal,
            points: ROUND_TOTAL_POINTS,
            notes: format!("total {total} has no cents"),
        },
        Some(total) => ScoreComponent {
            rule: ScoringRule::RoundTotal,
            points: 0,
            notes: format!("total {total} has cents"),
        },
        None => unreadable(ScoringRule::RoundTotal, "total"),
    }
}

fn quarter_multiple_total(total: Option<Amount>) -> ScoreComponent {
    let Some(total) = total else {
        return unreadable(ScoringRule::QuarterMultipleTotal, "total");
    };

    let quarters = total.value().checked_mul(Decimal::from(4));
    if quarters.is_some_and(|quarters| quarters.fract().is_zero()) {
        ScoreComponent {
            rule: ScoringRule::QuarterMultipleTotal,
            points: QUARTER_MULTIPLE_POINTS,
            notes: format!("total {total} is a multiple of 0.25"),
        }
    } else {
        ScoreComponent {
            rule: ScoringRule::QuarterMultipleTotal,
            points: 0,
            notes: format!("total {total} is not a multiple of 0.25"),
        }
    }
}

fn item_pairs(items: &[LineItem]) -> ScoreComponent {
    let pairs = (items.len() / 2) as u64;

    ScoreComponent {
        rule: ScoringRule::ItemPairs,
        points: pairs.saturating_mul(POINTS_PER_ITEM_PAIR),
        notes: format!("{pairs} pair(s) across {} item(s)", items.len()),
    }
}

fn description_length(items: &[LineItem]) -> ScoreComponent {
    let mut points = 0u64;
    let mut qualifying = 0usize;

    for item in items {
        let description = item.short_description.as_deref().unwrap_or_default().trim();
        if description.chars().count() % DESCRIPTION_LENGTH_DIVISOR != 0 {
            continue;
        }

        let Some(price) = item.price.as_deref().and_then(|raw| Amount::parse(raw).ok()) else {
            continue;
        };

        qualifying += 1;
        points = points.saturating_add(price_bonus(price));
    }

    ScoreComponent {
        rule: ScoringRule::DescriptionLength,
        points,
        notes: format!(
            "{qualifying} item(s) with description length divisible by {DESCRIPTION_LENGTH_DIVISOR}"
        ),
    }
}

/// ceil(price * 0.2), saturating at `u64::MAX`.
fn price_bonus(price: Amount) -> u64 {
    price
        .value()
        .checked_mul(Decimal::new(2, 1))
        .map(|bonus| bonus.ceil().to_u64().unwrap_or(u64::MAX))
        .unwrap_or(u64::MAX)
}

fn odd_purchase_day(raw: Option<&str>) -> ScoreComponent {
    match raw.and_then(|raw| PurchaseDate::parse(raw).ok()) {
        Some(date) if date.is_odd_day() => ScoreComponent {
            rule: ScoringRule::OddPurchaseDay,
            points: ODD_DAY_POINTS,
            notes: format!("purchased on odd day {}", date.day),
        },
        Some(date) => ScoreComponent {
            rule: ScoringRule::OddPurchaseDay,
            points: 0,
            notes: format!("purchased on even day {}", date.day),
        },
        None => unreadable(ScoringRule::OddPurchaseDay, "purchase date"),
    }
}

fn afternoon_window(raw: Option<&str>) -> ScoreComponent {
    match raw.and_then(|raw| PurchaseTime::parse(raw).ok()) {
        Some(time) if time.is_strictly_between(AFTERNOON_START, AFTERNOON_END) => ScoreComponent {
            rule: ScoringRule::AfternoonWindow,
            points: AFTERNOON_POINTS,
            notes: format!("purchased at {time}, after {AFTERNOON_START} and before {AFTERNOON_END}"),
        },
        Some(time) => ScoreComponent {
            rule: ScoringRule::AfternoonWindow,
            points: 0,
            notes: format!("purchased at {time}, outside {AFTERNOON_START}-{AFTERNOON_END}"),
        },
        None => unreadable(ScoringRule::AfternoonWindow, "purchase time"),
    }
}

fn unreadable(rule: ScoringRule, field: &str) -> ScoreComponent {
    ScoreComponent {
        rule,
        points: 0,
        notes: format!("{field} unreadable"),
    }
}
