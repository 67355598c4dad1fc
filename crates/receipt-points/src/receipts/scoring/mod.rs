mod rules;

use serde::Serialize;

use super::domain::PurchaseRecord;

/// The independent rules that contribute to a receipt's points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerDensity,
    RoundTotal,
    QuarterMultipleTotal,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonWindow,
}

impl ScoringRule {
    pub const ALL: [ScoringRule; 7] = [
        ScoringRule::RetailerDensity,
        ScoringRule::RoundTotal,
        ScoringRule::QuarterMultipleTotal,
        ScoringRule::ItemPairs,
        ScoringRule::DescriptionLength,
        ScoringRule::OddPurchaseDay,
        ScoringRule::AfternoonWindow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScoringRule::RetailerDensity => "Retailer name",
            ScoringRule::RoundTotal => "Round dollar total",
            ScoringRule::QuarterMultipleTotal => "Total multiple of 0.25",
            ScoringRule::ItemPairs => "Item pairs",
            ScoringRule::DescriptionLength => "Description length",
            ScoringRule::OddPurchaseDay => "Odd purchase day",
            ScoringRule::AfternoonWindow => "2pm-4pm purchase",
        }
    }
}

/// One rule's contribution, kept so a score can be explained after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub rule: ScoringRule,
    pub points: u64,
    pub notes: String,
}

/// Every rule's contribution plus their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub components: Vec<ScoreComponent>,
    pub total_points: u64,
}

impl PointsBreakdown {
    pub fn points_for(&self, rule: ScoringRule) -> u64 {
        self.components
            .iter()
            .filter(|component| component.rule == rule)
            .map(|component| component.points)
            .sum()
    }
}

/// Points for a record that [`super::validate`] accepted.
///
/// Records that failed validation get an unspecified (but panic-free) result; fields
/// that cannot be read simply contribute nothing.
pub fn score(record: &PurchaseRecord) -> u64 {
    score_breakdown(record).total_points
}

pub fn score_breakdown(record: &PurchaseRecord) -> PointsBreakdown {
    let components = rules::score_record(record);
    let total_points = components
        .iter()
        .fold(0u64, |total, component| total.saturating_add(component.points));

    PointsBreakdown {
        components,
        total_points,
    }
}
