use crate::infra::InMemoryReceiptRepository;
use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{
    score_breakdown, validate, LineItem, PointsBreakdown, PurchaseRecord, ReceiptService,
    ValidationFailure,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    #[arg(long)]
    pub(crate) receipt: PathBuf,
    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

/// Offline result of validating and scoring one receipt.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum ScoreReport {
    Accepted { breakdown: PointsBreakdown },
    Rejected { reason: ValidationFailure, error: String },
}

impl ScoreReport {
    pub(crate) fn for_record(record: &PurchaseRecord) -> Self {
        match validate(record).into_result() {
            Ok(()) => ScoreReport::Accepted {
                breakdown: score_breakdown(record),
            },
            Err(failure) => ScoreReport::Rejected {
                reason: failure,
                error: failure.to_string(),
            },
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { receipt, json } = args;

    let record = load_receipt(&receipt)?;
    let report = ScoreReport::for_record(&record);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&receipt.display().to_string(), &report));
    }

    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let repository = Arc::new(InMemoryReceiptRepository::default());
    let service = ReceiptService::new(repository.clone());

    println!("Receipt processor demo");
    for (label, record) in sample_receipts() {
        let report = ScoreReport::for_record(&record);
        print!("\n{}", render_report(label, &report));

        match service.process(&record) {
            Ok(stored) => {
                let points = match service.points(&stored.id) {
                    Ok(points) => points.to_string(),
                    Err(err) => format!("unavailable ({err})"),
                };
                println!("Stored as {} -> lookup returns {} points", stored.id, points);
            }
            Err(err) => println!("Not stored: {err}"),
        }
    }

    println!("\n{} receipt(s) held in memory", repository.len());
    Ok(())
}

pub(crate) fn load_receipt(path: &Path) -> Result<PurchaseRecord, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let record: Option<PurchaseRecord> = serde_json::from_str(&raw)?;
    Ok(record.unwrap_or_default())
}

pub(crate) fn render_report(label: &str, report: &ScoreReport) -> String {
    let mut lines = vec![format!("Receipt: {label}")];

    match report {
        ScoreReport::Accepted { breakdown } => {
            for component in &breakdown.components {
                lines.push(format!(
                    "- {:<24} {:>4}  {}",
                    component.rule.label(),
                    component.points,
                    component.notes
                ));
            }
            lines.push(format!("Total points: {}", breakdown.total_points));
        }
        ScoreReport::Rejected { reason, error } => {
            lines.push(format!("Rejected ({}): {}", reason.code(), error));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

fn sample_receipts() -> Vec<(&'static str, PurchaseRecord)> {
    let receipt = |retailer: &str, date: &str, time: &str, items: Vec<LineItem>, total: &str| {
        PurchaseRecord {
            retailer: Some(retailer.to_string()),
            purchase_date: Some(date.to_string()),
            purchase_time: Some(time.to_string()),
            items: Some(items),
            total: Some(total.to_string()),
        }
    };

    vec![
        (
            "Target, 2022-01-01 13:01",
            receipt(
                "Target",
                "2022-01-01",
                "13:01",
                vec![
                    LineItem::new("Mountain Dew 12PK", "6.49"),
                    LineItem::new("Emils Cheese Pizza", "12.25"),
                    LineItem::new("Knorr Creamy Chicken", "1.26"),
                    LineItem::new("Doritos Nacho Cheese", "3.35"),
                    LineItem::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
                ],
                "35.35",
            ),
        ),
        (
            "M&M Corner Market, 2022-03-20 14:33",
            receipt(
                "M&M Corner Market",
                "2022-03-20",
                "14:33",
                vec![LineItem::new("Gatorade", "2.25"); 4],
                "9.00",
            ),
        ),
        (
            "Walgreens with a mistyped total",
            receipt(
                "Walgreens",
                "2022-01-02",
                "08:13",
                vec![
                    LineItem::new("Pepsi - 12-oz", "1.25"),
                    LineItem::new("Dasani", "1.40"),
                ],
                "2.56",
            ),
        ),
    ]
}
