//! The fixed metric rows of the "Data" sheet.
//!
//! Column A/B hold the metric labels; columns C onward hold one date per
//! column. Each metric owns one row, permanently. The mapping is a closed
//! enumeration so a mistyped label is a compile error or a parse failure,
//! never a silently misplaced write.

use crate::error::{BoardError, BoardResult};

/// Number of cartons that makes a truck 100% full.
pub const TRUCK_FILL_MAX: f64 = 26.0;

/// The 17 daily metrics, in sheet order (rows 2 through 18).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    DaysWithoutIncident,
    HazIds,
    SafetyGembaWalk,
    SevenSZone26,
    SevenSZone51,
    Errors,
    PcdReturns,
    JobsOnHold,
    Productivity,
    OtifPercent,
    Huddles,
    TruckFillPercent,
    Recognitions,
    McCompliance,
    CostSavings,
    Revers,
    Projects,
}

impl Metric {
    pub const ALL: [Metric; 17] = [
        Metric::DaysWithoutIncident,
        Metric::HazIds,
        Metric::SafetyGembaWalk,
        Metric::SevenSZone26,
        Metric::SevenSZone51,
        Metric::Errors,
        Metric::PcdReturns,
        Metric::JobsOnHold,
        Metric::Productivity,
        Metric::OtifPercent,
        Metric::Huddles,
        Metric::TruckFillPercent,
        Metric::Recognitions,
        Metric::McCompliance,
        Metric::CostSavings,
        Metric::Revers,
        Metric::Projects,
    ];

    /// The fixed row this metric occupies on the "Data" sheet.
    pub fn row(&self) -> u32 {
        match self {
            Metric::DaysWithoutIncident => 2,
            Metric::HazIds => 3,
            Metric::SafetyGembaWalk => 4,
            Metric::SevenSZone26 => 5,
            Metric::SevenSZone51 => 6,
            Metric::Errors => 7,
            Metric::PcdReturns => 8,
            Metric::JobsOnHold => 9,
            Metric::Productivity => 10,
            Metric::OtifPercent => 11,
            Metric::Huddles => 12,
            Metric::TruckFillPercent => 13,
            Metric::Recognitions => 14,
            Metric::McCompliance => 15,
            Metric::CostSavings => 16,
            Metric::Revers => 17,
            Metric::Projects => 18,
        }
    }

    /// The label as it appears in column B of the workbook.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::DaysWithoutIncident => "Days without Incident",
            Metric::HazIds => "Haz ID's",
            Metric::SafetyGembaWalk => "Safety Gemba Walk",
            Metric::SevenSZone26 => "7S (Zone 26)",
            Metric::SevenSZone51 => "7S (Zone 51)",
            Metric::Errors => "Errors",
            Metric::PcdReturns => "PCD Returns",
            Metric::JobsOnHold => "Jobs on Hold",
            Metric::Productivity => "Productivity",
            Metric::OtifPercent => "OTIF %",
            Metric::Huddles => "Huddles",
            Metric::TruckFillPercent => "Truck Fill %",
            Metric::Recognitions => "Recognitions",
            Metric::McCompliance => "MC Compliance",
            Metric::CostSavings => "Cost Savings",
            Metric::Revers => "Rever's",
            Metric::Projects => "Project's",
        }
    }

    /// Parse a workbook label back into a metric.
    pub fn from_label(label: &str) -> BoardResult<Metric> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| BoardError::Validation(format!("unknown metric '{}'", label)))
    }
}

/// Normalize a truck-fill entry into a two-decimal percent string.
///
/// Accepts either a raw carton count in [0, 26] or a value already carrying a
/// `%` suffix (passed through once it proves numeric).
pub fn normalize_truck_fill(input: &str) -> BoardResult<String> {
    let trimmed = input.trim();

    if let Some(body) = trimmed.strip_suffix('%') {
        body.trim().parse::<f64>().map_err(|_| {
            BoardError::Validation(format!("truck fill '{}' is not numeric", input))
        })?;
        return Ok(trimmed.to_string());
    }

    let count: f64 = trimmed
        .parse()
        .map_err(|_| BoardError::Validation(format!("truck fill '{}' is not numeric", input)))?;

    if !(0.0..=TRUCK_FILL_MAX).contains(&count) {
        return Err(BoardError::Validation(format!(
            "truck fill {} is outside 0..{}",
            trimmed, TRUCK_FILL_MAX
        )));
    }

    let pct = (count / TRUCK_FILL_MAX * 100.0 * 100.0).round() / 100.0;
    Ok(format!("{:.2}%", pct))
}
