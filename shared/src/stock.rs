//! Stock level classification and purchasing need analysis
//!
//! Every view that shows a stock level (part list, dashboard, notifications,
//! need analysis) derives it from this module, so the thresholds cannot
//! drift between screens.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discrete stock urgency level.
///
/// Evaluated as a strict threshold ladder, first match wins:
/// at or below `minimum_stock` is critical, at or below the reorder point
/// needs reordering, at or below 1.5x the reorder point is low, anything
/// above that is fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Reorder,
    Low,
    Good,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Critical => "critical",
            StockStatus::Reorder => "reorder",
            StockStatus::Low => "low",
            StockStatus::Good => "good",
        }
    }

    /// Display label shown to warehouse staff.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Critical => "Stok Kritis",
            StockStatus::Reorder => "Perlu Reorder",
            StockStatus::Low => "Stok Rendah",
            StockStatus::Good => "Stok Aman",
        }
    }

    /// Severity color token for badges and tables.
    pub fn severity_color(&self) -> &'static str {
        match self {
            StockStatus::Critical => "red",
            StockStatus::Reorder => "orange",
            StockStatus::Low => "yellow",
            StockStatus::Good => "green",
        }
    }
}

/// Classify a part's stock level from its current stock, stored reorder
/// point and minimum stock.
///
/// Total over all integer inputs; out-of-range values (e.g. a negative
/// stock count caused by bad upstream data) are not masked here, the
/// comparisons evaluate literally and such a part simply lands in
/// `Critical`.
///
/// The `rop * 1.5` boundary is compared in floating point on purpose:
/// rounding it to an integer first would shift the low/good boundary for
/// odd reorder points.
pub fn classify_stock(current_stock: i32, rop: i32, minimum_stock: i32) -> StockStatus {
    if current_stock <= minimum_stock {
        StockStatus::Critical
    } else if current_stock <= rop {
        StockStatus::Reorder
    } else if (current_stock as f64) <= (rop as f64) * 1.5 {
        StockStatus::Low
    } else {
        StockStatus::Good
    }
}

/// Reorder point: `ceil(daily_demand * lead_time)`.
///
/// Computed when a part is created or its demand/lead-time changes, then
/// persisted; classification always reads the stored value.
pub fn calculate_rop(daily_demand: Decimal, lead_time: i32) -> i32 {
    (daily_demand * Decimal::from(lead_time))
        .ceil()
        .to_i32()
        .unwrap_or(i32::MAX)
}

/// Purchasing urgency tier used by the need-analysis report.
///
/// Coarser than [`StockStatus`]: the purchasing view only distinguishes
/// "buy now" / "buy soon" / "can wait".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchasePriority {
    Tinggi,
    Sedang,
    Rendah,
}

impl PurchasePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchasePriority::Tinggi => "tinggi",
            PurchasePriority::Sedang => "sedang",
            PurchasePriority::Rendah => "rendah",
        }
    }

    /// Parse a query-string value; `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "tinggi" => Some(PurchasePriority::Tinggi),
            "sedang" => Some(PurchasePriority::Sedang),
            "rendah" => Some(PurchasePriority::Rendah),
            _ => None,
        }
    }

    /// Sort rank, high priority first.
    fn rank(&self) -> u8 {
        match self {
            PurchasePriority::Tinggi => 0,
            PurchasePriority::Sedang => 1,
            PurchasePriority::Rendah => 2,
        }
    }
}

/// Purchasing urgency for a part.
pub fn purchase_priority(current_stock: i32, rop: i32, minimum_stock: i32) -> PurchasePriority {
    if current_stock <= minimum_stock {
        PurchasePriority::Tinggi
    } else if current_stock <= rop {
        PurchasePriority::Sedang
    } else {
        PurchasePriority::Rendah
    }
}

/// Units to order now: `max(0, (rop + safety_stock) - current_stock)`,
/// where safety stock is the part's minimum stock by convention.
pub fn recommended_quantity(current_stock: i32, rop: i32, minimum_stock: i32) -> i32 {
    ((rop + minimum_stock) - current_stock).max(0)
}

/// Immutable snapshot of one part, as fetched from storage.
///
/// `recent_avg_demand` is the trailing-30-day average from the demand log,
/// `None` when the part has no logged history in the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartSnapshot {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub rop: i32,
    pub price: Decimal,
    pub location: Option<String>,
    pub daily_demand: Decimal,
    pub lead_time: i32,
    pub recent_avg_demand: Option<Decimal>,
}

/// Filters accepted by the need-analysis report.
///
/// Search and category narrow the part set *before* the
/// `recommended_quantity > 0` cut; the priority filter applies after it.
#[derive(Debug, Clone, Default)]
pub struct NeedFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub priority: Option<PurchasePriority>,
}

/// One row of the need-analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct NeedAnalysisItem {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub rop: i32,
    pub price: Decimal,
    pub location: Option<String>,
    pub lead_time: i32,
    pub safety_stock: i32,
    pub recommended_quantity: i32,
    pub priority: PurchasePriority,
    pub estimated_cost: Decimal,
    pub avg_daily_demand: Decimal,
}

impl NeedAnalysisItem {
    fn from_snapshot(part: &PartSnapshot) -> Self {
        let quantity = recommended_quantity(part.current_stock, part.rop, part.minimum_stock);
        NeedAnalysisItem {
            id: part.id,
            code: part.code.clone(),
            name: part.name.clone(),
            category: part.category.clone(),
            brand: part.brand.clone(),
            current_stock: part.current_stock,
            minimum_stock: part.minimum_stock,
            rop: part.rop,
            price: part.price,
            location: part.location.clone(),
            lead_time: part.lead_time,
            safety_stock: part.minimum_stock,
            recommended_quantity: quantity,
            priority: purchase_priority(part.current_stock, part.rop, part.minimum_stock),
            estimated_cost: Decimal::from(quantity) * part.price,
            avg_daily_demand: part.recent_avg_demand.unwrap_or(part.daily_demand),
        }
    }
}

/// Summary counters for the purchasing dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeedAnalysisSummary {
    pub total_items: u64,
    pub total_cost: Decimal,
    pub high_priority: u64,
    pub medium_priority: u64,
    pub low_priority: u64,
}

/// Need-analysis report: qualifying parts plus summary counters.
#[derive(Debug, Clone, Serialize)]
pub struct NeedAnalysis {
    pub items: Vec<NeedAnalysisItem>,
    pub summary: NeedAnalysisSummary,
}

/// Build the need-analysis report over a snapshot of active parts.
///
/// Pure and deterministic: the same snapshot and filters always produce
/// the same report. Parts whose recommended quantity works out to zero are
/// computed first and dropped afterwards, never pre-filtered, so search
/// and category narrowing cannot change a part's derived numbers.
pub fn compute_need_analysis(parts: &[PartSnapshot], filters: &NeedFilters) -> NeedAnalysis {
    let mut items: Vec<NeedAnalysisItem> = parts
        .iter()
        .filter(|p| matches_search(p, filters.search.as_deref()))
        .filter(|p| {
            filters
                .category
                .as_deref()
                .map_or(true, |c| p.category == c)
        })
        .map(NeedAnalysisItem::from_snapshot)
        .filter(|item| item.recommended_quantity > 0)
        .filter(|item| filters.priority.map_or(true, |p| item.priority == p))
        .collect();

    // Stable sort keeps snapshot order among exact ties.
    items.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then(b.recommended_quantity.cmp(&a.recommended_quantity))
    });

    let summary = summarize(&items);
    NeedAnalysis { items, summary }
}

/// Summary counters over the filtered, sorted report rows.
///
/// An empty report yields all-zero counters, not an error.
pub fn summarize(items: &[NeedAnalysisItem]) -> NeedAnalysisSummary {
    let count_tier = |tier: PurchasePriority| items.iter().filter(|i| i.priority == tier).count() as u64;

    NeedAnalysisSummary {
        total_items: items.len() as u64,
        total_cost: items.iter().map(|i| i.estimated_cost).sum(),
        high_priority: count_tier(PurchasePriority::Tinggi),
        medium_priority: count_tier(PurchasePriority::Sedang),
        low_priority: count_tier(PurchasePriority::Rendah),
    }
}

fn matches_search(part: &PartSnapshot, search: Option<&str>) -> bool {
    let term = match search {
        Some(t) if !t.trim().is_empty() => t.trim().to_lowercase(),
        _ => return true,
    };

    part.code.to_lowercase().contains(&term)
        || part.name.to_lowercase().contains(&term)
        || part
            .brand
            .as_deref()
            .map_or(false, |b| b.to_lowercase().contains(&term))
}
