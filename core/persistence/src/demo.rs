//! FILENAME: core/persistence/src/demo.rs
//! Sample sales data for trying the app without a file.

use engine::{CellValue, Dataset, Row};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEMO_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
pub const DEMO_REGIONS: [&str; 4] = ["North", "South", "East", "West"];
pub const DEMO_PRODUCTS: [&str; 4] = ["Laptops", "Phones", "Tablets", "Accessories"];

/// 192 rows (region x product x month) with random Revenue, Units and
/// Profit. The same seed always yields the same data.
pub fn demo_dataset(seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut between = |low: f64, span: f64| (low + rng.gen::<f64>() * span).round();

    let columns = ["Month", "Region", "Product", "Revenue", "Units", "Profit"]
        .iter()
        .map(|c| c.to_string())
        .collect();

    let mut rows = Vec::with_capacity(DEMO_REGIONS.len() * DEMO_PRODUCTS.len() * DEMO_MONTHS.len());
    for region in DEMO_REGIONS {
        for product in DEMO_PRODUCTS {
            for month in DEMO_MONTHS {
                rows.push(Row::new(vec![
                    CellValue::from(month),
                    CellValue::from(region),
                    CellValue::from(product),
                    CellValue::Number(between(10_000.0, 90_000.0)),
                    CellValue::Number(between(50.0, 450.0)),
                    CellValue::Number(between(2_000.0, 30_000.0)),
                ]));
            }
        }
    }

    Dataset::new(columns, rows)
}
