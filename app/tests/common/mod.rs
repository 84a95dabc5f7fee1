//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for Chartwork integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use app_lib::{
    AppState, CellValue, ChartSpec, Clipboard, Dataset, ExportError, ExportPlan, ImageRenderer,
    PivotRole,
};

/// Holds the current session snapshot and advances it action by action.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// A session with nothing loaded.
    pub fn new() -> Self {
        TestHarness {
            state: AppState::new(),
        }
    }

    /// A session with the sales fixture loaded.
    pub fn with_sales_data() -> Self {
        Self::with_dataset(SalesFixture::dataset())
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        let state = AppState::new()
            .load_dataset(dataset)
            .expect("fixture data is not empty");
        TestHarness { state }
    }

    /// Applies one action to the current snapshot.
    pub fn apply(&mut self, action: impl FnOnce(&AppState) -> AppState) -> &mut Self {
        self.state = action(&self.state);
        self
    }

    pub fn add(&mut self, role: PivotRole, name: &str) -> &mut Self {
        self.apply(|s| s.add_field(role, name))
    }

    pub fn remove(&mut self, role: PivotRole, name: &str) -> &mut Self {
        self.apply(|s| s.remove_field(role, name))
    }

    pub fn uncheck(&mut self, column: &str, value: &str) -> &mut Self {
        self.apply(|s| s.toggle_filter_value(column, value, false))
    }

    pub fn check(&mut self, column: &str, value: &str) -> &mut Self {
        self.apply(|s| s.toggle_filter_value(column, value, true))
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Region x Product x Quarter sales.
pub struct SalesFixture;

impl SalesFixture {
    pub fn headers() -> Vec<&'static str> {
        vec!["Region", "Product", "Quarter", "Sales", "Quantity"]
    }

    pub fn data() -> Vec<(&'static str, &'static str, &'static str, f64, f64)> {
        vec![
            ("North", "Widget", "Q1", 10000.0, 100.0),
            ("North", "Widget", "Q2", 12000.0, 120.0),
            ("North", "Gadget", "Q1", 8000.0, 80.0),
            ("North", "Gadget", "Q2", 9000.0, 90.0),
            ("South", "Widget", "Q1", 15000.0, 150.0),
            ("South", "Widget", "Q2", 14000.0, 140.0),
            ("South", "Gadget", "Q1", 11000.0, 110.0),
            ("South", "Gadget", "Q2", 13000.0, 130.0),
            ("East", "Widget", "Q1", 9000.0, 90.0),
            ("East", "Widget", "Q2", 11000.0, 110.0),
            ("East", "Gadget", "Q1", 7000.0, 70.0),
            ("East", "Gadget", "Q2", 8500.0, 85.0),
        ]
    }

    pub fn dataset() -> Dataset {
        let headers = Self::headers();
        let records = Self::data()
            .into_iter()
            .map(|(region, product, quarter, sales, quantity)| {
                let values = vec![
                    CellValue::from(region),
                    CellValue::from(product),
                    CellValue::from(quarter),
                    CellValue::from(sales),
                    CellValue::from(quantity),
                ];
                headers.clone().into_iter().zip(values).collect::<Vec<_>>()
            });
        Dataset::from_records(records)
    }
}

/// The three-row Region/Product/Revenue table.
pub struct RegionFixture;

impl RegionFixture {
    pub fn dataset() -> Dataset {
        Dataset::from_records(vec![
            vec![
                ("Region", CellValue::from("N")),
                ("Product", CellValue::from("A")),
                ("Revenue", CellValue::from(100.0)),
            ],
            vec![
                ("Region", CellValue::from("N")),
                ("Product", CellValue::from("B")),
                ("Revenue", CellValue::from(200.0)),
            ],
            vec![
                ("Region", CellValue::from("S")),
                ("Product", CellValue::from("A")),
                ("Revenue", CellValue::from(50.0)),
            ],
        ])
    }
}

/// Tasks with text dates, as a CSV upload would produce them.
pub struct ProjectFixture;

impl ProjectFixture {
    pub const CSV: &'static str = "\
Task,Start,End,Team,Done
Design,2024-01-01,2024-01-10,UX,100%
Build,2024-01-08,2024-02-01,Eng,40
Review,2024-02-01,2024-02-05,UX,
Launch,someday,2024-02-10,Eng,0
";
}

// ============================================================================
// RENDERER / CLIPBOARD DOUBLES
// ============================================================================

/// Records every plan it is asked to render.
#[derive(Default)]
pub struct RecordingRenderer {
    pub fail: bool,
    pub plans: RefCell<Vec<ExportPlan>>,
}

impl RecordingRenderer {
    pub fn failing() -> Self {
        RecordingRenderer {
            fail: true,
            ..Self::default()
        }
    }
}

impl ImageRenderer for RecordingRenderer {
    fn render_png(&self, _spec: &ChartSpec, plan: &ExportPlan) -> Result<Vec<u8>, ExportError> {
        self.plans.borrow_mut().push(plan.clone());
        if self.fail {
            return Err(ExportError::Render("canvas unavailable".to_string()));
        }
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    fn render_svg(&self, _spec: &ChartSpec, plan: &ExportPlan) -> Result<String, ExportError> {
        self.plans.borrow_mut().push(plan.clone());
        if self.fail {
            return Err(ExportError::Render("canvas unavailable".to_string()));
        }
        Ok("<svg/>".to_string())
    }
}

#[derive(Default)]
pub struct MemoryClipboard {
    pub denied: bool,
    pub contents: Option<Vec<u8>>,
}

impl Clipboard for MemoryClipboard {
    fn write_png(&mut self, png: &[u8]) -> Result<(), ExportError> {
        if self.denied {
            return Err(ExportError::Clipboard("permission denied".to_string()));
        }
        self.contents = Some(png.to_vec());
        Ok(())
    }
}
