//! FILENAME: core/chart-engine/src/temporal.rs
//! Gantt chart built from raw filtered rows rather than aggregated groups.
//!
//! Each row becomes one task bar spanning its start and end dates. Bars are
//! coloured by category and an optional progress column draws a lighter
//! overlay over the completed share of each bar.

use engine::{parse_cell_date, timestamp_millis, Dataset, Row};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::builder::{ChartBuilder, ChartInput};
use crate::chart_type::{ChartFamily, ChartType};
use crate::frame::Frame;
use crate::spec::{
    Axis, AxisLabel, AxisLine, AxisType, ChartSpec, DataItem, Datum, Encode, Grid, ItemStyle,
    ItemValue, Legend, LineStyle, Pos, Series, SeriesKind, SplitLine, TaskSpan, Toggle, Tooltip,
};

pub const SELECT_COLUMNS: &str = "Select Task, Start Date, and End Date columns";
pub const NO_DATES: &str = "No valid date data found";

const MESSAGE_FONT_SIZE: u32 = 16;
const PROGRESS_OVERLAY: &str = "rgba(255,255,255,0.35)";
const BAR_SHAPE: &str = "gantt_bar";

/// Progress value of a task when no progress column is selected.
pub const NO_PROGRESS: f64 = -1.0;

/// Which dataset columns feed the Gantt chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttRoles {
    pub task: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub category: Option<String>,
    pub progress: Option<String>,
}

impl GanttRoles {
    pub fn new(task: &str, start: &str, end: &str) -> Self {
        GanttRoles {
            task: Some(task.to_string()),
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            category: None,
            progress: None,
        }
    }

    pub fn with_category(mut self, column: &str) -> Self {
        self.category = Some(column.to_string());
        self
    }

    pub fn with_progress(mut self, column: &str) -> Self {
        self.progress = Some(column.to_string());
        self
    }

    /// Task, start and end are all selected.
    pub fn is_complete(&self) -> bool {
        [&self.task, &self.start, &self.end]
            .iter()
            .all(|role| role.as_deref().is_some_and(|c| !c.is_empty()))
    }
}

/// One parsed Gantt row.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub name: String,
    /// Epoch milliseconds.
    pub start: i64,
    pub end: i64,
    pub category: String,
    /// Percent complete, or `NO_PROGRESS`.
    pub progress: f64,
}

impl Task {
    fn has_progress(&self) -> bool {
        self.progress >= 0.0
    }

    /// End of the completed share of the bar.
    pub fn progress_end(&self) -> i64 {
        let duration = (self.end - self.start) as f64;
        self.start + (duration * self.progress / 100.0) as i64
    }
}

fn role_value<'r>(dataset: &Dataset, row: &'r Row, role: &Option<String>) -> Option<&'r engine::CellValue> {
    role.as_deref()
        .filter(|c| !c.is_empty())
        .map(|column| dataset.value(row, column))
}

/// Parses rows into tasks sorted by start. Rows whose start or end is not
/// a date are skipped; task numbering follows the input row order.
pub fn parse_tasks(dataset: &Dataset, rows: &[&Row], roles: &GanttRoles) -> Vec<Task> {
    let mut tasks: Vec<Task> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let start = role_value(dataset, row, &roles.start).and_then(parse_cell_date)?;
            let end = role_value(dataset, row, &roles.end).and_then(parse_cell_date)?;

            let name = role_value(dataset, row, &roles.task)
                .map(|v| v.display_value())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("Task {}", i + 1));

            let category = role_value(dataset, row, &roles.category)
                .map(|v| v.display_value())
                .unwrap_or_default();

            let progress = match role_value(dataset, row, &roles.progress) {
                Some(v) => v.as_number().unwrap_or(0.0),
                None => NO_PROGRESS,
            };

            Some(Task {
                name,
                start: timestamp_millis(&start),
                end: timestamp_millis(&end),
                category,
                progress,
            })
        })
        .collect();

    // sort_by_key is stable: equal starts keep row order
    tasks.sort_by_key(|t| t.start);
    tasks
}

/// Distinct categories in first-seen order.
fn categories(tasks: &[Task]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for task in tasks {
        if !seen.contains(&task.category.as_str()) {
            seen.push(task.category.as_str());
        }
    }
    seen
}

pub struct TemporalBuilder;

impl ChartBuilder for TemporalBuilder {
    fn family(&self) -> ChartFamily {
        ChartFamily::Temporal
    }

    fn build(&self, chart_type: ChartType, input: &ChartInput<'_>) -> ChartSpec {
        let roles = match input.gantt {
            Some(roles) if roles.is_complete() => roles,
            _ => return ChartSpec::placeholder(SELECT_COLUMNS, MESSAGE_FONT_SIZE),
        };

        let tasks = match input.dataset {
            Some(dataset) => parse_tasks(dataset, input.rows, roles),
            None => Vec::new(),
        };
        if tasks.is_empty() {
            return ChartSpec::placeholder(NO_DATES, MESSAGE_FONT_SIZE);
        }

        let frame = Frame::new(input.style, input.pivot);
        let mut spec = frame.base_spec(chart_type);
        spec.legend = None;
        spec.tooltip = Some(Tooltip {
            trigger: Some("item".to_string()),
            ..spec.tooltip.unwrap_or_default()
        });

        let categories = categories(&tasks);
        let slots: FxHashMap<&str, usize> = categories
            .iter()
            .enumerate()
            .map(|(slot, c)| (*c, slot))
            .collect();
        let color_of = |category: &str| frame.color(slots.get(category).copied().unwrap_or(0));

        let min = tasks.iter().map(|t| t.start.min(t.end)).min().unwrap_or(0);
        let max = tasks.iter().map(|t| t.start.max(t.end)).max().unwrap_or(0);
        let longest = tasks.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);

        spec.grid = Some(Grid {
            top: 80,
            right: 40,
            bottom: 50,
            left: (longest as u32 * 7).max(120),
            contain_label: None,
        });

        let grid_line = if frame.theme.is_dark {
            "rgba(255,255,255,0.06)"
        } else {
            "rgba(0,0,0,0.04)"
        };
        spec.x_axis = Some(Axis {
            axis_type: AxisType::Time,
            min: Some(min as f64),
            max: Some(max as f64),
            axis_label: Some(AxisLabel {
                style: frame.short_text(-2, Some(frame.theme.text)),
                ..AxisLabel::default()
            }),
            split_line: Some(SplitLine {
                show: Some(true),
                line_style: Some(LineStyle {
                    color: grid_line.to_string(),
                }),
            }),
            ..Axis::default()
        });
        spec.y_axis = Some(Axis {
            axis_type: AxisType::Category,
            data: tasks.iter().map(|t| t.name.clone()).collect(),
            inverse: Some(true),
            axis_label: Some(AxisLabel {
                style: frame.short_text(-2, Some(frame.theme.text)),
                width: Some(150),
                overflow: Some("truncate".to_string()),
                ..AxisLabel::default()
            }),
            axis_tick: Some(Toggle::off()),
            axis_line: Some(AxisLine {
                show: Some(false),
                line_style: None,
            }),
            ..Axis::default()
        });

        let span = |index: usize, task: &Task, end: i64| {
            ItemValue::Task(TaskSpan(index, task.start, end, task.progress, task.category.clone()))
        };

        let bars: Vec<Datum> = tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                Datum::Item(DataItem {
                    item_style: Some(ItemStyle::color(color_of(task.category.as_str()))),
                    ..DataItem::named(task.name.clone(), span(i, task, task.end))
                })
            })
            .collect();

        let mut series = vec![Series {
            data: bars,
            encode: Some(Encode { x: vec![1, 2], y: 0 }),
            render_item: Some(BAR_SHAPE.to_string()),
            ..Series::new(SeriesKind::Custom)
        }];

        let overlay: Vec<Datum> = tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.has_progress())
            .map(|(i, task)| Datum::Item(DataItem::new(span(i, task, task.progress_end()))))
            .collect();
        if !overlay.is_empty() {
            series.push(Series {
                data: overlay,
                encode: Some(Encode { x: vec![1, 2], y: 0 }),
                render_item: Some(BAR_SHAPE.to_string()),
                item_style: Some(ItemStyle::color(PROGRESS_OVERLAY)),
                silent: Some(true),
                ..Series::new(SeriesKind::Custom)
            });
        }

        if frame.style.show_legend && categories.len() > 1 {
            let named: Vec<String> = categories
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| c.to_string())
                .collect();

            // Empty series give the legend a colour swatch per category
            for category in &named {
                series.push(Series {
                    name: Some(category.clone()),
                    item_style: Some(ItemStyle::color(color_of(category.as_str()))),
                    ..Series::new(SeriesKind::Bar)
                });
            }

            spec.legend = Some(Legend {
                show: true,
                data: named,
                bottom: Some(Pos::Px(10)),
                left: Some("center".into()),
                text_style: Some(frame.short_text(-2, Some(frame.theme.text))),
                ..Legend::default()
            });
        }

        spec.series = series;

        log::debug!(
            target: "CHART",
            "gantt: {} tasks, {} categories",
            tasks.len(),
            categories.len()
        );
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleConfig;
    use engine::CellValue;
    use pivot_engine::PivotConfig;

    const DAY: i64 = 86_400_000;

    fn create_project() -> Dataset {
        let task = |name: &str, start: &str, end: &str, team: &str, done: CellValue| {
            vec![
                ("Task", CellValue::from(name)),
                ("Start", CellValue::from(start)),
                ("End", CellValue::from(end)),
                ("Team", CellValue::from(team)),
                ("Done", done),
            ]
        };
        Dataset::from_records(vec![
            task("Build", "2024-01-10", "2024-01-20", "Eng", CellValue::from(50.0)),
            task("Design", "2024-01-01", "2024-01-11", "UX", CellValue::from("25%")),
            task("", "2024-01-05", "2024-01-06", "Eng", CellValue::Empty),
            task("Launch", "soon", "2024-02-01", "Ops", CellValue::from(0.0)),
        ])
    }

    fn build_gantt(dataset: &Dataset, roles: &GanttRoles, style: &StyleConfig) -> ChartSpec {
        let pivot = PivotConfig::new();
        let rows: Vec<&Row> = dataset.rows.iter().collect();
        let input = ChartInput::new(&pivot, style)
            .with_rows(dataset, &rows)
            .with_gantt(roles);
        TemporalBuilder.build(ChartType::Gantt, &input)
    }

    #[test]
    fn test_missing_roles_degrade() {
        let dataset = create_project();
        let roles = GanttRoles {
            task: Some("Task".to_string()),
            ..GanttRoles::default()
        };
        let spec = build_gantt(&dataset, &roles, &StyleConfig::default());

        assert!(spec.is_degraded());
        assert_eq!(spec.title.text, SELECT_COLUMNS);
        assert_eq!(spec.title.text_style.unwrap().font_size, Some(16));
    }

    #[test]
    fn test_no_valid_dates_degrade() {
        let dataset = create_project();
        let roles = GanttRoles::new("Task", "Team", "End");
        let spec = build_gantt(&dataset, &roles, &StyleConfig::default());
        assert_eq!(spec.title.text, NO_DATES);
    }

    #[test]
    fn test_parse_tasks_sorts_and_names() {
        let dataset = create_project();
        let rows: Vec<&Row> = dataset.rows.iter().collect();
        let roles = GanttRoles::new("Task", "Start", "End").with_progress("Done");
        let tasks = parse_tasks(&dataset, &rows, &roles);

        // "soon" is not a date
        let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Design", "Task 3", "Build"]);
        assert_eq!(tasks[0].progress, 25.0);
        assert_eq!(tasks[1].progress, 0.0);
        assert_eq!(tasks[2].end - tasks[2].start, 10 * DAY);
    }

    #[test]
    fn test_progress_absent_without_role() {
        let dataset = create_project();
        let rows: Vec<&Row> = dataset.rows.iter().collect();
        let tasks = parse_tasks(&dataset, &rows, &GanttRoles::new("Task", "Start", "End"));
        assert!(tasks.iter().all(|t| t.progress == NO_PROGRESS));
    }

    #[test]
    fn test_gantt_spans_and_overlay() {
        let dataset = create_project();
        let roles = GanttRoles::new("Task", "Start", "End")
            .with_category("Team")
            .with_progress("Done");
        let spec = build_gantt(&dataset, &roles, &StyleConfig::default());

        let x = spec.x_axis.as_ref().unwrap();
        let jan_1 = 1_704_067_200_000_i64;
        assert_eq!(x.min, Some(jan_1 as f64));
        assert_eq!(x.max, Some((jan_1 + 19 * DAY) as f64));
        assert_eq!(spec.grid.as_ref().unwrap().left, 120);

        let bars = &spec.series[0];
        assert_eq!(bars.render_item.as_deref(), Some("gantt_bar"));
        match &bars.data[2] {
            Datum::Item(DataItem { value: ItemValue::Task(span), name, .. }) => {
                assert_eq!(name.as_deref(), Some("Build"));
                assert_eq!(span.0, 2);
                assert_eq!(span.4, "Eng");
            }
            other => panic!("expected task item, got {:?}", other),
        }

        let overlay = &spec.series[1];
        assert_eq!(overlay.silent, Some(true));
        match &overlay.data[2] {
            Datum::Item(DataItem { value: ItemValue::Task(span), .. }) => {
                // Build: 10 days at 50%
                assert_eq!(span.0, 2);
                assert_eq!(span.2 - span.1, 5 * DAY);
            }
            other => panic!("expected task item, got {:?}", other),
        }
    }

    #[test]
    fn test_category_colours_and_legend() {
        let dataset = create_project();
        let roles = GanttRoles::new("Task", "Start", "End").with_category("Team");
        let style = StyleConfig::default();
        let spec = build_gantt(&dataset, &roles, &style);

        let palette = style.palette();
        let colour = |i: usize| match &spec.series[0].data[i] {
            Datum::Item(item) => item.item_style.as_ref().and_then(|s| s.color.clone()),
            _ => None,
        };
        // Design (UX) first, then the two Eng tasks
        assert_eq!(colour(0).as_deref(), Some(palette.color(0)));
        assert_eq!(colour(1).as_deref(), Some(palette.color(1)));
        assert_eq!(colour(2), colour(1));

        // No progress role: no overlay, just the legend swatches
        let legend = spec.legend.unwrap();
        assert_eq!(legend.data, vec!["UX", "Eng"]);
        assert_eq!(spec.series.len(), 3);
        assert_eq!(spec.series[1].kind, SeriesKind::Bar);
        assert!(spec.series[1].data.is_empty());
    }

    #[test]
    fn test_long_task_names_widen_grid() {
        let dataset = Dataset::from_records(vec![vec![
            ("Task", CellValue::from("Migrate the billing database")),
            ("Start", CellValue::from("2024-03-01")),
            ("End", CellValue::from("2024-03-04")),
        ]]);
        let spec = build_gantt(&dataset, &GanttRoles::new("Task", "Start", "End"), &StyleConfig::default());
        assert_eq!(spec.grid.unwrap().left, 28 * 7);
        assert!(spec.legend.is_none());
    }
}
