//! Plotters-backed drawing of the two report images.
//!
//! Both renders delete the previous image before drawing a new one.
//! Drawing failures surface as `Render` errors; the driver logs and
//! keeps going, since images are a convenience on top of the CSVs.

use crate::shape::{BarData, MonthPivot};
use blotter_common::{Error, Result};
use blotter_engine::Table;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::fs;
use std::path::Path;
use tracing::info;

const BAR_CANVAS: (u32, u32) = (1500, 600);
const PIVOT_CANVAS: (u32, u32) = (800, 600);
const BAR_PURPLE: RGBColor = RGBColor(128, 0, 128);

/// Render the top-ten bar chart to `path`.
pub fn render_top_ten_chart(table: &Table, path: &Path) -> Result<()> {
    let data = BarData::from_table(table)?;
    remove_previous(path)?;
    draw_bar_chart(&data, path)
        .map_err(|err| Error::render(format!("drawing {}: {err}", path.display())))?;
    info!(path = %path.display(), bars = data.len(), "bar chart rendered");
    Ok(())
}

/// Render the year-by-month pivot image to `path`.
pub fn render_month_pivot(table: &Table, path: &Path) -> Result<()> {
    let pivot = MonthPivot::from_table(table)?;
    remove_previous(path)?;
    draw_pivot_table(&pivot, path)
        .map_err(|err| Error::render(format!("drawing {}: {err}", path.display())))?;
    info!(
        path = %path.display(),
        years = pivot.years().len(),
        months = pivot.months().len(),
        "pivot image rendered"
    );
    Ok(())
}

fn remove_previous(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .map_err(|err| Error::render(format!("removing old {}: {err}", path.display())))?;
    }
    Ok(())
}

fn draw_bar_chart(
    data: &BarData,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, BAR_CANVAS).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = data.max_count() + data.max_count() / 10 + 1;
    let mut chart = ChartBuilder::on(&root)
        .caption("Top Ten Crimes", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(160)
        .y_label_area_size(70)
        .build_cartesian_2d((0..data.len()).into_segmented(), 0i64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(data.len().max(1))
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(idx) | SegmentValue::Exact(idx) => {
                data.label(*idx).to_string()
            }
            SegmentValue::Last => String::new(),
        })
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Crime Types")
        .y_desc("Number of Crimes")
        .draw()?;

    chart.draw_series(data.counts().iter().enumerate().map(|(idx, &count)| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(idx), 0),
                (SegmentValue::Exact(idx + 1), count),
            ],
            BAR_PURPLE.filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    root.present()?;
    Ok(())
}

fn draw_pivot_table(
    pivot: &MonthPivot,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, PIVOT_CANVAS).into_drawing_area();
    root.fill(&WHITE)?;

    let title = TextStyle::from(("sans-serif", 24).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new("CrimesPerMonth", (400, 28), title))?;

    let cell_text = TextStyle::from(("sans-serif", 15).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));

    // One header row of years, one header column of months.
    let cols = pivot.years().len() as i32 + 1;
    let rows = pivot.months().len() as i32 + 1;
    let (x0, y0) = (60i32, 60i32);
    let (x1, y1) = (
        PIVOT_CANVAS.0 as i32 - 40,
        PIVOT_CANVAS.1 as i32 - 40,
    );
    let cell_w = (x1 - x0) / cols;
    let cell_h = (y1 - y0) / rows;

    for row in 0..rows {
        for col in 0..cols {
            let rx0 = x0 + col * cell_w;
            let ry0 = y0 + row * cell_h;
            let rx1 = rx0 + cell_w;
            let ry1 = ry0 + cell_h;

            if row == 0 && col > 0 {
                root.draw(&Rectangle::new(
                    [(rx0, ry0), (rx1, ry1)],
                    YELLOW.filled(),
                ))?;
            }
            root.draw(&Rectangle::new(
                [(rx0, ry0), (rx1, ry1)],
                BLACK.stroke_width(1),
            ))?;

            let label = match (row, col) {
                (0, 0) => String::new(),
                (0, c) => pivot.years()[c as usize - 1].to_string(),
                (r, 0) => pivot.months()[r as usize - 1].to_string(),
                (r, c) => pivot.cell(r as usize - 1, c as usize - 1).to_string(),
            };
            if !label.is_empty() {
                root.draw(&Text::new(
                    label,
                    (rx0 + cell_w / 2, ry0 + cell_h / 2),
                    cell_text.clone(),
                ))?;
            }
        }
    }

    root.present()?;
    Ok(())
}
