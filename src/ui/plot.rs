use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, Vec2};
use egui_plot::{Bar as PlotBar, BarChart, Plot};

use crate::color::{contrast_text, series_colors};
use crate::data::chart::{Bar, Chart, ChartKind, Wedge};
use crate::state::AppState;
use crate::ui::pipeline_error;

/// Angular step used to approximate pie arcs.
const ARC_STEP: f64 = 0.04;

// ---------------------------------------------------------------------------
// Charts page (central panel)
// ---------------------------------------------------------------------------

pub fn charts_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Survey Data Visualization");
    ui.add_space(6.0);

    let columns = match state.session.dataset() {
        Ok(ds) => ds.column_names(),
        Err(e) => {
            pipeline_error(ui, &e);
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Choose a column to visualize");
        let selected = state.chart_column.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("chart_column")
            .selected_text(&selected)
            .show_ui(ui, |ui: &mut Ui| {
                for col in &columns {
                    ui.selectable_value(&mut state.chart_column, Some(col.clone()), col);
                }
            });
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select chart type");
        for kind in [ChartKind::Bar, ChartKind::Pie] {
            ui.radio_value(&mut state.chart_kind, kind, kind.to_string());
        }
    });
    ui.separator();

    let Some(column) = state.chart_column.as_deref() else {
        ui.label("Pick a column to chart.");
        return;
    };

    let chart = match state.session.visualize(column, state.chart_kind) {
        Ok(chart) => chart,
        Err(e) => {
            pipeline_error(ui, &e);
            return;
        }
    };

    if chart.is_empty() {
        ui.label(format!("No values to chart in '{}'.", chart.column()));
        return;
    }

    let height = state.config.chart_height;
    match &chart {
        Chart::Bar { column, bars } => bar_chart(ui, column, bars, height),
        Chart::Pie { wedges, .. } => pie_chart(ui, wedges, height),
    }
}

// ---------------------------------------------------------------------------
// Bar chart (egui_plot)
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, column: &str, bars: &[Bar], height: f32) {
    let colors = series_colors(bars.len());
    let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();

    let plot_bars: Vec<PlotBar> = bars
        .iter()
        .zip(&colors)
        .enumerate()
        .map(|(i, (bar, color))| {
            PlotBar::new(i as f64, bar.height)
                .name(&bar.label)
                .fill(*color)
                .width(0.7)
        })
        .collect();

    Plot::new("value_counts_bar")
        .height(height)
        .x_axis_label(column)
        .y_axis_label("count")
        .x_axis_formatter(move |mark, _range| {
            let x = mark.value;
            if x < -0.5 || (x - x.round()).abs() > 1e-6 {
                return String::new();
            }
            labels.get(x.round() as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(plot_bars));
        });
}

// ---------------------------------------------------------------------------
// Pie chart (custom painter)
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, wedges: &[Wedge], height: f32) {
    let colors = series_colors(wedges.len());
    let size = Vec2::new(ui.available_width().min(height * 1.4), height);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());

    let center = response.rect.center();
    let radius = response.rect.width().min(response.rect.height()) * 0.40;
    let text_color = ui.visuals().text_color();

    for (wedge, &color) in wedges.iter().zip(&colors) {
        let steps = ((wedge.sweep / ARC_STEP).ceil() as usize).max(1);
        for s in 0..steps {
            let a0 = wedge.start_angle + wedge.sweep * s as f64 / steps as f64;
            let a1 = wedge.start_angle + wedge.sweep * (s + 1) as f64 / steps as f64;
            painter.add(egui::Shape::convex_polygon(
                vec![
                    center,
                    on_circle(center, radius, a0),
                    on_circle(center, radius, a1),
                ],
                color,
                Stroke::NONE,
            ));
        }

        let mid = wedge.mid_angle();
        painter.text(
            on_circle(center, radius * 0.62, mid),
            Align2::CENTER_CENTER,
            &wedge.percent_label,
            FontId::proportional(13.0),
            contrast_text(color),
        );
        painter.text(
            on_circle(center, radius * 1.12, mid),
            label_anchor(mid),
            &wedge.label,
            FontId::proportional(13.0),
            text_color,
        );
    }

    ui.add_space(8.0);
    legend(ui, wedges, &colors);
}

fn legend(ui: &mut Ui, wedges: &[Wedge], colors: &[Color32]) {
    for (wedge, &color) in wedges.iter().zip(colors) {
        ui.horizontal(|ui: &mut Ui| {
            let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
            ui.painter().rect_filled(swatch, 2.0, color);
            ui.label(format!(
                "{}: {} ({})",
                wedge.label, wedge.count, wedge.percent_label
            ));
        });
    }
}

/// Point at `angle` (counter-clockwise, radians) in screen space, where y grows down.
fn on_circle(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    center + radius * Vec2::new(angle.cos() as f32, -(angle.sin() as f32))
}

/// Anchor outside labels so they grow away from the pie.
fn label_anchor(angle: f64) -> Align2 {
    let (x, y) = (angle.cos(), angle.sin());
    let h = if x > 0.3 {
        egui::Align::Min
    } else if x < -0.3 {
        egui::Align::Max
    } else {
        egui::Align::Center
    };
    let v = if y > 0.3 {
        egui::Align::Max
    } else if y < -0.3 {
        egui::Align::Min
    } else {
        egui::Align::Center
    };
    Align2([h, v])
}
