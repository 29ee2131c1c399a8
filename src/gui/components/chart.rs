// src/gui/components/chart.rs
//
// Draws `report::Chart` with the plain egui painter: time on x, the 0–10
// vote scale on y. The legend doubles as series toggles; hovering shows the
// nearest point.

use std::collections::HashSet;

use chrono::DateTime;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Vec2};

use crate::{
    config::consts::SIG_FIGS,
    gui::app::App,
    report::{fmt_sig, Chart, ChartPoint, ChartSeries, SeriesStyle},
};

const MARGIN_LEFT: f32 = 44.0;
const MARGIN_RIGHT: f32 = 12.0;
const MARGIN_TOP: f32 = 28.0;
const MARGIN_BOTTOM: f32 = 30.0;
const HOVER_RADIUS: f32 = 8.0;

fn color([r, g, b, a]: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Same hue, fully opaque; for legend text.
fn solid([r, g, b, _]: [u8; 4]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

fn fmt_date(ms: i64, pattern: &str) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|d| d.format(pattern).to_string())
        .unwrap_or_default()
}

/// Data → screen mapping for the plot frame.
struct Axes {
    frame: Rect,
    x0: i64,
    x1: i64,
    y_max: f64,
}

impl Axes {
    fn new(frame: Rect, chart: &Chart) -> Self {
        let (lo, hi) = chart.x_range;
        // a little air on both sides so edge points are not cut in half
        let pad = ((hi - lo) / 50).max(1);
        Self { frame, x0: lo - pad, x1: hi + pad, y_max: chart.y_max.max(1.0) }
    }

    fn x(&self, ms: i64) -> f32 {
        let t = (ms - self.x0) as f64 / (self.x1 - self.x0) as f64;
        self.frame.left() + t as f32 * self.frame.width()
    }

    fn y(&self, v: f64) -> f32 {
        self.frame.bottom() - (v / self.y_max) as f32 * self.frame.height()
    }

    fn pos(&self, p: &ChartPoint) -> Pos2 {
        Pos2::new(self.x(p.x), self.y(p.y))
    }
}

fn visible<'a>(chart: &'a Chart, hidden: &'a HashSet<&'static str>) -> impl Iterator<Item = &'a ChartSeries> + 'a {
    chart.series.iter().filter(move |s| !hidden.contains(s.label))
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(report) = &app.report else { return };
    let chart = &report.chart;
    let hidden = &mut app.hidden_series;

    // --- Legend / toggles ---
    ui.horizontal_wrapped(|ui| {
        for s in &chart.series {
            let mut shown = !hidden.contains(s.label);
            let text = egui::RichText::new(s.label).color(solid(s.color));
            if ui.checkbox(&mut shown, text).changed() {
                logd!("UI: series {} shown={}", s.label, shown);
                if shown { hidden.remove(s.label); } else { hidden.insert(s.label); }
            }
        }
    });

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let full = response.rect;
    let frame = Rect::from_min_max(
        full.min + Vec2::new(MARGIN_LEFT, MARGIN_TOP),
        full.max - Vec2::new(MARGIN_RIGHT, MARGIN_BOTTOM),
    );
    if frame.width() < 10.0 || frame.height() < 10.0 {
        return;
    }

    let visuals = ui.visuals();
    let fg = visuals.text_color();
    let grid = visuals.widgets.noninteractive.bg_stroke.color;
    let small = FontId::proportional(11.0);
    let axes = Axes::new(frame, chart);

    painter.text(
        Pos2::new(full.center().x, full.top() + 4.0),
        Align2::CENTER_TOP,
        &chart.title,
        FontId::proportional(15.0),
        fg,
    );

    // --- Grid + axes ---
    let mut v = 0.0;
    while v <= axes.y_max + 1e-9 {
        let y = axes.y(v);
        painter.line_segment([Pos2::new(frame.left(), y), Pos2::new(frame.right(), y)], Stroke::new(0.5, grid));
        painter.text(Pos2::new(frame.left() - 6.0, y), Align2::RIGHT_CENTER, format!("{v:.0}"), small.clone(), fg);
        v += 2.0;
    }

    const X_TICKS: i64 = 6;
    for i in 0..=X_TICKS {
        let ms = axes.x0 + (axes.x1 - axes.x0) * i / X_TICKS;
        let x = axes.x(ms);
        painter.line_segment([Pos2::new(x, frame.top()), Pos2::new(x, frame.bottom())], Stroke::new(0.5, grid));
        painter.text(Pos2::new(x, frame.bottom() + 4.0), Align2::CENTER_TOP, fmt_date(ms, "%Y-%m"), small.clone(), fg);
    }
    painter.rect_stroke(frame, 0.0, Stroke::new(1.0, grid), StrokeKind::Inside);
    painter.text(Pos2::new(frame.left() - 6.0, frame.top() - 4.0), Align2::RIGHT_BOTTOM, "Vote", small.clone(), fg);

    // --- Series ---
    let plot = painter.with_clip_rect(frame.expand(4.0));
    let hidden: &HashSet<&'static str> = hidden;

    for s in visible(chart, hidden) {
        let c = color(s.color);
        match s.style {
            SeriesStyle::Line => {
                let pts: Vec<Pos2> = s.points.iter().map(|p| axes.pos(p)).collect();
                plot.add(Shape::line(pts, Stroke::new(2.0, c)));
            }
            SeriesStyle::Points => {
                for p in &s.points {
                    plot.circle_filled(axes.pos(p), 2.5, c);
                }
            }
            SeriesStyle::Markers => {
                for p in &s.points {
                    let x = axes.x(p.x);
                    let ends = [Pos2::new(x, axes.y(0.0)), Pos2::new(x, axes.y(p.y))];
                    plot.extend(Shape::dashed_line(&ends, Stroke::new(1.0, c), 5.0, 10.0));
                }
            }
        }
    }

    // --- Hover ---
    let Some(pointer) = response.hover_pos().filter(|p| frame.contains(*p)) else { return };

    let nearest = visible(chart, hidden)
        .flat_map(|s| s.points.iter().map(move |p| (s, p)))
        .map(|(s, p)| {
            let d = match s.style {
                // a marker is a whole vertical rule
                SeriesStyle::Markers => (axes.x(p.x) - pointer.x).abs(),
                _ => axes.pos(p).distance(pointer),
            };
            (d, s, p)
        })
        .filter(|(d, _, _)| *d <= HOVER_RADIUS)
        .min_by(|a, b| a.0.total_cmp(&b.0));

    let Some((_, series, point)) = nearest else { return };

    let label = match &point.label {
        Some(l) => l.clone(),
        None => format!("{}: {}", series.label, fmt_sig(point.y, SIG_FIGS)),
    };
    let text = format!("{}\n{}", fmt_date(point.x, "%Y-%m-%d"), label);

    if series.style != SeriesStyle::Markers {
        plot.circle_stroke(axes.pos(point), 4.0, Stroke::new(1.5, solid(series.color)));
    }

    let galley = painter.layout_no_wrap(text, FontId::proportional(12.0), fg);
    let mut tip = Rect::from_min_size(pointer + Vec2::new(12.0, 12.0), galley.size() + Vec2::splat(8.0));
    // keep it inside the widget
    if tip.right() > full.right() {
        tip = tip.translate(Vec2::new(-(tip.width() + 24.0), 0.0));
    }
    if tip.bottom() > full.bottom() {
        tip = tip.translate(Vec2::new(0.0, -(tip.height() + 24.0)));
    }
    painter.rect_filled(tip, 4.0, visuals.window_fill);
    painter.rect_stroke(tip, 4.0, Stroke::new(1.0, grid), StrokeKind::Inside);
    painter.galley(tip.min + Vec2::splat(4.0), galley, fg);
}
