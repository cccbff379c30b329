use std::f64::consts::TAU;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::aggregate::{grand_total, LabelTotal};
use crate::fmt;
use crate::tui::{BORDER_STYLE, FOOTER_STYLE};

pub const PALETTE: &[Color] = &[
    Color::Rgb(80, 160, 240),
    Color::Rgb(240, 120, 80),
    Color::Rgb(80, 220, 100),
    Color::Rgb(230, 200, 60),
    Color::Rgb(180, 110, 230),
    Color::Rgb(60, 210, 210),
    Color::Rgb(230, 90, 160),
    Color::Rgb(160, 160, 160),
];

pub fn slice_color(i: usize) -> Color {
    PALETTE[i % PALETTE.len()]
}

/// Running share of the grand total at the end of each slice. The last
/// entry is 1.0. Empty when there is nothing positive to draw.
pub fn cumulative_shares(totals: &[LabelTotal]) -> Vec<f64> {
    let whole = grand_total(totals);
    if whole <= 0.0 {
        return Vec::new();
    }
    let mut acc = 0.0;
    totals
        .iter()
        .map(|t| {
            acc += t.total;
            acc / whole
        })
        .collect()
}

/// Index of the slice covering `share` (0.0..1.0, clockwise from the top).
pub fn slice_at(cumulative: &[f64], share: f64) -> usize {
    cumulative
        .iter()
        .position(|&end| share < end)
        .unwrap_or(cumulative.len().saturating_sub(1))
}

/// Braille dots inside a disc, bucketed by slice.
///
/// `cols` and `rows` are the terminal cells available. Braille packs 2x4
/// dots per cell, which makes dots square, so the x extent is scaled to keep
/// the disc round.
pub fn pie_points(totals: &[LabelTotal], cols: u16, rows: u16) -> (f64, Vec<Vec<(f64, f64)>>) {
    let cumulative = cumulative_shares(totals);
    let mut slices = vec![Vec::new(); totals.len()];
    if cumulative.is_empty() || cols == 0 || rows == 0 {
        return (1.0, slices);
    }

    let dots_x = cols as usize * 2;
    let dots_y = rows as usize * 4;
    let x_extent = dots_x as f64 / dots_y as f64;
    let radius = 0.95 * x_extent.min(1.0);
    let step_x = 2.0 * x_extent / dots_x as f64;
    let step_y = 2.0 / dots_y as f64;

    for ix in 0..dots_x {
        let x = -x_extent + (ix as f64 + 0.5) * step_x;
        for iy in 0..dots_y {
            let y = -1.0 + (iy as f64 + 0.5) * step_y;
            if x * x + y * y > radius * radius {
                continue;
            }
            let mut angle = x.atan2(y);
            if angle < 0.0 {
                angle += TAU;
            }
            slices[slice_at(&cumulative, angle / TAU)].push((x, y));
        }
    }
    (x_extent, slices)
}

/// Pie on the left, legend with amounts and shares on the right.
pub fn render_pie(frame: &mut Frame, area: Rect, title: &str, totals: &[LabelTotal]) {
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(BORDER_STYLE);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let whole = grand_total(totals);
    if totals.is_empty() || whole <= 0.0 {
        frame.render_widget(
            Paragraph::new(" Nothing to plot.").style(FOOTER_STYLE),
            inner,
        );
        return;
    }

    let [pie_area, legend_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(inner);

    let (x_extent, slices) = pie_points(totals, pie_area.width, pie_area.height);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (i, coords) in slices.iter().enumerate() {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: slice_color(i),
                });
            }
        });
    frame.render_widget(canvas, pie_area);

    let mut legend = Vec::with_capacity(totals.len());
    for (i, t) in totals.iter().enumerate() {
        legend.push(Line::from(vec![
            Span::styled(" ■ ", Style::default().fg(slice_color(i))),
            Span::raw(format!("{:<16} ", truncate(&t.label, 16))),
            Span::raw(format!("{:>10} ", fmt::amount(t.total))),
            Span::styled(format!("{:>6}", fmt::percent(t.total, whole)), FOOTER_STYLE),
        ]));
    }
    frame.render_widget(Paragraph::new(legend), legend_area);
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
