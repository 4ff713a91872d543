//! Inline SVG rendering of equity curves.
//!
//! One polyline per simulation, x is the trade number and y the equity.
//! Colors are spread around the hue wheel by index so a report renders the
//! same way every time.

use eqsim_domain::EquityCurve;

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 400.0;
const MARGIN: f64 = 56.0;

/// Color of the `index`-th curve.
#[must_use]
pub fn curve_color(index: usize) -> String {
    let hue = (index as f64 * 137.508) % 360.0;
    format!("hsl({hue:.0}, 70%, 50%)")
}

fn bounds(curves: &[EquityCurve]) -> (f64, f64) {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for value in curves.iter().flat_map(|c| c.points().iter().copied()) {
        if value.is_finite() {
            lo = lo.min(value);
            hi = hi.max(value);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 1.0, hi + 1.0);
    }
    (lo, hi)
}

/// Renders all curves into a standalone `<svg>` element.
#[must_use]
pub fn render_svg(curves: &[EquityCurve]) -> String {
    let (lo, hi) = bounds(curves);
    let steps = curves.iter().map(EquityCurve::len).max().unwrap_or(1);
    let plot_w = WIDTH - 2.0 * MARGIN;
    let plot_h = HEIGHT - 2.0 * MARGIN;

    let x = |i: usize| {
        if steps > 1 {
            MARGIN + plot_w * i as f64 / (steps - 1) as f64
        } else {
            MARGIN
        }
    };
    let y = |v: f64| MARGIN + plot_h * (hi - v) / (hi - lo);

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" class=\"equity-chart\">\n\
         <rect x=\"{MARGIN}\" y=\"{MARGIN}\" width=\"{plot_w}\" height=\"{plot_h}\" fill=\"none\" stroke=\"#ddd\"/>\n"
    );

    for (index, curve) in curves.iter().enumerate() {
        let points: Vec<String> = curve
            .points()
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| format!("{:.2},{:.2}", x(i), y(*v)))
            .collect();
        svg.push_str(&format!(
            "<polyline fill=\"none\" stroke-width=\"1\" stroke=\"{}\" points=\"{}\"><title>Simulation {}</title></polyline>\n",
            curve_color(index),
            points.join(" "),
            index + 1
        ));
    }

    let (mid_x, mid_y) = (WIDTH / 2.0, HEIGHT / 2.0);
    svg.push_str(&format!(
        "<text x=\"{mid_x:.0}\" y=\"{:.0}\" text-anchor=\"middle\" font-size=\"12\">Trade Number</text>\n\
         <text x=\"16\" y=\"{mid_y:.0}\" text-anchor=\"middle\" font-size=\"12\" transform=\"rotate(-90 16 {mid_y:.0})\">Equity</text>\n\
         <text x=\"{label_x:.0}\" y=\"{:.0}\" text-anchor=\"end\" font-size=\"10\">{hi:.2}</text>\n\
         <text x=\"{label_x:.0}\" y=\"{:.0}\" text-anchor=\"end\" font-size=\"10\">{lo:.2}</text>\n",
        HEIGHT - 16.0,
        MARGIN + 4.0,
        HEIGHT - MARGIN,
        label_x = MARGIN - 4.0,
    ));
    svg.push_str("</svg>");
    svg
}
