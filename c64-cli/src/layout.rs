//! Generate an SVG visualization of the C64 binding table.
//!
//! One rectangle per matrix cell in an 8×8 grid: the primary code's label
//! in the middle, and the restore-modified label, if any, in the corner.

use c64_keymap::{binding_for, COLS, ROWS};

/// Key unit size in SVG pixels.
const U: f64 = 54.0;
/// Gap between keys.
const GAP: f64 = 4.0;
/// Step: key + gap.
const S: f64 = U + GAP;
/// Key corner radius.
const R: f64 = 4.0;
/// Margin around the SVG content.
const MARGIN: f64 = 20.0;

/// Render the full binding table as an SVG document.
pub fn render_svg() -> String {
    let width = MARGIN * 2.0 + COLS as f64 * S - GAP;
    let height = MARGIN * 2.0 + ROWS as f64 * S - GAP;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\" font-family=\"sans-serif\">\n"
    ));
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

    for row in 0..ROWS {
        for col in 0..COLS {
            let binding = binding_for(row, col);
            let x = MARGIN + col as f64 * S;
            let y = MARGIN + row as f64 * S;

            svg.push_str(&format!(
                "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{U}\" height=\"{U}\" rx=\"{R}\" \
                 fill=\"#f2f2f2\" stroke=\"#333333\"/>\n"
            ));
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\" text-anchor=\"middle\">{}</text>\n",
                x + U / 2.0,
                y + U / 2.0 + 4.0,
                escape(binding.primary.display_name()),
            ));
            if let Some(alt) = binding.alternate {
                svg.push_str(&format!(
                    "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"9\" text-anchor=\"end\" \
                     fill=\"#aa3333\">{}</text>\n",
                    x + U - 5.0,
                    y + 13.0,
                    escape(alt.display_name()),
                ));
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Print the binding table as a text grid, one matrix row per line.
pub fn print_table() {
    for row in 0..ROWS {
        let mut line = String::new();
        for col in 0..COLS {
            let binding = binding_for(row, col);
            let cell = match binding.alternate {
                Some(alt) => format!("{}/{}", binding.primary.display_name(), alt.display_name()),
                None => binding.primary.display_name().to_string(),
            };
            line.push_str(&format!("{:<10}", cell));
        }
        println!("{}", line.trim_end());
    }
}

/// Minimal XML escaping for key labels.
fn escape(label: &str) -> String {
    label
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
