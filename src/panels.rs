//! Multi-panel figure helpers.

/// Panel width and height in inches for plain axes
const PANEL_SIZE: (f64, f64) = (3.5, 2.5);
/// Map projections leave room for coastlines and gridline labels
const MAP_PANEL_SIZE: (f64, f64) = (3.0, 2.0);

/// Labels `a.`, `b.`, ... for `n` panels.
///
/// Past `z.` the labels continue `aa.`, `ab.`, ... in the manner of
/// spreadsheet columns.
pub fn panel_labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}.", letters(i))).collect()
}

/// Bijective base-26 lowercase name of `index`
fn letters(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'a' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    name.into_iter().map(char::from).collect()
}

/// Figure size for an `nrows` x `ncols` grid of panels
pub fn panel_figsize(nrows: usize, ncols: usize, map_projection: bool) -> (f64, f64) {
    let (w, h) = if map_projection {
        MAP_PANEL_SIZE
    } else {
        PANEL_SIZE
    };
    (ncols as f64 * w, nrows as f64 * h)
}
