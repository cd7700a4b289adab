//! Scanline triangle rasterization.
//!
//! Triangles arrive as three real-valued screen points and are filled column
//! by column. The sweep shape depends on how many vertices share a screen
//! column: all three collapse to a single vertical line, a shared pair leaves
//! one flat vertical edge with an apex to sweep toward, and three distinct
//! columns split the fill at the middle vertex into two sweeps against the
//! long edge. Columns are resampled at pixel centers after the first step so
//! adjacent spans meet without seams.

use crate::color::TermColor;
use crate::framebuffer::Framebuffer;
use crate::ScreenPoint;

/// Vertices ordered by screen column for the horizontal sweep.
///
/// Ties keep the original vertex order deterministic: the earliest vertex
/// wins the left slot, and of the two remaining the latest wins the right
/// slot.
struct Span {
    left: ScreenPoint,
    center: ScreenPoint,
    right: ScreenPoint,
}

fn classify(points: [ScreenPoint; 3]) -> Span {
    let mut left = 0;
    for i in 1..3 {
        if points[i].x < points[left].x {
            left = i;
        }
    }

    let (a, b) = match left {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let right = if points[b].x >= points[a].x { b } else { a };
    let center = 3 - left - right;

    Span {
        left: points[left],
        center: points[center],
        right: points[right],
    }
}

/// Paints the pixels covered by one projected triangle.
pub(crate) fn fill_triangle(frame: &mut Framebuffer, points: [ScreenPoint; 3], color: TermColor) {
    let span = classify(points);

    if span.left.x == span.center.x && span.center.x == span.right.x {
        fill_single_column(frame, points, span.center.x, color);
    } else if span.left.x == span.center.x || span.center.x == span.right.x {
        fill_flat_edge(frame, span, color);
    } else {
        fill_split(frame, span, color);
    }
}

/// The triangle is edge-on: one pixel column between its lowest and highest
/// point.
fn fill_single_column(
    frame: &mut Framebuffer,
    points: [ScreenPoint; 3],
    x: f32,
    color: TermColor,
) {
    if x < 0.0 || x >= frame.width() as f32 {
        return;
    }

    let mut max = points[0].y;
    let mut min = points[0].y;
    for p in &points[1..] {
        max = max.max(p.y);
        min = min.min(p.y);
    }

    let mut y = max;
    while y > min {
        frame.paint(x, y, color);
        y -= 1.0;
    }
}

/// Two vertices share a column, forming one flat vertical edge; the sweep
/// walks from that edge toward the lone apex.
fn fill_flat_edge(frame: &mut Framebuffer, span: Span, color: TermColor) {
    let Span {
        left,
        center,
        right,
    } = span;

    let (top, bottom, apex, toward_left) = if left.x == center.x {
        let (top, bottom) = if left.y > center.y {
            (left, center)
        } else {
            (center, left)
        };
        (top, bottom, right, false)
    } else {
        let (top, bottom) = if right.y > center.y {
            (right, center)
        } else {
            (center, right)
        };
        (top, bottom, left, true)
    };

    // The dispatch on exact column equality keeps this nonzero: a vertical
    // apex edge would have taken the single-column path.
    let run = top.x - apex.x;
    let upper_slope = (top.y - apex.y) / run;
    let lower_slope = (bottom.y - apex.y) / run;

    let mut x = top.x;
    if toward_left {
        while x > apex.x {
            let top_y = upper_slope * (x - apex.x) + apex.y;
            let bottom_y = lower_slope * (x - apex.x) + apex.y;
            fill_column(frame, x, top_y, bottom_y, color);
            x = snap_to_center(x) - 1.0;
        }
        if fraction(apex.x) > 0.5 {
            frame.paint(apex.x, apex.y, color);
        }
    } else {
        while x < apex.x {
            let top_y = upper_slope * (x - apex.x) + apex.y;
            let bottom_y = lower_slope * (x - apex.x) + apex.y;
            fill_column(frame, x, top_y, bottom_y, color);
            x = snap_to_center(x) + 1.0;
        }
        if fraction(apex.x) < 0.5 {
            frame.paint(apex.x, apex.y, color);
        }
    }
}

/// All three vertices sit in distinct columns: sweep left to center against
/// the long edge, then center to right.
fn fill_split(frame: &mut Framebuffer, span: Span, color: TermColor) {
    let Span {
        left,
        center,
        right,
    } = span;

    // Distinct columns on all three vertices keep every denominator nonzero.
    let slope_left_center = (center.y - left.y) / (center.x - left.x);
    let slope_left_right = (right.y - left.y) / (right.x - left.x);
    let slope_center_right = (right.y - center.y) / (right.x - center.x);
    let width = frame.width() as f32;

    let mut x = left.x;
    while x < center.x {
        if x < 0.0 || x >= width {
            // Off-screen columns advance a full step, unsnapped.
            x += 1.0;
            continue;
        }
        let mut top_y = slope_left_center * (x - left.x) + left.y;
        let mut bottom_y = slope_left_right * (x - left.x) + left.y;
        if top_y < bottom_y {
            core::mem::swap(&mut top_y, &mut bottom_y);
        }
        fill_column(frame, x, top_y, bottom_y, color);
        x = snap_to_center(x) + 1.0;
    }

    let mut x = center.x;
    while x < right.x {
        if x < 0.0 || x >= width {
            x += 1.0;
            continue;
        }
        let mut top_y = slope_center_right * (x - right.x) + right.y;
        let mut bottom_y = slope_left_right * (x - right.x) + right.y;
        if top_y < bottom_y {
            core::mem::swap(&mut top_y, &mut bottom_y);
        }
        fill_column(frame, x, top_y, bottom_y, color);
        x = snap_to_center(x) + 1.0;
    }

    if fraction(right.x) < 0.5 && right.x >= 0.0 && right.x < width {
        frame.paint(right.x, right.y, color);
    }
}

/// Fills one column top-down, then paints once more at the lower bound so
/// truncation cannot open a seam between neighboring spans.
fn fill_column(frame: &mut Framebuffer, x: f32, top_y: f32, bottom_y: f32, color: TermColor) {
    let mut y = top_y;
    while y > bottom_y {
        frame.paint(x, y, color);
        y -= 1.0;
    }
    frame.paint(x, bottom_y, color);
}

/// Moves a sweep coordinate onto the center of its pixel column.
fn snap_to_center(x: f32) -> f32 {
    if fraction(x) != 0.5 {
        libm::floorf(x) + 0.5
    } else {
        x
    }
}

fn fraction(x: f32) -> f32 {
    x - libm::floorf(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    fn fill(size: u8, points: [(f32, f32); 3]) -> BTreeSet<(usize, usize)> {
        let mut frame = Framebuffer::new(size, size);
        let points = points.map(|(x, y)| ScreenPoint::new(x, y));
        fill_triangle(&mut frame, points, TermColor::Red);

        let mut painted = BTreeSet::new();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                if frame.get(x, y) != TermColor::Black {
                    painted.insert((x, y));
                }
            }
        }
        painted
    }

    fn pixels(expected: &[(usize, usize)]) -> BTreeSet<(usize, usize)> {
        expected.iter().copied().collect()
    }

    #[test]
    fn classify_breaks_ties_by_vertex_order() {
        let column = [
            ScreenPoint::new(1.0, 0.0),
            ScreenPoint::new(1.0, 5.0),
            ScreenPoint::new(1.0, 9.0),
        ];
        let span = classify(column);
        // Earliest vertex takes left, latest of the rest takes right.
        assert_eq!(span.left.y, 0.0);
        assert_eq!(span.center.y, 5.0);
        assert_eq!(span.right.y, 9.0);
    }

    #[test]
    fn edge_on_triangle_fills_one_column() {
        let painted = fill(4, [(2.0, 0.5), (2.0, 3.2), (2.0, 1.0)]);
        assert_eq!(painted, pixels(&[(2, 1), (2, 2), (2, 3)]));
    }

    #[test]
    fn edge_on_triangle_off_screen_is_dropped() {
        assert!(fill(4, [(-1.0, 0.5), (-1.0, 3.2), (-1.0, 1.0)]).is_empty());
        assert!(fill(4, [(4.0, 0.5), (4.0, 3.2), (4.0, 1.0)]).is_empty());
    }

    #[test]
    fn flat_edge_sweep_toward_left_apex() {
        let painted = fill(4, [(0.5, 2.0), (3.5, 0.5), (3.5, 3.5)]);
        assert_eq!(
            painted,
            pixels(&[
                (1, 1),
                (1, 2),
                (2, 1),
                (2, 2),
                (2, 3),
                (3, 0),
                (3, 1),
                (3, 2),
                (3, 3),
            ])
        );
    }

    #[test]
    fn flat_edge_sweep_toward_right_apex() {
        let painted = fill(4, [(0.5, 0.5), (0.5, 3.5), (3.5, 2.0)]);
        assert_eq!(
            painted,
            pixels(&[
                (0, 0),
                (0, 1),
                (0, 2),
                (0, 3),
                (1, 1),
                (1, 2),
                (1, 3),
                (2, 1),
                (2, 2),
            ])
        );
    }

    #[test]
    fn split_sweep_fills_both_halves() {
        let painted = fill(6, [(0.5, 0.5), (2.5, 3.5), (4.5, 0.5)]);
        assert_eq!(
            painted,
            pixels(&[
                (0, 0),
                (1, 0),
                (1, 1),
                (1, 2),
                (2, 0),
                (2, 1),
                (2, 2),
                (2, 3),
                (3, 0),
                (3, 1),
                (3, 2),
            ])
        );
    }

    #[test]
    fn split_sweep_swaps_inverted_bounds() {
        // Center below the long edge, so both sweeps interpolate upside down.
        let painted = fill(6, [(0.5, 3.5), (2.5, 0.5), (4.5, 3.5)]);
        assert_eq!(
            painted,
            pixels(&[
                (0, 3),
                (1, 2),
                (1, 3),
                (2, 0),
                (2, 1),
                (2, 2),
                (2, 3),
                (3, 2),
                (3, 3),
            ])
        );
    }

    #[test]
    fn split_sweep_skips_off_screen_columns() {
        let painted = fill(4, [(-1.5, 0.5), (1.5, 2.5), (3.5, 0.5)]);
        assert_eq!(
            painted,
            pixels(&[(0, 0), (0, 1), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1)])
        );
    }
}
