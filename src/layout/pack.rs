//! Front-chain circle packing of sibling circles.
//!
//! Circles are placed one at a time, in input order, tangent to two circles
//! of the current front chain, next to the chain pair closest to the origin.
//! No sorting is applied, so the packing follows insertion order.
//!
//! Reference: Wang, W., Wang, H., Dai, G., & Wang, H. (2006). "Visualization
//! of Large Hierarchical Data by Circle Packing." *CHI '06*, 517-520.

use super::enclose::enclose;
use crate::geometry::Circle;

/// Pack `circles` (radii given, positions ignored) around the origin.
///
/// On return each circle has its position set, the circles do not overlap,
/// and their smallest enclosing circle is centered at the origin. Returns
/// the radius of that enclosing circle.
pub fn pack_siblings(circles: &mut [Circle]) -> f64 {
    let n = circles.len();
    if n == 0 {
        return 0.0;
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return circles[0].r;
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return circles[0].r + circles[1].r;
    }

    let (x, y) = place(&circles[1], &circles[0], circles[2].r);
    circles[2].x = x;
    circles[2].y = y;

    // Front chain as a circular doubly linked list over circle indices.
    let mut next = vec![0usize; n];
    let mut prev = vec![0usize; n];
    let (mut a, mut b) = (0usize, 1usize);
    next[0] = 1;
    prev[1] = 0;
    next[1] = 2;
    prev[2] = 1;
    next[2] = 0;
    prev[0] = 2;

    let mut i = 3;
    'pack: while i < n {
        let (x, y) = place(&circles[a], &circles[b], circles[i].r);
        circles[i].x = x;
        circles[i].y = y;

        // Walk the chain both ways from the (a, b) pair, looking for a
        // circle the candidate would intersect.
        let mut j = next[b];
        let mut k = prev[a];
        let mut sj = circles[b].r;
        let mut sk = circles[a].r;
        loop {
            if sj <= sk {
                if intersects(&circles[j], &circles[i]) {
                    b = j;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(&circles[k], &circles[i]) {
                    a = k;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = prev[k];
            }
            if j == next[k] {
                break;
            }
        }

        // Insert between a and b.
        prev[i] = a;
        next[i] = b;
        next[a] = i;
        prev[b] = i;

        // Next pair: the chain edge closest to the origin.
        let mut best = a;
        let mut best_score = score(&circles[a], &circles[next[a]]);
        let mut c = next[i];
        while c != i {
            let s = score(&circles[c], &circles[next[c]]);
            if s < best_score {
                best = c;
                best_score = s;
            }
            c = next[c];
        }
        a = best;
        b = next[a];
        i += 1;
    }

    let mut chain = vec![circles[b]];
    let mut c = next[b];
    while c != b {
        chain.push(circles[c]);
        c = next[c];
    }

    let Some(mut e) = enclose_front_chain(&chain) else {
        return 0.0;
    };
    for p in &chain {
        e.r = e.r.max(e.center().distance(p.center()) + p.r);
    }

    for circle in circles.iter_mut() {
        circle.x -= e.x;
        circle.y -= e.y;
    }
    e.r
}

// Zero-radius circles make the basis computation degenerate; they sit on
// the boundary of their neighbours, so the caller widens the result instead.
fn enclose_front_chain(chain: &[Circle]) -> Option<Circle> {
    let solid: Vec<Circle> = chain.iter().copied().filter(|c| c.r > 0.0).collect();
    if solid.is_empty() {
        return chain.first().map(|c| Circle::new(c.x, c.y, 0.0));
    }
    enclose(&solid)
}

/// Position of a circle of radius `r` tangent to both `b` and `a`.
fn place(b: &Circle, a: &Circle, r: f64) -> (f64, f64) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;

    if d2 == 0.0 {
        return (a.x + r, a.y);
    }

    let a2 = (a.r + r).powi(2);
    let b2 = (b.r + r).powi(2);
    if a2 > b2 {
        let x = (d2 + b2 - a2) / (2.0 * d2);
        let y = (b2 / d2 - x * x).max(0.0).sqrt();
        (b.x - x * dx - y * dy, b.y - x * dy + y * dx)
    } else {
        let x = (d2 + a2 - b2) / (2.0 * d2);
        let y = (a2 / d2 - x * x).max(0.0).sqrt();
        (a.x + x * dx - y * dy, a.y + x * dy + y * dx)
    }
}

fn intersects(a: &Circle, b: &Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Squared distance from the origin to the weighted midpoint of a chain edge.
fn score(a: &Circle, b: &Circle) -> f64 {
    let ab = a.r + b.r;
    if ab <= 0.0 {
        return a.x * a.x + a.y * a.y;
    }
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}
