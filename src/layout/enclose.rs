//! Smallest enclosing circle of a set of circles.
//!
//! Iterative form of the Matoušek-Sharir-Welzl algorithm with a basis of at
//! most three circles. Input order is shuffled with a fixed-seed LCG so the
//! result is deterministic.
//!
//! Reference: Welzl, E. (1991). "Smallest enclosing disks (balls and
//! ellipsoids)." *New Results and New Trends in Computer Science*, LNCS 555.

use crate::geometry::Circle;

/// Smallest circle enclosing every circle in `circles`.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn enclose(circles: &[Circle]) -> Option<Circle> {
    let mut shuffled = circles.to_vec();
    shuffle(&mut shuffled);

    let mut basis: Vec<Circle> = Vec::with_capacity(3);
    let mut enclosing: Option<Circle> = None;
    let mut i = 0;

    while i < shuffled.len() {
        let p = shuffled[i];
        match enclosing {
            Some(e) if encloses_weak(&e, &p) => i += 1,
            _ => {
                basis = match extend_basis(&basis, &p) {
                    Some(extended) => extended,
                    // Numerically degenerate basis; fall back to a circle around both.
                    None => vec![enclosing.map_or(p, |e| enclose_pair(&e, &p))],
                };
                enclosing = Some(enclose_basis(&basis));
                i = 0;
            }
        }
    }

    enclosing
}

fn shuffle(circles: &mut [Circle]) {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    let mut state: u64 = 1;
    let mut m = circles.len();
    while m > 0 {
        state = (A * state + C) % M;
        let i = ((state as f64 / M as f64) * m as f64) as usize;
        m -= 1;
        circles.swap(m, i.min(m));
    }
}

fn extend_basis(basis: &[Circle], p: &Circle) -> Option<Vec<Circle>> {
    if encloses_weak_all(p, basis) {
        return Some(vec![*p]);
    }

    for b in basis {
        if encloses_not(p, b) && encloses_weak_all(&enclose_pair(b, p), basis) {
            return Some(vec![*b, *p]);
        }
    }

    for (i, bi) in basis.iter().enumerate() {
        for bj in &basis[i + 1..] {
            if encloses_not(&enclose_pair(bi, bj), p)
                && encloses_not(&enclose_pair(bi, p), bj)
                && encloses_not(&enclose_pair(bj, p), bi)
                && encloses_weak_all(&enclose_triple(bi, bj, p), basis)
            {
                return Some(vec![*bi, *bj, *p]);
            }
        }
    }

    None
}

fn encloses_not(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: &Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
    match basis {
        [a] => *a,
        [a, b] => enclose_pair(a, b),
        [a, b, c] => enclose_triple(a, b, c),
        _ => Circle::default(),
    }
}

fn enclose_pair(a: &Circle, b: &Circle) -> Circle {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = x21.hypot(y21);

    if l <= f64::EPSILON {
        return if a.r >= b.r { *a } else { *b };
    }

    Circle::new(
        (a.x + b.x + x21 / l * r21) / 2.0,
        (a.y + b.y + y21 / l * r21) / 2.0,
        (l + a.r + b.r) / 2.0,
    )
}

fn enclose_triple(a: &Circle, b: &Circle, c: &Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);

    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });

    let circle = Circle::new(x1 + xa + xb * r, y1 + ya + yb * r, r);
    if circle.x.is_finite() && circle.y.is_finite() && circle.r.is_finite() {
        return circle;
    }

    // Collinear centers: the widest pairwise enclosure.
    [enclose_pair(a, b), enclose_pair(a, c), enclose_pair(b, c)]
        .into_iter()
        .fold(Circle::default(), |best, e| if e.r > best.r { e } else { best })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_enclose_contains_all(
            circles in prop::collection::vec(
                (-100.0f64..100.0, -100.0f64..100.0, 0.1f64..20.0),
                1..30,
            )
        ) {
            let circles: Vec<Circle> =
                circles.into_iter().map(|(x, y, r)| Circle::new(x, y, r)).collect();
            let e = enclose(&circles).expect("non-empty input");
            for c in &circles {
                prop_assert!(e.encloses(c, 1e-6 * e.r.max(1.0)));
            }
        }
    }
}
