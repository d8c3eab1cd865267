#![allow(non_snake_case)]
#![allow(clippy::many_single_char_names)]
use crate::algebra::*;

// Complex scalar division (xr + i*xi) / (yr + i*yi)
fn cdiv<T: FloatT>(xr: T, xi: T, yr: T, yi: T) -> (T, T) {
    if yr.abs() > yi.abs() {
        let r = yi / yr;
        let d = yr + r * yi;
        ((xr + r * xi) / d, (xi - r * xr) / d)
    } else {
        let r = yr / yi;
        let d = yi + r * yr;
        ((r * xr + xi) / d, (r * xi - xr) / d)
    }
}

/// Eigenvalues and eigenvectors of an upper Hessenberg matrix.
///
/// On entry `H` is upper Hessenberg and `V` holds the orthogonal
/// transform from the Hessenberg reduction.  On success `wr`, `wi` hold
/// the eigenvalues and `V` the (unnormalized) eigenvectors of the
/// original matrix in `?geev` layout.  `H` is destroyed.
///
/// The real Schur form is computed by shifted Francis double-shift QR
/// steps, with exceptional shifts after 10 and 30 stalled iterations,
/// followed by back substitution.  If an eigenvalue does not converge
/// within `30*max(10,n)` iterations, its 0-based index is returned as
/// the error.  Eigenvalues above that index have converged.
pub(crate) fn hqr2<T: FloatT>(
    H: &mut Matrix<T>,
    V: &mut Matrix<T>,
    wr: &mut [T],
    wi: &mut [T],
) -> Result<(), usize> {
    let nn = H.nrows();
    if nn == 0 {
        return Ok(());
    }

    let zero = T::zero();
    let one = T::one();
    let two: T = (2.0).as_T();
    let eps = T::epsilon();
    let maxiter = 30 * usize::max(10, nn);

    let mut exshift = zero;
    let (mut p, mut q);
    let (mut r, mut s, mut z) = (zero, zero, zero);
    let (mut w, mut x, mut y);

    // matrix norm, used for deflation and as a
    // fallback scale in the back substitution
    let mut norm = zero;
    for i in 0..nn {
        for j in i.saturating_sub(1)..nn {
            norm += H[(i, j)].abs();
        }
    }

    // outer loop over eigenvalue index.  Rows
    // and columns top..nn have been deflated.
    let mut iter = 0;
    let mut top = nn;
    while top > 0 {
        let n = top - 1;

        // look for single small sub-diagonal element.  An exact
        // zero always deflates, also when norm is zero.
        let mut l = n;
        while l > 0 {
            s = H[(l - 1, l - 1)].abs() + H[(l, l)].abs();
            if s == zero {
                s = norm;
            }
            if H[(l, l - 1)].abs() <= eps * s {
                break;
            }
            l -= 1;
        }

        if l == n {
            // one root found
            H[(n, n)] += exshift;
            wr[n] = H[(n, n)];
            wi[n] = zero;
            top -= 1;
            iter = 0;
        } else if l == n - 1 {
            // two roots found
            w = H[(n, n - 1)] * H[(n - 1, n)];
            p = (H[(n - 1, n - 1)] - H[(n, n)]) / two;
            q = p * p + w;
            z = q.abs().sqrt();
            H[(n, n)] += exshift;
            H[(n - 1, n - 1)] += exshift;
            x = H[(n, n)];

            if q >= zero {
                // real pair
                z = if p >= zero { p + z } else { p - z };
                wr[n - 1] = x + z;
                wr[n] = wr[n - 1];
                if z != zero {
                    wr[n] = x - w / z;
                }
                wi[n - 1] = zero;
                wi[n] = zero;
                x = H[(n, n - 1)];
                s = x.abs() + z.abs();
                p = x / s;
                q = z / s;
                r = (p * p + q * q).sqrt();
                p /= r;
                q /= r;

                // row modification
                for j in (n - 1)..nn {
                    z = H[(n - 1, j)];
                    H[(n - 1, j)] = q * z + p * H[(n, j)];
                    H[(n, j)] = q * H[(n, j)] - p * z;
                }

                // column modification
                for i in 0..=n {
                    z = H[(i, n - 1)];
                    H[(i, n - 1)] = q * z + p * H[(i, n)];
                    H[(i, n)] = q * H[(i, n)] - p * z;
                }

                // accumulate transformations
                for i in 0..nn {
                    z = V[(i, n - 1)];
                    V[(i, n - 1)] = q * z + p * V[(i, n)];
                    V[(i, n)] = q * V[(i, n)] - p * z;
                }
            } else {
                // complex pair
                wr[n - 1] = x + p;
                wr[n] = x + p;
                wi[n - 1] = z;
                wi[n] = -z;
            }
            top -= 2;
            iter = 0;
        } else {
            // no convergence yet.  Form shift.
            x = H[(n, n)];
            y = H[(n - 1, n - 1)];
            w = H[(n, n - 1)] * H[(n - 1, n)];

            // Wilkinson's original ad hoc shift
            if iter == 10 {
                exshift += x;
                for i in 0..=n {
                    H[(i, i)] -= x;
                }
                s = H[(n, n - 1)].abs() + H[(n - 1, n - 2)].abs();
                let (c1, c2): (T, T) = ((0.75).as_T(), (-0.4375).as_T());
                x = c1 * s;
                y = x;
                w = c2 * s * s;
            }

            // second ad hoc shift
            if iter == 30 {
                s = (y - x) / two;
                s = s * s + w;
                if s > zero {
                    s = s.sqrt();
                    if y < x {
                        s = -s;
                    }
                    s = x - w / ((y - x) / two + s);
                    for i in 0..=n {
                        H[(i, i)] -= s;
                    }
                    exshift += s;
                    x = (0.964).as_T();
                    y = x;
                    w = x;
                }
            }

            iter += 1;
            if iter > maxiter {
                return Err(n);
            }

            // look for two consecutive small sub-diagonal elements
            let mut m = n - 2;
            loop {
                z = H[(m, m)];
                r = x - z;
                s = y - z;
                p = (r * s - w) / H[(m + 1, m)] + H[(m, m + 1)];
                q = H[(m + 1, m + 1)] - z - r - s;
                r = H[(m + 2, m + 1)];
                s = p.abs() + q.abs() + r.abs();
                p /= s;
                q /= s;
                r /= s;
                if m == l {
                    break;
                }
                let lhs = H[(m, m - 1)].abs() * (q.abs() + r.abs());
                let rhs = eps
                    * (p.abs() * (H[(m - 1, m - 1)].abs() + z.abs() + H[(m + 1, m + 1)].abs()));
                if lhs < rhs {
                    break;
                }
                m -= 1;
            }

            for i in (m + 2)..=n {
                H[(i, i - 2)] = zero;
                if i > m + 2 {
                    H[(i, i - 3)] = zero;
                }
            }

            // double QR step involving rows l..=n and columns m..=n
            for k in m..n {
                let notlast = k != n - 1;
                if k != m {
                    p = H[(k, k - 1)];
                    q = H[(k + 1, k - 1)];
                    r = if notlast { H[(k + 2, k - 1)] } else { zero };
                    x = p.abs() + q.abs() + r.abs();
                    if x == zero {
                        continue;
                    }
                    p /= x;
                    q /= x;
                    r /= x;
                }

                s = (p * p + q * q + r * r).sqrt();
                if p < zero {
                    s = -s;
                }
                if s == zero {
                    continue;
                }

                if k != m {
                    H[(k, k - 1)] = -s * x;
                } else if l != m {
                    H[(k, k - 1)] = -H[(k, k - 1)];
                }
                p += s;
                x = p / s;
                y = q / s;
                z = r / s;
                q /= p;
                r /= p;

                // row modification
                for j in k..nn {
                    p = H[(k, j)] + q * H[(k + 1, j)];
                    if notlast {
                        p += r * H[(k + 2, j)];
                        H[(k + 2, j)] -= p * z;
                    }
                    H[(k, j)] -= p * x;
                    H[(k + 1, j)] -= p * y;
                }

                // column modification
                for i in 0..=usize::min(n, k + 3) {
                    p = x * H[(i, k)] + y * H[(i, k + 1)];
                    if notlast {
                        p += z * H[(i, k + 2)];
                        H[(i, k + 2)] -= p * r;
                    }
                    H[(i, k)] -= p;
                    H[(i, k + 1)] -= p * q;
                }

                // accumulate transformations
                for i in 0..nn {
                    p = x * V[(i, k)] + y * V[(i, k + 1)];
                    if notlast {
                        p += z * V[(i, k + 2)];
                        V[(i, k + 2)] -= p * r;
                    }
                    V[(i, k)] -= p;
                    V[(i, k + 1)] -= p * q;
                }
            }
        }
    }

    // back substitute to find vectors of the upper triangular form
    if norm == zero {
        return Ok(());
    }

    for n in (0..nn).rev() {
        p = wr[n];
        q = wi[n];

        if q == zero {
            // real vector
            let mut l = n;
            H[(n, n)] = one;
            for i in (0..n).rev() {
                w = H[(i, i)] - p;
                r = zero;
                for j in l..=n {
                    r += H[(i, j)] * H[(j, n)];
                }
                if wi[i] < zero {
                    z = w;
                    s = r;
                    continue;
                }
                l = i;
                if wi[i] == zero {
                    H[(i, n)] = if w != zero { -r / w } else { -r / (eps * norm) };
                } else {
                    // solve real equations
                    x = H[(i, i + 1)];
                    y = H[(i + 1, i)];
                    q = (wr[i] - p) * (wr[i] - p) + wi[i] * wi[i];
                    let t = (x * s - z * r) / q;
                    H[(i, n)] = t;
                    H[(i + 1, n)] = if x.abs() > z.abs() {
                        (-r - w * t) / x
                    } else {
                        (-s - y * t) / z
                    };
                }

                // overflow control
                let t = H[(i, n)].abs();
                if (eps * t) * t > one {
                    for j in i..=n {
                        H[(j, n)] /= t;
                    }
                }
            }
        } else if q < zero {
            // complex vector, stored in columns n-1 (real) and n (imag)
            let mut l = n - 1;

            // last vector component imaginary so matrix is triangular
            if H[(n, n - 1)].abs() > H[(n - 1, n)].abs() {
                H[(n - 1, n - 1)] = q / H[(n, n - 1)];
                H[(n - 1, n)] = -(H[(n, n)] - p) / H[(n, n - 1)];
            } else {
                let (cr, ci) = cdiv(zero, -H[(n - 1, n)], H[(n - 1, n - 1)] - p, q);
                H[(n - 1, n - 1)] = cr;
                H[(n - 1, n)] = ci;
            }
            H[(n, n - 1)] = zero;
            H[(n, n)] = one;

            for i in (0..n - 1).rev() {
                let mut ra = zero;
                let mut sa = zero;
                for j in l..=n {
                    ra += H[(i, j)] * H[(j, n - 1)];
                    sa += H[(i, j)] * H[(j, n)];
                }
                w = H[(i, i)] - p;

                if wi[i] < zero {
                    z = w;
                    r = ra;
                    s = sa;
                    continue;
                }
                l = i;
                if wi[i] == zero {
                    let (cr, ci) = cdiv(-ra, -sa, w, q);
                    H[(i, n - 1)] = cr;
                    H[(i, n)] = ci;
                } else {
                    // solve complex equations
                    x = H[(i, i + 1)];
                    y = H[(i + 1, i)];
                    let mut vr = (wr[i] - p) * (wr[i] - p) + wi[i] * wi[i] - q * q;
                    let vi = (wr[i] - p) * two * q;
                    if vr == zero && vi == zero {
                        vr = eps * norm * (w.abs() + q.abs() + x.abs() + y.abs() + z.abs());
                    }
                    let (cr, ci) = cdiv(
                        x * r - z * ra + q * sa,
                        x * s - z * sa - q * ra,
                        vr,
                        vi,
                    );
                    H[(i, n - 1)] = cr;
                    H[(i, n)] = ci;
                    if x.abs() > (z.abs() + q.abs()) {
                        H[(i + 1, n - 1)] = (-ra - w * H[(i, n - 1)] + q * H[(i, n)]) / x;
                        H[(i + 1, n)] = (-sa - w * H[(i, n)] - q * H[(i, n - 1)]) / x;
                    } else {
                        let (cr, ci) = cdiv(-r - y * H[(i, n - 1)], -s - y * H[(i, n)], z, q);
                        H[(i + 1, n - 1)] = cr;
                        H[(i + 1, n)] = ci;
                    }
                }

                // overflow control
                let t = T::max(H[(i, n - 1)].abs(), H[(i, n)].abs());
                if (eps * t) * t > one {
                    for j in i..=n {
                        H[(j, n - 1)] /= t;
                        H[(j, n)] /= t;
                    }
                }
            }
        }
    }

    // back transformation to get eigenvectors of the original matrix
    for j in (0..nn).rev() {
        for i in 0..nn {
            z = zero;
            for k in 0..=j {
                z += V[(i, k)] * H[(k, j)];
            }
            V[(i, j)] = z;
        }
    }

    Ok(())
}
