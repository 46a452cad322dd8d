/// Piecewise-linear interpolation of `(xp, fp)` at `x`.
///
/// `xp` must be strictly increasing and the same length as `fp`. Points
/// outside `[xp[0], xp[n-1]]` take the boundary value. A point that lies
/// exactly on a knot returns that knot's value unchanged.
///
/// Returns `None` when the table is empty, the lengths disagree or `x` is NaN.
pub fn interp_linear(x: f64, xp: &[f64], fp: &[f64]) -> Option<f64> {
    if x.is_nan() || xp.is_empty() || xp.len() != fp.len() {
        return None;
    }
    let last = xp.len() - 1;
    if x <= xp[0] {
        return Some(fp[0]);
    }
    if x >= xp[last] {
        return Some(fp[last]);
    }

    let hi = xp.partition_point(|&v| v < x);
    if xp[hi] == x {
        return Some(fp[hi]);
    }

    let lo = hi.checked_sub(1)?;
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    Some(fp[lo] + t * (fp[hi] - fp[lo]))
}

/// Log-log interpolation of a positive table at each of `x`.
///
/// Equivalent to `exp(interp(ln x, ln xp, ln fp))`. Values below 1e-99 are
/// floored before taking the logarithm.
pub fn interp_loglog(x: &[f64], xp: &[f64], fp: &[f64]) -> Option<Vec<f64>> {
    let log_xp: Vec<f64> = xp.iter().map(|v| v.ln()).collect();
    let log_fp: Vec<f64> = fp.iter().map(|v| v.max(1e-99).ln()).collect();
    x.iter()
        .map(|&xi| interp_linear(xi.ln(), &log_xp, &log_fp).map(f64::exp))
        .collect()
}

/// Cubic spline through `(xp, fp)` with precomputed second derivatives
/// `fpp`, evaluated at `x`.
///
/// Points beyond the knots extend the end intervals' cubics. Returns `None`
/// for fewer than two knots, mismatched lengths or a NaN `x`.
pub fn interp_spline(x: f64, xp: &[f64], fp: &[f64], fpp: &[f64]) -> Option<f64> {
    let n = xp.len();
    if x.is_nan() || n < 2 || fp.len() != n || fpp.len() != n {
        return None;
    }
    let hi = xp.partition_point(|&v| v < x).clamp(1, n - 1);
    let lo = hi - 1;

    let h = xp[hi] - xp[lo];
    if h <= 0.0 {
        return Some(fp[hi]);
    }
    let a = (xp[hi] - x) / h;
    let b = (x - xp[lo]) / h;
    Some(
        a * fp[lo]
            + b * fp[hi]
            + (h * h / 6.0) * ((a * a - 1.0) * a * fpp[lo] + (b * b - 1.0) * b * fpp[hi]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_basic() {
        let xp = [0.0, 1.0, 2.0];
        let fp = [0.0, 10.0, 20.0];
        assert!((interp_linear(0.5, &xp, &fp).unwrap() - 5.0).abs() < 1e-10);
        assert!((interp_linear(1.5, &xp, &fp).unwrap() - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_interp_clamping() {
        let xp = [1.0, 2.0, 3.0];
        let fp = [10.0, 20.0, 30.0];
        assert_eq!(interp_linear(0.0, &xp, &fp), Some(10.0));
        assert_eq!(interp_linear(4.0, &xp, &fp), Some(30.0));
    }

    #[test]
    fn test_interp_exact_knot() {
        let xp = [5000.0, 5075.0, 5150.0];
        let fp = [0.1, 0.7 / 3.0, 0.3];
        assert_eq!(interp_linear(5075.0, &xp, &fp), Some(0.7 / 3.0));
    }

    #[test]
    fn test_interp_rejects_bad_tables() {
        assert_eq!(interp_linear(1.0, &[], &[]), None);
        assert_eq!(interp_linear(1.0, &[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn test_interp_nan_point() {
        let xp = [1000.0, 2000.0];
        let fp = [1.0, 2.0];
        assert_eq!(interp_linear(f64::NAN, &xp, &fp), None);
        assert_eq!(interp_linear(f64::INFINITY, &xp, &fp), Some(2.0));
        assert_eq!(interp_linear(1500.0, &[f64::NAN, 2000.0], &fp), None);
    }

    #[test]
    fn test_loglog_power_law() {
        // f = 1e6 * x^-3 is a straight line in log-log space
        let xp: [f64; 3] = [1000.0, 10000.0, 100000.0];
        let fp: Vec<f64> = xp.iter().map(|x| 1e6 * x.powi(-3)).collect();
        let out = interp_loglog(&[3000.0, 30000.0], &xp, &fp).unwrap();
        assert!((out[0] / (1e6 * 3000.0_f64.powi(-3)) - 1.0).abs() < 1e-9);
        assert!((out[1] / (1e6 * 30000.0_f64.powi(-3)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_spline_hits_knots() {
        let xp = [1.0, 2.0, 3.0, 4.0];
        let fp = [1.0, 4.0, 9.0, 16.0];
        let fpp = [0.5, -0.2, 0.3, 0.0];
        for (&x, &f) in xp.iter().zip(&fp) {
            assert!((interp_spline(x, &xp, &fp, &fpp).unwrap() - f).abs() < 1e-12);
        }
    }

    #[test]
    fn test_spline_reproduces_parabola() {
        // constant second derivative 2 makes the spline exact for x^2
        let xp = [0.0, 1.0, 2.0];
        let fp = [0.0, 1.0, 4.0];
        let fpp = [2.0, 2.0, 2.0];
        let y = interp_spline(0.5, &xp, &fp, &fpp).unwrap();
        assert!((y - 0.25).abs() < 1e-12);
        let y = interp_spline(1.5, &xp, &fp, &fpp).unwrap();
        assert!((y - 2.25).abs() < 1e-12);
    }

    #[test]
    fn test_spline_rejects_bad_input() {
        assert_eq!(interp_spline(1.0, &[1.0], &[1.0], &[0.0]), None);
        assert_eq!(interp_spline(f64::NAN, &[1.0, 2.0], &[1.0, 2.0], &[0.0, 0.0]), None);
    }
}
