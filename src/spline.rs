//! Cubic spline interpolation on an uneven 1D grid.
//!
//! Each node carries one slope coefficient, determined by requiring the
//! derivative of the piecewise cubic to be continuous across interior nodes.
//! That condition couples each node to its neighbors in a tridiagonal system
//! closed by one-sided derivative estimates at the two ends, which is solved
//! by relaxation sweeps rather than a direct factorization. Evaluation is then
//! a per-segment cubic Hermite form over the segment's endpoint ordinates and
//! solved slopes.
//!
//! Observation points outside the sampled range evaluate to NaN rather than
//! extrapolating.

use num_traits::Float;

use crate::band::{SolverConfig, Tridiagonal};

/// A cubic Hermite interpolant through a set of `(x, y)` samples with
/// strictly increasing `x`.
///
/// Construction stores the samples; [`CubicSpline::build`] assembles and
/// solves the slope system and must run before evaluation. Until it does,
/// every slope is zero and evaluation degrades to a smoothstep between
/// neighboring ordinates rather than returning garbage.
#[derive(Clone)]
pub struct CubicSpline<T: Float> {
    /// Node abscissas, strictly increasing.
    xs: Vec<T>,
    /// Node ordinates.
    ys: Vec<T>,
    /// Right-hand side of the slope system before solving; one slope per node
    /// after.
    coeffs: Vec<T>,
    /// Assembled tridiagonal coefficients.
    system: Tridiagonal<T>,
}

impl<T: Float> CubicSpline<T> {
    /// Build a spline over parallel abscissa and ordinate slices.
    ///
    /// # Errors
    /// * If the slice lengths do not match
    /// * If there are fewer than three nodes
    /// * If the abscissas are not strictly increasing
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, &'static str> {
        if xs.len() != ys.len() {
            return Err("Length mismatch");
        }

        Self::from_parts(xs.to_vec(), ys.to_vec())
    }

    /// Build a spline over a sequence of `(x, y)` pairs.
    ///
    /// # Errors
    /// * If there are fewer than three points
    /// * If the abscissas are not strictly increasing
    pub fn from_points(points: &[(T, T)]) -> Result<Self, &'static str> {
        let xs = points.iter().map(|p| p.0).collect();
        let ys = points.iter().map(|p| p.1).collect();

        Self::from_parts(xs, ys)
    }

    /// Build a spline by sampling `f` at each abscissa.
    ///
    /// # Errors
    /// * If there are fewer than three abscissas
    /// * If the abscissas are not strictly increasing
    pub fn from_fn<F: Fn(T) -> T>(xs: &[T], f: F) -> Result<Self, &'static str> {
        let ys = xs.iter().map(|&x| f(x)).collect();

        Self::from_parts(xs.to_vec(), ys)
    }

    fn from_parts(xs: Vec<T>, ys: Vec<T>) -> Result<Self, &'static str> {
        let n = xs.len();
        if n < 3 {
            return Err("At least three nodes are required");
        }
        if !xs.windows(2).all(|pair| pair[1] > pair[0]) {
            return Err("Nodes must be strictly increasing");
        }

        Ok(Self {
            xs,
            ys,
            coeffs: vec![T::zero(); n],
            system: Tridiagonal::tridiagonal(n),
        })
    }

    /// Assemble the slope system and solve it with [`SolverConfig::default`].
    pub fn build(&mut self) {
        self.build_with(&SolverConfig::default());
    }

    /// Assemble the slope system and solve it with a caller-provided
    /// configuration, returning the number of relaxation sweeps used.
    ///
    /// Assembly fully overwrites the system and right-hand side, so repeated
    /// builds over the same samples land on identical coefficients.
    pub fn build_with(&mut self, config: &SolverConfig<T>) -> usize {
        self.assemble();
        self.relax(config)
    }

    /// Run the relaxation solver over the currently assembled system with the
    /// given tolerance, returning the number of sweeps used.
    ///
    /// The right-hand side is consumed in place: after a solve the coefficient
    /// storage holds slopes, so calling this a second time without
    /// re-assembling feeds those slopes back in as a right-hand side.
    /// [`CubicSpline::build`] always re-assembles first.
    pub fn solve(&mut self, epsilon: T) -> usize {
        let config = SolverConfig {
            epsilon,
            ..SolverConfig::default()
        };

        self.relax(&config)
    }

    /// The per-node slope coefficients in their current state: the assembled
    /// right-hand side before solving, solved slopes after.
    pub fn coefficients(&self) -> &[T] {
        &self.coeffs
    }

    /// Populate the tridiagonal coefficients and right-hand side from the
    /// node spacing.
    ///
    /// Interior rows encode derivative continuity across the two segments
    /// meeting at the node. The two boundary rows are identity equations whose
    /// right-hand sides are one-sided three-point derivative estimates over
    /// the first and last three samples, so the solver reproduces them as the
    /// end-node slopes.
    fn assemble(&mut self) {
        let one = T::one();
        let two = one + one;
        let three = two + one;
        let four = two + two;
        let six = three + three;
        let half = one / two;
        let zero = T::zero();

        let n = self.xs.len();
        let (xs, ys) = (&self.xs, &self.ys);

        let prev_h = xs[1] - xs[0];
        let next_h = xs[2] - xs[1];
        let l = -(three * prev_h + two * next_h) / (prev_h * (prev_h + next_h));
        let c = (two * next_h + prev_h) / (prev_h * next_h);
        let r = -prev_h / (next_h * (prev_h + next_h));
        self.coeffs[0] = half * (ys[0] * l + ys[1] * c + ys[2] * r);

        let prev_h = xs[n - 2] - xs[n - 3];
        let next_h = xs[n - 1] - xs[n - 2];
        let l = next_h / (prev_h * (prev_h + next_h));
        let c = -(next_h + two * prev_h) / (prev_h * next_h);
        let r = (three * next_h + two * prev_h) / (next_h * (prev_h + next_h));
        self.coeffs[n - 1] = half * (ys[n - 3] * l + ys[n - 2] * c + ys[n - 1] * r);

        self.system.set_row(0, [zero, one, zero]);
        self.system.set_row(n - 1, [zero, one, zero]);

        for i in 1..n - 1 {
            let prev_h = xs[i] - xs[i - 1];
            let next_h = xs[i + 1] - xs[i];

            self.system.set_row(
                i,
                [
                    two / prev_h,
                    four * (one / prev_h + one / next_h),
                    two / next_h,
                ],
            );

            self.coeffs[i] = -six * ys[i - 1] / (prev_h * prev_h)
                + six * ys[i] * (one / (prev_h * prev_h) - one / (next_h * next_h))
                + six * ys[i + 1] / (next_h * next_h);
        }
    }

    fn relax(&mut self, config: &SolverConfig<T>) -> usize {
        let mut solution = vec![T::zero(); self.coeffs.len()];
        let sweeps = self.system.solve(&self.coeffs, &mut solution, config);
        self.coeffs = solution;

        sweeps
    }

    /// Evaluate the spline at one observation point.
    ///
    /// Returns NaN for points outside the sampled range. A point sitting
    /// exactly on an interior node evaluates on the lower-indexed of the two
    /// segments sharing it; either way the node ordinate is reproduced
    /// exactly.
    #[inline]
    pub fn eval_one(&self, loc: T) -> T {
        let n = self.xs.len();
        if loc < self.xs[0] || loc > self.xs[n - 1] {
            return T::nan();
        }

        let i = ((self.xs.partition_point(|v| v < &loc) as isize - 1).max(0) as usize).min(n - 2);

        let h = self.xs[i + 1] - self.xs[i];
        let t = (loc - self.xs[i]) / h;

        hermite_segment(
            t,
            self.ys[i],
            self.ys[i + 1],
            self.coeffs[i] * h,
            self.coeffs[i + 1] * h,
        )
    }

    /// Evaluate the spline at a set of observation points.
    ///
    /// # Errors
    /// * If the input and output lengths do not match
    #[inline]
    pub fn eval(&self, locs: &[T], out: &mut [T]) -> Result<(), &'static str> {
        if locs.len() != out.len() {
            return Err("Length mismatch");
        }

        for i in 0..locs.len() {
            out[i] = self.eval_one(locs[i]);
        }

        Ok(())
    }

    /// Evaluate the spline at a set of observation points, allocating for the
    /// output values for convenience.
    #[inline]
    pub fn eval_alloc(&self, locs: &[T]) -> Vec<T> {
        locs.iter().map(|&loc| self.eval_one(loc)).collect()
    }
}

/// Evaluate a cubic Hermite segment at normalized coordinate
/// `t = (x - x0) / h`, with endpoint slopes `k0` and `k1` already scaled by
/// the segment width `h`.
///
/// The basis is kept in its direct form rather than collected by powers of
/// `t`; at `t` of exactly 0 or 1 the off-endpoint basis terms cancel to zero
/// in floating point, so node ordinates are reproduced bit-exactly.
#[inline]
fn hermite_segment<T: Float>(t: T, y0: T, y1: T, k0: T, k1: T) -> T {
    let one = T::one();
    let two = one + one;
    let three = two + one;

    let t2 = t * t;
    let t3 = t2 * t;

    y0 * (one - three * t2 + two * t3)
        + k0 * (t - two * t2 + t3)
        + y1 * (three * t2 - two * t3)
        + k1 * (t3 - t2)
}

#[cfg(test)]
mod test {
    use crate::band::SolverConfig;
    use crate::testing::{randn, rng_fixed_seed};
    use crate::utils::linspace;

    use super::CubicSpline;

    #[test]
    fn test_constructor_validation() {
        assert_eq!(
            CubicSpline::new(&[0.0, 1.0], &[0.0, 1.0, 2.0]).err(),
            Some("Length mismatch")
        );
        assert_eq!(
            CubicSpline::new(&[0.0, 1.0], &[0.0, 1.0]).err(),
            Some("At least three nodes are required")
        );
        assert_eq!(
            CubicSpline::new(&[0.0, 1.0, 0.5], &[0.0, 1.0, 2.0]).err(),
            Some("Nodes must be strictly increasing")
        );
        // Duplicate abscissas would divide by zero during assembly
        assert_eq!(
            CubicSpline::new(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0]).err(),
            Some("Nodes must be strictly increasing")
        );
        assert!(CubicSpline::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_linear_data_recovers_constant_slope() {
        let mut spline = CubicSpline::new(&[-1.0f64, 0.0, 1.0], &[-2.0, 0.0, 2.0]).unwrap();
        spline.build();

        for &k in spline.coefficients() {
            assert!((k - 2.0).abs() < 1e-9);
        }

        assert!((spline.eval_one(0.5) - 1.0).abs() < 1e-9);
        assert!((spline.eval_one(-0.25) + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_rows_pass_through() {
        // The boundary rows are identity equations, so the solved end slopes
        // must match the one-sided estimates over the first and last three
        // samples. Expected values worked out by hand for y = x^2:
        // 0.5 * (0.25 * 16/3 + 25/16 * -8/15) = 1/4 at the left end and
        // 0.5 * (25/16 * 16/21 + 4 * -10/3 + 9 * 18/7) = 11/2 at the right.
        let xs = [0.0f64, 0.5, 1.25, 2.0, 3.0];
        let mut spline = CubicSpline::from_fn(&xs, |x| x * x).unwrap();
        spline.build();

        assert!((spline.coefficients()[0] - 0.25).abs() < 1e-9);
        assert!((spline.coefficients()[4] - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_nodes_reproduced_exactly() {
        let rng = &mut rng_fixed_seed();

        let even = linspace(-3.14, 3.14, 17);
        let uneven = vec![0.0, 0.3, 1.0, 1.1, 2.5, 4.0, 4.2];

        for xs in [even, uneven] {
            let ys = randn::<f64>(rng, xs.len());
            let mut spline = CubicSpline::new(&xs, &ys).unwrap();
            spline.build();

            for i in 0..xs.len() {
                assert_eq!(spline.eval_one(xs[i]), ys[i]);
            }
        }
    }

    #[test]
    fn test_out_of_range_is_nan() {
        let mut spline = CubicSpline::new(&[0.0f64, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
        spline.build();

        assert!(spline.eval_one(-0.001).is_nan());
        assert!(spline.eval_one(2.001).is_nan());

        let out = spline.eval_alloc(&[-5.0, 1.0, 5.0]);
        assert!(out[0].is_nan());
        assert!(out[1].is_finite());
        assert!(out[2].is_nan());
    }

    #[test]
    fn test_eval_length_mismatch() {
        let mut spline = CubicSpline::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
        spline.build();

        let mut out = [0.0; 2];
        assert_eq!(spline.eval(&[0.5], &mut out), Err("Length mismatch"));
        assert!(spline.eval(&[0.5, 1.5], &mut out).is_ok());
    }

    #[test]
    fn test_all_zero_ordinates() {
        let points = [(-1.0, 0.0), (0.0, 0.0), (1.0, 0.0)];
        let mut spline = CubicSpline::from_points(&points).unwrap();
        let sweeps = spline.build_with(&SolverConfig::default());

        // Zero right-hand side converges on the first sweep with zero slopes
        assert_eq!(sweeps, 1);
        for &k in spline.coefficients() {
            assert_eq!(k, 0.0);
        }
        assert_eq!(spline.eval_one(0.5), 0.0);
    }

    #[test]
    fn test_sawtooth_scenario() {
        let points = [(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0), (4.0, 0.0)];
        let mut spline = CubicSpline::from_points(&points).unwrap();

        let config = SolverConfig {
            epsilon: 1e-10,
            ..SolverConfig::default()
        };
        let sweeps = spline.build_with(&config);
        assert!(sweeps < 1000);

        assert_eq!(spline.eval_one(0.0), 0.0);
        assert_eq!(spline.eval_one(2.0), 0.0);
        assert_eq!(spline.eval_one(4.0), 0.0);
        assert_eq!(spline.eval_one(1.0), 1.0);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let rng = &mut rng_fixed_seed();
        let xs = linspace(0.0, 10.0, 23);
        let ys = randn::<f64>(rng, xs.len());

        let mut spline = CubicSpline::new(&xs, &ys).unwrap();
        spline.build();
        let first: Vec<f64> = spline.coefficients().to_vec();

        spline.build();
        assert_eq!(spline.coefficients(), &first[..]);
    }
}
