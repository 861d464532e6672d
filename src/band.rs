//! Banded square systems and an iterative relaxation solve.
//!
//! The matrix is stored as one coefficient vector per diagonal, addressed
//! through an explicit table of offsets from the main diagonal. The solve is
//! successive over-relaxation: Gauss-Seidel sweeps scaled by a relaxation
//! factor, stopping on the relative residual. The sweep treats every row the
//! same way and bounds-checks the band at the edges, so rows that carry a bare
//! identity equation (as the spline boundary rows do) go through the same
//! update as fully populated interior rows.
//!
//! Trading the exactness of a direct factorization for this uniformity is
//! deliberate; the sweep cap bounds the run time whether or not the iteration
//! converges.

use num_traits::Float;

/// Iteration controls for [`BandMatrix::solve`].
#[derive(Clone, Copy)]
pub struct SolverConfig<T: Float> {
    /// Hard cap on full sweeps, applied whether or not the iteration
    /// converges.
    pub max_iterations: usize,
    /// SOR relaxation factor (omega); 1 recovers plain Gauss-Seidel.
    pub relaxation_factor: T,
    /// Relative-residual stopping tolerance.
    pub epsilon: T,
}

impl<T: Float> Default for SolverConfig<T> {
    /// 1000 sweeps, omega 1.5, tolerance 1e-12.
    fn default() -> Self {
        let one = T::one();
        let two = one + one;
        Self {
            max_iterations: 1000,
            relaxation_factor: one + one / two,
            epsilon: T::from(1e-12).unwrap(),
        }
    }
}

/// A square matrix with nonzero coefficients confined to `W` diagonals.
#[derive(Clone)]
pub struct BandMatrix<T: Float, const W: usize> {
    /// Offset of each stored diagonal from the main one.
    offsets: [isize; W],
    /// Index into `offsets` of the main diagonal.
    main: usize,
    /// Coefficients of each stored diagonal, indexed by row.
    diags: [Vec<T>; W],
}

/// Bandwidth-one-each-side storage, the shape the spline slope system takes.
pub type Tridiagonal<T> = BandMatrix<T, 3>;

impl<T: Float, const W: usize> BandMatrix<T, W> {
    /// Zero-filled banded storage for an `n` x `n` system.
    ///
    /// # Errors
    /// * If no offset addresses the main diagonal
    pub fn new(offsets: [isize; W], n: usize) -> Result<Self, &'static str> {
        let main = offsets
            .iter()
            .position(|&offset| offset == 0)
            .ok_or("Band must include the main diagonal")?;
        let diags = core::array::from_fn(|_| vec![T::zero(); n]);

        Ok(Self {
            offsets,
            main,
            diags,
        })
    }

    /// Number of rows (and columns) of the system.
    pub fn len(&self) -> usize {
        self.diags[self.main].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrite the banded coefficients of one row, ordered like the offset
    /// table.
    pub fn set_row(&mut self, row: usize, coeffs: [T; W]) {
        for (band, value) in coeffs.into_iter().enumerate() {
            self.diags[band][row] = value;
        }
    }

    /// Solve `self * out = rhs` by successive over-relaxation, returning the
    /// number of sweeps performed.
    ///
    /// `out` is overwritten with the solution, starting from all zeros; values
    /// already in it do not seed the iteration. Each sweep updates rows in
    /// increasing order against the values already updated earlier in the same
    /// sweep (Gauss-Seidel rather than Jacobi), then stops as soon as the
    /// residual norm drops below `config.epsilon` relative to the norm of
    /// `rhs`. A right-hand side that is entirely zero converges on the first
    /// sweep.
    ///
    /// A zero coefficient on the main diagonal divides by zero and poisons the
    /// solution with non-finite values rather than returning an error, and
    /// convergence is not guaranteed for arbitrary coefficients; the sweep cap
    /// bounds the run time either way.
    ///
    /// # Panics
    /// * If `rhs` or `out` do not match the system size
    pub fn solve(&self, rhs: &[T], out: &mut [T], config: &SolverConfig<T>) -> usize {
        let n = self.len();
        assert!(rhs.len() == n && out.len() == n, "Length mismatch");

        for x in out.iter_mut() {
            *x = T::zero();
        }

        // Reference norm for the relative-residual stop, computed once.
        let mut norm = T::zero();
        for i in 0..n {
            norm = norm + rhs[i] * rhs[i];
        }

        let mut sweeps = 0;
        for _ in 0..config.max_iterations {
            sweeps += 1;

            let mut sweep_norm = T::zero();
            for i in 0..n {
                // Row-times-solution product over the band, skipping the
                // entries that fall off either end of the system.
                let mut collector = T::zero();
                for band in 0..W {
                    let col = i as isize + self.offsets[band];
                    if col < 0 || col >= n as isize {
                        continue;
                    }
                    collector = collector + self.diags[band][i] * out[col as usize];
                }

                let row_residual = rhs[i] - collector;
                out[i] = out[i] + config.relaxation_factor * row_residual / self.diags[self.main][i];
                sweep_norm = sweep_norm + row_residual * row_residual;
            }

            // A zero right-hand side leaves nothing to normalize against; the
            // sweep norm alone decides.
            let residual = if norm > T::zero() {
                (sweep_norm / norm).sqrt()
            } else {
                sweep_norm.sqrt()
            };
            if residual < config.epsilon {
                break;
            }
        }

        sweeps
    }
}

impl<T: Float> BandMatrix<T, 3> {
    /// Zero-filled tridiagonal storage for an `n` x `n` system.
    pub fn tridiagonal(n: usize) -> Self {
        Self {
            offsets: [-1, 0, 1],
            main: 1,
            diags: [vec![T::zero(); n], vec![T::zero(); n], vec![T::zero(); n]],
        }
    }
}
