//! Cubic spline interpolation on unevenly spaced 1D grids, with per-node
//! slopes recovered by successive over-relaxation.
//!
//! The interpolant is a piecewise cubic Hermite form: each segment is a cubic
//! polynomial determined by the ordinates and slopes at its two endpoint
//! nodes. The slopes themselves come from requiring derivative continuity
//! across interior nodes, which couples neighboring nodes in a tridiagonal
//! linear system closed by one-sided three-point derivative estimates at the
//! two boundary nodes. Rather than a direct (Thomas) factorization, the system
//! is solved by Gauss-Seidel sweeps with over-relaxation, which handles the
//! identity boundary rows and the interior rows with one uniform update at the
//! cost of exactness; the sweep cap bounds the solve time whether or not the
//! iteration converges.
//!
//! Observation points outside the sampled range evaluate to NaN rather than
//! extrapolating.
//!
//! # Example: sampling a function
//! ```rust
//! use sorspline::CubicSpline;
//!
//! // Sample on an uneven grid
//! let xs = [0.0_f64, 0.5, 1.25, 2.0, 3.0];
//! let mut spline = CubicSpline::from_fn(&xs, |x| 2.0 * x).unwrap();
//! spline.build();
//!
//! // Observation points inside the sampled range interpolate
//! assert!((spline.eval_one(1.0) - 2.0).abs() < 1e-9);
//!
//! // Points outside it do not
//! assert!(spline.eval_one(-1.0).is_nan());
//! ```
//!
//! # Example: tuning the solve
//! ```rust
//! use sorspline::{CubicSpline, SolverConfig};
//!
//! let x = [0.0_f64, 1.0, 2.0, 3.0, 4.0];
//! let y = [0.0_f64, 1.0, 0.0, 1.0, 0.0];
//! let mut spline = CubicSpline::new(&x, &y).unwrap();
//!
//! let config = SolverConfig {
//!     epsilon: 1e-10,
//!     ..SolverConfig::default()
//! };
//! let sweeps = spline.build_with(&config);
//! assert!(sweeps < 1000);
//!
//! // Node ordinates are reproduced exactly
//! assert_eq!(spline.eval_one(2.0), 0.0);
//! ```
// These "needless" range loops walk several arrays with one index
#![allow(clippy::needless_range_loop)]

pub mod band;
pub use band::{BandMatrix, SolverConfig, Tridiagonal};

pub mod spline;
pub use spline::CubicSpline;

pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
