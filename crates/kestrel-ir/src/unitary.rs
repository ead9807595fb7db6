//! 2x2 unitary matrices for single-qubit gates.
//!
//! Provides the closed-form matrices of every single-qubit gate kind, matrix
//! products, and the decomposition of an arbitrary 2x2 unitary into the
//! angles of a `Universal` gate.

use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI};

/// Default tolerance for floating point comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

/// Angles of `U = e^{i·phase} · Universal(theta, phi, lambda)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniversalAngles {
    /// Polar angle.
    pub theta: f64,
    /// Phase applied after the rotation.
    pub phi: f64,
    /// Phase applied before the rotation.
    pub lambda: f64,
    /// Global phase stripped from the matrix.
    pub phase: f64,
}

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Diagonal matrix `diag(a, d)`.
    pub fn diagonal(a: Complex64, d: Complex64) -> Self {
        Self::new(a, ZERO, ZERO, d)
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::diagonal(ONE, ONE)
    }

    /// Create a Hadamard matrix.
    pub fn hadamard() -> Self {
        let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
        Self::new(s, s, s, -s)
    }

    /// Create a Pauli-X matrix.
    pub fn sigma_x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Create a Pauli-Y matrix.
    pub fn sigma_y() -> Self {
        Self::new(ZERO, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), ZERO)
    }

    /// Create a Pauli-Z matrix.
    pub fn sigma_z() -> Self {
        Self::diagonal(ONE, -ONE)
    }

    /// Create an RX rotation matrix.
    pub fn rotation_x(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(0.0, -s),
            Complex64::new(0.0, -s),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RY rotation matrix.
    pub fn rotation_y(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RZ rotation matrix.
    pub fn rotation_z(theta: f64) -> Self {
        Self::diagonal(
            Complex64::from_polar(1.0, -theta / 2.0),
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// Create the phase shift `diag(1, e^{i·phi})`.
    pub fn phase_shift(phi: f64) -> Self {
        Self::diagonal(ONE, Complex64::from_polar(1.0, phi))
    }

    /// Rotation by `theta` about the equatorial axis at azimuth `phi`.
    pub fn rotation(theta: f64, phi: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let minus_i = Complex64::new(0.0, -1.0);
        Self::new(
            Complex64::new(c, 0.0),
            minus_i * Complex64::from_polar(s, -phi),
            minus_i * Complex64::from_polar(s, phi),
            Complex64::new(c, 0.0),
        )
    }

    /// Create the universal gate U(theta, phi, lambda).
    pub fn universal(theta: f64, phi: f64, lambda: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    /// Phase gate `S`.
    pub fn phase() -> Self {
        Self::phase_shift(FRAC_PI_2)
    }

    /// `T` gate.
    pub fn pi_8() -> Self {
        Self::phase_shift(FRAC_PI_4)
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Multiply every entry by a scalar.
    pub fn scale(&self, factor: Complex64) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a * factor, b * factor, c * factor, d * factor)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Check if this is approximately identity (up to global phase).
    pub fn is_identity(&self) -> bool {
        self.is_identity_within(DEFAULT_TOLERANCE)
    }

    /// Identity up to global phase, with an explicit tolerance.
    pub fn is_identity_within(&self, tolerance: f64) -> bool {
        let [a, b, c, d] = self.data;
        if b.norm() > tolerance || c.norm() > tolerance {
            return false;
        }
        (a - d).norm() < tolerance
    }

    /// Equality up to a global phase.
    pub fn approx_eq_up_to_phase(&self, other: &Self, tolerance: f64) -> bool {
        self.mul(&other.dagger()).is_identity_within(tolerance)
    }

    /// Decompose into `e^{i·phase} · Universal(theta, phi, lambda)`.
    ///
    /// When `|U10|` is within `tolerance` of zero the matrix is diagonal and
    /// all of its relative phase goes into `lambda`. When `|U00|` vanishes
    /// instead, `lambda` is fixed at zero.
    pub fn universal_angles(&self, tolerance: f64) -> UniversalAngles {
        let [a, b, c, d] = self.data;
        let theta = 2.0 * c.norm().atan2(a.norm());

        if c.norm() <= tolerance {
            let phase = a.arg();
            return UniversalAngles {
                theta: 0.0,
                phi: 0.0,
                lambda: Self::normalize_angle(d.arg() - phase),
                phase,
            };
        }

        if a.norm() <= tolerance {
            let phase = (-b).arg();
            return UniversalAngles {
                theta: PI,
                phi: Self::normalize_angle(c.arg() - phase),
                lambda: 0.0,
                phase,
            };
        }

        let phase = a.arg();
        UniversalAngles {
            theta,
            phi: Self::normalize_angle(c.arg() - phase),
            lambda: Self::normalize_angle((-b).arg() - phase),
            phase,
        }
    }

    /// Normalize angles to (-pi, pi].
    pub fn normalize_angle(angle: f64) -> f64 {
        if angle.is_nan() || angle.is_infinite() {
            return 0.0;
        }
        let mut a = angle.rem_euclid(2.0 * PI);
        if a > PI {
            a -= 2.0 * PI;
        }
        a
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

impl UniversalAngles {
    /// Matrix of the decomposition including its global phase.
    pub fn to_unitary(&self) -> Unitary2x2 {
        Unitary2x2::universal(self.theta, self.phi, self.lambda)
            .scale(Complex64::from_polar(1.0, self.phase))
    }
}
