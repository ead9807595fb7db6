//! Elements of the n-qubit Pauli group.
//!
//! An element `i^δ · (-1)^ε · ⊗_q X^{x_q} Z^{z_q}` is stored as the binary
//! vector `u = (x_1..x_n, z_1..z_n)` plus the two phase bits. `Y` is encoded
//! as `i·X·Z`.

use std::fmt;
use std::ops::Mul;

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::operator::{apply_operator, Operator, MAX_DENSE_QUBITS};
use crate::qubit::QubitId;

/// An element of the Pauli group in symplectic form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PauliGroupElement {
    /// `(x_1..x_n, z_1..z_n)`.
    u: Vec<bool>,
    /// Exponent of `i`.
    delta: bool,
    /// Exponent of `-1`.
    epsilon: bool,
}

impl PauliGroupElement {
    /// The identity on `qubit_count` qubits.
    pub fn identity(qubit_count: u32) -> Self {
        Self {
            u: vec![false; 2 * qubit_count as usize],
            delta: false,
            epsilon: false,
        }
    }

    /// Build an element from its symplectic vector and phase bits.
    pub fn new(u: Vec<bool>, delta: bool, epsilon: bool) -> IrResult<Self> {
        if u.len() % 2 != 0 {
            return Err(IrError::InvalidPauli(format!(
                "symplectic vector has odd length {}",
                u.len()
            )));
        }
        Ok(Self { u, delta, epsilon })
    }

    /// The element of a single-qubit Pauli instruction, embedded in
    /// `qubit_count` qubits.
    pub fn from_instruction(instruction: &Instruction, qubit_count: u32) -> IrResult<Self> {
        instruction.validate()?;
        let (x, z, delta) = match instruction.as_standard() {
            Some(StandardGate::Identity) => (false, false, false),
            Some(StandardGate::SigmaX) => (true, false, false),
            Some(StandardGate::SigmaY) => (true, true, true),
            Some(StandardGate::SigmaZ) => (false, true, false),
            _ => {
                return Err(IrError::InvalidPauli(format!(
                    "'{}' is not a Pauli gate",
                    instruction.name()
                )));
            }
        };
        let qubit = instruction.qubits[0];
        if qubit.0 == 0 || qubit.0 > qubit_count {
            return Err(IrError::QubitOutOfRange {
                qubit,
                qubit_count,
                gate_name: Some(instruction.name().to_string()),
            });
        }
        let n = qubit_count as usize;
        let mut element = Self::identity(qubit_count);
        element.u[qubit.index()] = x;
        element.u[n + qubit.index()] = z;
        element.delta = delta;
        Ok(element)
    }

    /// Multiply by the scalar `i^imaginary · (-1)^negative`.
    #[must_use]
    pub fn times_phase(&self, imaginary: bool, negative: bool) -> Self {
        Self {
            u: self.u.clone(),
            delta: self.delta ^ imaginary,
            epsilon: self.epsilon ^ negative ^ (self.delta && imaginary),
        }
    }

    /// Number of qubits.
    pub fn qubit_count(&self) -> u32 {
        (self.u.len() / 2) as u32
    }

    /// X part of the symplectic vector.
    pub fn x_bits(&self) -> &[bool] {
        &self.u[..self.u.len() / 2]
    }

    /// Z part of the symplectic vector.
    pub fn z_bits(&self) -> &[bool] {
        &self.u[self.u.len() / 2..]
    }

    /// Exponent of `i`.
    pub fn delta(&self) -> bool {
        self.delta
    }

    /// Exponent of `-1`.
    pub fn epsilon(&self) -> bool {
        self.epsilon
    }

    /// Group product `self · rhs`.
    pub fn try_mul(&self, rhs: &Self) -> IrResult<Self> {
        if self.u.len() != rhs.u.len() {
            return Err(IrError::InvalidPauli(format!(
                "cannot multiply elements on {} and {} qubits",
                self.qubit_count(),
                rhs.qubit_count()
            )));
        }

        // Moving X^{x2} left past Z^{z1} costs a sign per shared qubit.
        let cross = rhs
            .x_bits()
            .iter()
            .zip(self.z_bits())
            .filter(|(x2, z1)| **x2 && **z1)
            .count()
            % 2
            == 1;

        Ok(Self {
            u: self.u.iter().zip(&rhs.u).map(|(a, b)| a ^ b).collect(),
            delta: self.delta ^ rhs.delta,
            epsilon: self.epsilon ^ rhs.epsilon ^ (self.delta && rhs.delta) ^ cross,
        })
    }

    /// Whether the two elements commute.
    pub fn commutes_with(&self, other: &Self) -> bool {
        let n = self.u.len() / 2;
        let form = (0..n)
            .filter(|&q| (self.u[q] && other.u[n + q]) ^ (self.u[n + q] && other.u[q]))
            .count();
        form % 2 == 0
    }

    /// Dense operator of this element.
    pub fn operator(&self) -> IrResult<Operator> {
        let qubit_count = self.qubit_count();
        if qubit_count > MAX_DENSE_QUBITS {
            return Err(IrError::TooManyQubits {
                qubit_count,
                max: MAX_DENSE_QUBITS,
            });
        }
        let dim = 1usize << qubit_count;
        let x = StandardGate::SigmaX.operator()?;
        let z = StandardGate::SigmaZ.operator()?;
        let scalar = match (self.delta, self.epsilon) {
            (false, false) => Complex64::new(1.0, 0.0),
            (true, false) => Complex64::new(0.0, 1.0),
            (false, true) => Complex64::new(-1.0, 0.0),
            (true, true) => Complex64::new(0.0, -1.0),
        };

        let mut result = Array2::zeros((dim, dim));
        for col in 0..dim {
            let mut column = vec![Complex64::new(0.0, 0.0); dim];
            column[col] = scalar;
            // Z acts first within each X^x Z^z factor.
            for (q, &bit) in self.z_bits().iter().enumerate() {
                if bit {
                    apply_operator(&mut column, &z, &[QubitId::from_index(q as u32)]);
                }
            }
            for (q, &bit) in self.x_bits().iter().enumerate() {
                if bit {
                    apply_operator(&mut column, &x, &[QubitId::from_index(q as u32)]);
                }
            }
            for (row, amp) in column.into_iter().enumerate() {
                result[[row, col]] = amp;
            }
        }
        Ok(result)
    }
}

impl Mul for &PauliGroupElement {
    type Output = PauliGroupElement;

    /// # Panics
    ///
    /// Panics if the operands act on different numbers of qubits; use
    /// [`PauliGroupElement::try_mul`] to handle that case.
    fn mul(self, rhs: Self) -> PauliGroupElement {
        match self.try_mul(rhs) {
            Ok(product) => product,
            Err(err) => panic!("{err}"),
        }
    }
}

impl fmt::Display for PauliGroupElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match (self.delta, self.epsilon) {
            (false, false) => "",
            (true, false) => "i·",
            (false, true) => "-",
            (true, true) => "-i·",
        };
        f.write_str(prefix)?;
        for (x, z) in self.x_bits().iter().zip(self.z_bits()) {
            let factor = match (x, z) {
                (false, false) => "I",
                (true, false) => "X",
                (false, true) => "Z",
                (true, true) => "(XZ)",
            };
            f.write_str(factor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::equal_up_to_global_phase;

    fn pauli(gate: StandardGate, qubit: u32, n: u32) -> PauliGroupElement {
        PauliGroupElement::from_instruction(&Instruction::single(gate, QubitId(qubit)), n).unwrap()
    }

    fn close(a: &Operator, b: &Operator) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() < 1e-12)
    }

    #[test]
    fn test_z_times_y_is_minus_i_x() {
        let z = pauli(StandardGate::SigmaZ, 1, 1);
        let y = pauli(StandardGate::SigmaY, 1, 1);
        let product = &z * &y;
        let minus_i_x = pauli(StandardGate::SigmaX, 1, 1).times_phase(true, true);
        assert_eq!(product, minus_i_x);
        assert_eq!(product.to_string(), "-i·X");
    }

    #[test]
    fn test_y_operator_matches_gate() {
        let y = pauli(StandardGate::SigmaY, 1, 1);
        assert!(close(&y.operator().unwrap(), &StandardGate::SigmaY.operator().unwrap()));
    }

    #[test]
    fn test_product_matches_dense_product() {
        let pairs = [
            (StandardGate::SigmaX, StandardGate::SigmaZ),
            (StandardGate::SigmaY, StandardGate::SigmaX),
            (StandardGate::SigmaY, StandardGate::SigmaY),
            (StandardGate::SigmaZ, StandardGate::SigmaY),
        ];
        for (a, b) in pairs {
            let left = &pauli(a.clone(), 2, 2) * &pauli(StandardGate::SigmaX, 1, 2);
            let right = &pauli(b.clone(), 2, 2) * &pauli(StandardGate::SigmaZ, 1, 2);
            let product = &left * &right;
            let dense = left.operator().unwrap().dot(&right.operator().unwrap());
            assert!(close(&product.operator().unwrap(), &dense), "{a:?} {b:?}");
        }
    }

    #[test]
    fn test_square_of_y_is_identity() {
        let y = pauli(StandardGate::SigmaY, 1, 1);
        assert_eq!(&y * &y, PauliGroupElement::identity(1));
    }

    #[test]
    fn test_commutation() {
        let x1 = pauli(StandardGate::SigmaX, 1, 2);
        let z1 = pauli(StandardGate::SigmaZ, 1, 2);
        let z2 = pauli(StandardGate::SigmaZ, 2, 2);
        assert!(!x1.commutes_with(&z1));
        assert!(x1.commutes_with(&z2));
        let xx = &x1 * &pauli(StandardGate::SigmaX, 2, 2);
        let zz = &z1 * &z2;
        assert!(xx.commutes_with(&zz));
    }

    #[test]
    fn test_phase_only_differs_by_scalar() {
        let x = pauli(StandardGate::SigmaX, 1, 1);
        let minus_x = x.times_phase(false, true);
        assert!(equal_up_to_global_phase(
            &x.operator().unwrap(),
            &minus_x.operator().unwrap(),
            1e-12
        ));
        assert_ne!(x, minus_x);
    }

    #[test]
    fn test_non_pauli_rejected() {
        let h = Instruction::single(StandardGate::Hadamard, QubitId(1));
        assert!(matches!(
            PauliGroupElement::from_instruction(&h, 1),
            Err(IrError::InvalidPauli(_))
        ));
    }

    #[test]
    fn test_size_mismatch() {
        let a = PauliGroupElement::identity(1);
        let b = PauliGroupElement::identity(2);
        assert!(a.try_mul(&b).is_err());
        assert!(PauliGroupElement::new(vec![true], false, false).is_err());
    }
}
