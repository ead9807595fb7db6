//! Quantum gate types.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::error::{IrError, IrResult};
use crate::operator::Operator;
use crate::unitary::Unitary2x2;

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    Identity,
    /// Pauli-X gate.
    SigmaX,
    /// Pauli-Y gate.
    SigmaY,
    /// Pauli-Z gate.
    SigmaZ,

    // Single-qubit Clifford+T gates
    /// Hadamard gate.
    Hadamard,
    /// S gate, `diag(1, i)`.
    Phase,
    /// S-dagger gate.
    PhaseDagger,
    /// T gate, `diag(1, e^{iπ/4})`.
    Pi8,
    /// T-dagger gate.
    Pi8Dagger,

    // Half rotations
    /// `Rx(π/2)`.
    X90,
    /// `Rx(-π/2)`.
    XM90,
    /// `Ry(π/2)`.
    Y90,
    /// `Ry(-π/2)`.
    YM90,
    /// `Rz(π/2)`.
    Z90,
    /// `Rz(-π/2)`.
    ZM90,

    // Parametrized single-qubit gates
    /// Rotation around X axis.
    RotationX(f64),
    /// Rotation around Y axis.
    RotationY(f64),
    /// Rotation around Z axis.
    RotationZ(f64),
    /// Phase shift `diag(1, e^{iφ})`.
    PhaseShift(f64),
    /// Rotation by theta about the equatorial axis at azimuth phi.
    Rotation(f64, f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    Universal(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-Z gate.
    ControlZ,
    /// Controlled-X (CNOT) gate.
    ControlX,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// iSWAP-dagger gate.
    ISwapDagger,

    // Three-qubit gates
    /// Toffoli (CCX) gate.
    Toffoli,

    /// A kernel gate applied when every control qubit is set.
    Controlled {
        /// The controlled operation.
        kernel: Box<GateKind>,
        /// Number of leading control qubits.
        num_controls: u32,
    },
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::Identity => "identity",
            StandardGate::SigmaX => "sigma_x",
            StandardGate::SigmaY => "sigma_y",
            StandardGate::SigmaZ => "sigma_z",
            StandardGate::Hadamard => "hadamard",
            StandardGate::Phase => "phase",
            StandardGate::PhaseDagger => "phase_dagger",
            StandardGate::Pi8 => "pi_8",
            StandardGate::Pi8Dagger => "pi_8_dagger",
            StandardGate::X90 => "x_90",
            StandardGate::XM90 => "x_minus_90",
            StandardGate::Y90 => "y_90",
            StandardGate::YM90 => "y_minus_90",
            StandardGate::Z90 => "z_90",
            StandardGate::ZM90 => "z_minus_90",
            StandardGate::RotationX(_) => "rotation_x",
            StandardGate::RotationY(_) => "rotation_y",
            StandardGate::RotationZ(_) => "rotation_z",
            StandardGate::PhaseShift(_) => "phase_shift",
            StandardGate::Rotation(_, _) => "rotation",
            StandardGate::Universal(_, _, _) => "universal",
            StandardGate::ControlZ => "control_z",
            StandardGate::ControlX => "control_x",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::ISwapDagger => "iswap_dagger",
            StandardGate::Toffoli => "toffoli",
            StandardGate::Controlled { .. } => "controlled",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::ControlZ
            | StandardGate::ControlX
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::ISwapDagger => 2,
            StandardGate::Toffoli => 3,
            StandardGate::Controlled {
                kernel,
                num_controls,
            } => num_controls + kernel.num_qubits(),
            _ => 1,
        }
    }

    /// Named parameters of this gate, in declaration order.
    pub fn parameters(&self) -> Vec<(&str, f64)> {
        match self {
            StandardGate::RotationX(theta)
            | StandardGate::RotationY(theta)
            | StandardGate::RotationZ(theta) => vec![("theta", *theta)],
            StandardGate::PhaseShift(phi) => vec![("phi", *phi)],
            StandardGate::Rotation(theta, phi) => vec![("theta", *theta), ("phi", *phi)],
            StandardGate::Universal(theta, phi, lambda) => {
                vec![("theta", *theta), ("phi", *phi), ("lambda", *lambda)]
            }
            StandardGate::Controlled { kernel, .. } => kernel.parameters(),
            _ => vec![],
        }
    }

    /// Rebuild a gate from its name and named parameters.
    ///
    /// Controlled gates have no flat representation and are rejected.
    pub fn from_parts(name: &str, parameters: &BTreeMap<String, f64>) -> IrResult<Self> {
        let param = |key: &str| {
            parameters
                .get(key)
                .copied()
                .ok_or_else(|| IrError::MissingParameter {
                    kind: name.to_string(),
                    parameter: key.to_string(),
                })
        };

        let gate = match name {
            "identity" => StandardGate::Identity,
            "sigma_x" => StandardGate::SigmaX,
            "sigma_y" => StandardGate::SigmaY,
            "sigma_z" => StandardGate::SigmaZ,
            "hadamard" => StandardGate::Hadamard,
            "phase" => StandardGate::Phase,
            "phase_dagger" => StandardGate::PhaseDagger,
            "pi_8" => StandardGate::Pi8,
            "pi_8_dagger" => StandardGate::Pi8Dagger,
            "x_90" => StandardGate::X90,
            "x_minus_90" => StandardGate::XM90,
            "y_90" => StandardGate::Y90,
            "y_minus_90" => StandardGate::YM90,
            "z_90" => StandardGate::Z90,
            "z_minus_90" => StandardGate::ZM90,
            "rotation_x" => StandardGate::RotationX(param("theta")?),
            "rotation_y" => StandardGate::RotationY(param("theta")?),
            "rotation_z" => StandardGate::RotationZ(param("theta")?),
            "phase_shift" => StandardGate::PhaseShift(param("phi")?),
            "rotation" => StandardGate::Rotation(param("theta")?, param("phi")?),
            "universal" => {
                StandardGate::Universal(param("theta")?, param("phi")?, param("lambda")?)
            }
            "control_z" => StandardGate::ControlZ,
            "control_x" => StandardGate::ControlX,
            "swap" => StandardGate::Swap,
            "iswap" => StandardGate::ISwap,
            "iswap_dagger" => StandardGate::ISwapDagger,
            "toffoli" => StandardGate::Toffoli,
            other => return Err(IrError::UnknownWireType(other.to_string())),
        };
        Ok(gate)
    }

    /// 2x2 matrix of a single-qubit gate.
    pub fn unitary(&self) -> Option<Unitary2x2> {
        let u = match self {
            StandardGate::Identity => Unitary2x2::identity(),
            StandardGate::SigmaX => Unitary2x2::sigma_x(),
            StandardGate::SigmaY => Unitary2x2::sigma_y(),
            StandardGate::SigmaZ => Unitary2x2::sigma_z(),
            StandardGate::Hadamard => Unitary2x2::hadamard(),
            StandardGate::Phase => Unitary2x2::phase_shift(FRAC_PI_2),
            StandardGate::PhaseDagger => Unitary2x2::phase_shift(-FRAC_PI_2),
            StandardGate::Pi8 => Unitary2x2::phase_shift(FRAC_PI_4),
            StandardGate::Pi8Dagger => Unitary2x2::phase_shift(-FRAC_PI_4),
            StandardGate::X90 => Unitary2x2::rotation_x(FRAC_PI_2),
            StandardGate::XM90 => Unitary2x2::rotation_x(-FRAC_PI_2),
            StandardGate::Y90 => Unitary2x2::rotation_y(FRAC_PI_2),
            StandardGate::YM90 => Unitary2x2::rotation_y(-FRAC_PI_2),
            StandardGate::Z90 => Unitary2x2::rotation_z(FRAC_PI_2),
            StandardGate::ZM90 => Unitary2x2::rotation_z(-FRAC_PI_2),
            StandardGate::RotationX(theta) => Unitary2x2::rotation_x(*theta),
            StandardGate::RotationY(theta) => Unitary2x2::rotation_y(*theta),
            StandardGate::RotationZ(theta) => Unitary2x2::rotation_z(*theta),
            StandardGate::PhaseShift(phi) => Unitary2x2::phase_shift(*phi),
            StandardGate::Rotation(theta, phi) => Unitary2x2::rotation(*theta, *phi),
            StandardGate::Universal(theta, phi, lambda) => {
                Unitary2x2::universal(*theta, *phi, *lambda)
            }
            _ => return None,
        };
        Some(u)
    }

    /// Dense operator, first qubit as the most significant index bit.
    pub fn operator(&self) -> IrResult<Operator> {
        if let Some(u) = self.unitary() {
            return Ok(Array2::from_shape_fn((2, 2), |(r, c)| u.data[2 * r + c]));
        }

        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let op = match self {
            StandardGate::ControlZ => {
                let mut op = Array2::eye(4);
                op[[3, 3]] = -one;
                op
            }
            StandardGate::ControlX => permutation(4, &[(2, 3)]),
            StandardGate::Swap => permutation(4, &[(1, 2)]),
            StandardGate::ISwap | StandardGate::ISwapDagger => {
                let phase = if matches!(self, StandardGate::ISwap) { i } else { -i };
                let mut op = Array2::zeros((4, 4));
                op[[0, 0]] = one;
                op[[1, 2]] = phase;
                op[[2, 1]] = phase;
                op[[3, 3]] = one;
                op
            }
            StandardGate::Toffoli => permutation(8, &[(6, 7)]),
            StandardGate::Controlled {
                kernel,
                num_controls,
            } => {
                let inner = kernel.operator()?;
                let kernel_dim = inner.nrows();
                let dim = kernel_dim << num_controls;
                let offset = dim - kernel_dim;
                let mut op = Array2::eye(dim);
                for r in 0..kernel_dim {
                    for c in 0..kernel_dim {
                        op[[offset + r, offset + c]] = inner[[r, c]];
                    }
                }
                op
            }
            _ => return Err(IrError::NoOperator(self.name().to_string())),
        };
        Ok(op)
    }

    /// Inverse gate.
    pub fn inverse(&self) -> IrResult<StandardGate> {
        let inverse = match self {
            StandardGate::Phase => StandardGate::PhaseDagger,
            StandardGate::PhaseDagger => StandardGate::Phase,
            StandardGate::Pi8 => StandardGate::Pi8Dagger,
            StandardGate::Pi8Dagger => StandardGate::Pi8,
            StandardGate::X90 => StandardGate::XM90,
            StandardGate::XM90 => StandardGate::X90,
            StandardGate::Y90 => StandardGate::YM90,
            StandardGate::YM90 => StandardGate::Y90,
            StandardGate::Z90 => StandardGate::ZM90,
            StandardGate::ZM90 => StandardGate::Z90,
            StandardGate::ISwap => StandardGate::ISwapDagger,
            StandardGate::ISwapDagger => StandardGate::ISwap,
            StandardGate::RotationX(theta) => StandardGate::RotationX(-theta),
            StandardGate::RotationY(theta) => StandardGate::RotationY(-theta),
            StandardGate::RotationZ(theta) => StandardGate::RotationZ(-theta),
            StandardGate::PhaseShift(phi) => StandardGate::PhaseShift(-phi),
            StandardGate::Rotation(theta, phi) => StandardGate::Rotation(-theta, *phi),
            StandardGate::Universal(theta, phi, lambda) => {
                StandardGate::Universal(-theta, -lambda, -phi)
            }
            StandardGate::Controlled {
                kernel,
                num_controls,
            } => StandardGate::Controlled {
                kernel: Box::new(kernel.inverse()?),
                num_controls: *num_controls,
            },
            StandardGate::Identity
            | StandardGate::SigmaX
            | StandardGate::SigmaY
            | StandardGate::SigmaZ
            | StandardGate::Hadamard
            | StandardGate::ControlZ
            | StandardGate::ControlX
            | StandardGate::Swap
            | StandardGate::Toffoli => self.clone(),
        };
        Ok(inverse)
    }

    /// Angle `φ` such that this gate equals `PhaseShift(φ)` up to global
    /// phase, for gates that are diagonal in the computational basis by kind.
    pub fn z_angle(&self) -> Option<f64> {
        let angle = match self {
            StandardGate::Identity => 0.0,
            StandardGate::SigmaZ => PI,
            StandardGate::Phase | StandardGate::Z90 => FRAC_PI_2,
            StandardGate::PhaseDagger | StandardGate::ZM90 => -FRAC_PI_2,
            StandardGate::Pi8 => FRAC_PI_4,
            StandardGate::Pi8Dagger => -FRAC_PI_4,
            StandardGate::RotationZ(theta) => *theta,
            StandardGate::PhaseShift(phi) => *phi,
            _ => return None,
        };
        Some(angle)
    }
}

/// Identity with the listed basis states exchanged.
fn permutation(dim: usize, swaps: &[(usize, usize)]) -> Operator {
    let mut order: Vec<usize> = (0..dim).collect();
    for &(a, b) in swaps {
        order.swap(a, b);
    }
    Array2::from_shape_fn((dim, dim), |(r, c)| {
        if order[r] == c {
            Complex64::new(1.0, 0.0)
        } else {
            Complex64::new(0.0, 0.0)
        }
    })
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A custom user-defined gate.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }

    /// Named parameters.
    pub fn parameters(&self) -> Vec<(&str, f64)> {
        match self {
            GateKind::Standard(g) => g.parameters(),
            GateKind::Custom(g) => g.params.iter().map(|(k, v)| (k.as_str(), *v)).collect(),
        }
    }

    /// Standard gate, if this is one.
    pub fn as_standard(&self) -> Option<&StandardGate> {
        match self {
            GateKind::Standard(g) => Some(g),
            GateKind::Custom(_) => None,
        }
    }

    /// 2x2 matrix, for single-qubit gates with a known operator.
    pub fn unitary(&self) -> Option<Unitary2x2> {
        match self {
            GateKind::Standard(g) => g.unitary(),
            GateKind::Custom(g) if g.num_qubits == 1 => {
                let [a, b, c, d] = g.matrix.as_deref()? else {
                    return None;
                };
                Some(Unitary2x2::new(*a, *b, *c, *d))
            }
            GateKind::Custom(_) => None,
        }
    }

    /// Dense operator, first qubit as the most significant index bit.
    pub fn operator(&self) -> IrResult<Operator> {
        match self {
            GateKind::Standard(g) => g.operator(),
            GateKind::Custom(g) => {
                let m = g
                    .matrix
                    .as_ref()
                    .ok_or_else(|| IrError::NoOperator(g.name.clone()))?;
                let dim = 1usize << g.num_qubits;
                if m.len() != dim * dim {
                    return Err(IrError::InvalidMatrix {
                        gate_name: g.name.clone(),
                        expected: dim * dim,
                        got: m.len(),
                    });
                }
                Ok(Array2::from_shape_fn((dim, dim), |(r, c)| m[r * dim + c]))
            }
        }
    }

    /// Inverse gate.
    pub fn inverse(&self) -> IrResult<GateKind> {
        match self {
            GateKind::Standard(g) => Ok(GateKind::Standard(g.inverse()?)),
            GateKind::Custom(g) => Err(IrError::NotInvertible(g.name.clone())),
        }
    }

    /// See [`StandardGate::z_angle`].
    pub fn z_angle(&self) -> Option<f64> {
        self.as_standard().and_then(StandardGate::z_angle)
    }
}

impl From<StandardGate> for GateKind {
    fn from(gate: StandardGate) -> Self {
        GateKind::Standard(gate)
    }
}

impl From<CustomGate> for GateKind {
    fn from(gate: CustomGate) -> Self {
        GateKind::Custom(gate)
    }
}

/// A user-defined gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Named parameters of the gate.
    pub params: Vec<(String, f64)>,
    /// Optional unitary matrix (row-major, 2^n × 2^n).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Complex64>>,
}

impl CustomGate {
    /// Create a new custom gate.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            params: vec![],
            matrix: None,
        }
    }

    /// Add parameters to the gate.
    #[must_use]
    pub fn with_params(mut self, params: Vec<(String, f64)>) -> Self {
        self.params = params;
        self
    }

    /// Add a unitary matrix to the gate.
    pub fn with_matrix(mut self, matrix: Vec<Complex64>) -> IrResult<Self> {
        let dim = 1usize << self.num_qubits;
        if matrix.len() != dim * dim {
            return Err(IrError::InvalidMatrix {
                gate_name: self.name,
                expected: dim * dim,
                got: matrix.len(),
            });
        }
        self.matrix = Some(matrix);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_identity(op: &Operator) -> bool {
        let eye: Operator = Array2::eye(op.nrows());
        op.iter().zip(eye.iter()).all(|(a, b)| (a - b).norm() < 1e-9)
    }

    fn all_fixed_gates() -> Vec<StandardGate> {
        vec![
            StandardGate::Identity,
            StandardGate::SigmaX,
            StandardGate::SigmaY,
            StandardGate::SigmaZ,
            StandardGate::Hadamard,
            StandardGate::Phase,
            StandardGate::PhaseDagger,
            StandardGate::Pi8,
            StandardGate::Pi8Dagger,
            StandardGate::X90,
            StandardGate::XM90,
            StandardGate::Y90,
            StandardGate::YM90,
            StandardGate::Z90,
            StandardGate::ZM90,
            StandardGate::RotationX(0.3),
            StandardGate::RotationY(-1.2),
            StandardGate::RotationZ(2.5),
            StandardGate::PhaseShift(0.9),
            StandardGate::Rotation(0.4, 1.7),
            StandardGate::Universal(0.4, 1.1, -2.3),
            StandardGate::ControlZ,
            StandardGate::ControlX,
            StandardGate::Swap,
            StandardGate::ISwap,
            StandardGate::ISwapDagger,
            StandardGate::Toffoli,
            StandardGate::Controlled {
                kernel: Box::new(StandardGate::Universal(0.2, 0.5, 0.7).into()),
                num_controls: 1,
            },
            StandardGate::Controlled {
                kernel: Box::new(StandardGate::ISwap.into()),
                num_controls: 2,
            },
        ]
    }

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::Hadamard.num_qubits(), 1);
        assert_eq!(StandardGate::ControlX.num_qubits(), 2);
        assert_eq!(StandardGate::Toffoli.num_qubits(), 3);
        let controlled = StandardGate::Controlled {
            kernel: Box::new(StandardGate::Swap.into()),
            num_controls: 2,
        };
        assert_eq!(controlled.num_qubits(), 4);
        assert_eq!(controlled.operator().unwrap().nrows(), 16);
    }

    #[test]
    fn test_parameters() {
        let u = StandardGate::Universal(0.1, 0.2, 0.3);
        assert_eq!(
            u.parameters(),
            vec![("theta", 0.1), ("phi", 0.2), ("lambda", 0.3)]
        );
        assert!(StandardGate::ControlZ.parameters().is_empty());
        assert_eq!(StandardGate::PhaseShift(0.5).parameters(), vec![("phi", 0.5)]);
    }

    #[test]
    fn test_inverse_products_are_identity() {
        for gate in all_fixed_gates() {
            let op = gate.operator().unwrap();
            let inv = gate.inverse().unwrap().operator().unwrap();
            assert!(is_identity(&op.dot(&inv)), "{} inverse", gate.name());
        }
    }

    #[test]
    fn test_inverse_pairs() {
        assert_eq!(StandardGate::Phase.inverse().unwrap(), StandardGate::PhaseDagger);
        assert_eq!(StandardGate::X90.inverse().unwrap(), StandardGate::XM90);
        assert_eq!(StandardGate::ISwap.inverse().unwrap(), StandardGate::ISwapDagger);
        assert_eq!(
            StandardGate::Universal(1.0, 2.0, 3.0).inverse().unwrap(),
            StandardGate::Universal(-1.0, -3.0, -2.0)
        );
    }

    #[test]
    fn test_custom_gate_not_invertible() {
        let gate = GateKind::Custom(CustomGate::new("oracle", 2));
        let err = gate.inverse().unwrap_err();
        assert!(matches!(err, IrError::NotInvertible(name) if name == "oracle"));
    }

    #[test]
    fn test_custom_matrix_length_checked() {
        let err = CustomGate::new("bad", 1)
            .with_matrix(vec![Complex64::new(1.0, 0.0); 3])
            .unwrap_err();
        assert!(matches!(err, IrError::InvalidMatrix { expected: 4, got: 3, .. }));
    }

    #[test]
    fn test_cx_operator_uses_first_qubit_as_control() {
        let op = StandardGate::ControlX.operator().unwrap();
        // |10> -> |11>
        assert!((op[[3, 2]] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!((op[[1, 1]] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_from_parts() {
        let mut params = BTreeMap::new();
        params.insert("phi".to_string(), 0.25);
        assert_eq!(
            StandardGate::from_parts("phase_shift", &params).unwrap(),
            StandardGate::PhaseShift(0.25)
        );
        assert!(matches!(
            StandardGate::from_parts("rotation_x", &params),
            Err(IrError::MissingParameter { .. })
        ));
        assert!(matches!(
            StandardGate::from_parts("warp", &params),
            Err(IrError::UnknownWireType(_))
        ));
    }

    #[test]
    fn test_z_angle() {
        assert_eq!(StandardGate::SigmaZ.z_angle(), Some(PI));
        assert_eq!(StandardGate::Pi8Dagger.z_angle(), Some(-FRAC_PI_4));
        assert_eq!(StandardGate::Hadamard.z_angle(), None);
        for gate in [StandardGate::Z90, StandardGate::Pi8, StandardGate::RotationZ(0.7)] {
            let u = gate.unitary().unwrap();
            let p = Unitary2x2::phase_shift(gate.z_angle().unwrap());
            assert!(u.approx_eq_up_to_phase(&p, 1e-9));
        }
    }
}
