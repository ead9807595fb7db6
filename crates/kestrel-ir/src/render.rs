//! Text diagrams of circuits.

use std::fmt;

use crate::circuit::QuantumCircuit;
use crate::registry::SymbolRegistry;

impl QuantumCircuit {
    /// Draw the circuit with one wire row per qubit and one column per step.
    pub fn render(&self, registry: &SymbolRegistry) -> String {
        let n = self.qubit_count() as usize;
        if n == 0 {
            return String::new();
        }

        let prefix_width = format!("q{n}: ").len();
        let mut rows: Vec<String> = (0..2 * n - 1)
            .map(|row| {
                if row % 2 == 0 {
                    format!("{:<prefix_width$}", format!("q{}: ", row / 2 + 1))
                } else {
                    " ".repeat(prefix_width)
                }
            })
            .collect();

        for step in self.steps() {
            let labelled: Vec<(Vec<usize>, Vec<String>)> = step
                .iter()
                .map(|instruction| {
                    let wires = instruction.qubits.iter().map(|q| q.index()).collect();
                    (wires, registry.display_symbols(instruction))
                })
                .collect();
            let width = labelled
                .iter()
                .flat_map(|(_, labels)| labels.iter().map(|l| l.chars().count()))
                .max()
                .unwrap_or(1)
                + 2;
            let center = width / 2;

            let mut cells: Vec<Vec<char>> = (0..2 * n - 1)
                .map(|row| vec![if row % 2 == 0 { '-' } else { ' ' }; width])
                .collect();

            for (wires, labels) in &labelled {
                if let (Some(&low), Some(&high)) = (wires.iter().min(), wires.iter().max()) {
                    for row in 2 * low + 1..2 * high {
                        let on_gate = row % 2 == 0 && wires.contains(&(row / 2));
                        if !on_gate {
                            cells[row][center] = if row % 2 == 0 { '+' } else { '|' };
                        }
                    }
                }
                for (wire, label) in wires.iter().zip(labels) {
                    let len = label.chars().count();
                    let start = center.saturating_sub(len / 2).min(width - len);
                    for (offset, ch) in label.chars().enumerate() {
                        cells[2 * wire][start + offset] = ch;
                    }
                }
            }

            for (row, cell) in rows.iter_mut().zip(cells) {
                row.extend(cell);
            }
        }

        for row in &mut rows {
            row.push('-');
        }
        rows.iter()
            .enumerate()
            .map(|(i, row)| if i % 2 == 0 { row.as_str() } else { row.trim_end() })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for QuantumCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&SymbolRegistry::standard()))
    }
}
