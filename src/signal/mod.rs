//! Combinational signal arena.
//!
//! Builds and owns the one-bit value nodes (`Bit`) that partial-product rows
//! reference. The arena is append-only, so node ids double as a topological
//! order and evaluation is a single forward pass over the node list.
//!
//! Conventions:
//! * Node 0 and node 1 are the interned constants 0 and 1; `Bit::ZERO` and
//!   `Bit::ONE` are valid in any pool.
//! * Combinators allocate a new node per call. Two nodes may evaluate to the
//!   same value while remaining distinct identities; nothing dedupes by value.
//! * Inputs are numbered in creation order and bound positionally by
//!   [`BitPool::evaluate`].

pub mod vector;

/// Index of a node in a [`BitPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bit(u32);

impl Bit {
    /// The interned constant-0 node.
    pub const ZERO: Bit = Bit(0);
    /// The interned constant-1 node.
    pub const ONE: Bit = Bit(1);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }

    /// True for the two interned constant nodes.
    pub fn is_const(self) -> bool {
        self.0 < 2
    }
}

#[derive(Clone, Copy, Debug)]
enum Gate {
    Const(bool),
    Input(u32),
    Not(Bit),
    And(Bit, Bit),
    Or(Bit, Bit),
    Xor(Bit, Bit),
    Mux { cond: Bit, hi: Bit, lo: Bit },
}

/// Append-only arena of combinational nodes.
#[derive(Debug)]
pub struct BitPool {
    gates: Vec<Gate>,
    inputs: u32,
}

impl BitPool {
    pub fn new() -> Self {
        BitPool {
            gates: vec![Gate::Const(false), Gate::Const(true)],
            inputs: 0,
        }
    }

    fn push(&mut self, gate: Gate) -> Bit {
        let id = self.gates.len() as u32;
        self.gates.push(gate);
        Bit(id)
    }

    /// The interned constant node for `value`.
    pub fn constant(&self, value: bool) -> Bit {
        if value {
            Bit::ONE
        } else {
            Bit::ZERO
        }
    }

    /// Allocates a fresh input node, bound to the next evaluation slot.
    pub fn input(&mut self) -> Bit {
        let slot = self.inputs;
        self.inputs += 1;
        self.push(Gate::Input(slot))
    }

    pub fn not(&mut self, a: Bit) -> Bit {
        self.push(Gate::Not(a))
    }

    pub fn and(&mut self, a: Bit, b: Bit) -> Bit {
        self.push(Gate::And(a, b))
    }

    pub fn or(&mut self, a: Bit, b: Bit) -> Bit {
        self.push(Gate::Or(a, b))
    }

    pub fn xor(&mut self, a: Bit, b: Bit) -> Bit {
        self.push(Gate::Xor(a, b))
    }

    /// Two-way select: `hi` when `cond` is 1, else `lo`.
    pub fn mux(&mut self, cond: Bit, hi: Bit, lo: Bit) -> Bit {
        self.push(Gate::Mux { cond, hi, lo })
    }

    /// Number of nodes in the arena, interned constants included.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Number of input nodes created so far.
    pub fn input_count(&self) -> usize {
        self.inputs as usize
    }

    /// Evaluates every node under the given input assignment. `inputs` is
    /// indexed by input creation order and must cover all inputs.
    pub fn evaluate(&self, inputs: &[bool]) -> Evaluation {
        assert_eq!(inputs.len(), self.inputs as usize);
        let mut values: Vec<bool> = Vec::with_capacity(self.gates.len());
        for gate in &self.gates {
            let v = match *gate {
                Gate::Const(b) => b,
                Gate::Input(slot) => inputs[slot as usize],
                Gate::Not(a) => !values[a.index()],
                Gate::And(a, b) => values[a.index()] && values[b.index()],
                Gate::Or(a, b) => values[a.index()] || values[b.index()],
                Gate::Xor(a, b) => values[a.index()] != values[b.index()],
                Gate::Mux { cond, hi, lo } => {
                    if values[cond.index()] {
                        values[hi.index()]
                    } else {
                        values[lo.index()]
                    }
                }
            };
            values.push(v);
        }
        Evaluation { values }
    }
}

impl Default for BitPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one forward pass over a pool.
#[derive(Debug)]
pub struct Evaluation {
    values: Vec<bool>,
}

impl Evaluation {
    /// Value of `bit` under this assignment.
    pub fn bit(&self, bit: Bit) -> bool {
        self.values[bit.index()]
    }
}
