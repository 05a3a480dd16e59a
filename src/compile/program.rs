use smallvec::{SmallVec, smallvec};

use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::{DefId, ParamId, PartIdx};
use crate::holon::definition::Transform;
use crate::param::kind::Value;
use crate::param::store::ParamStore;

/// Register index inside one update program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegId(pub(crate) u16);

impl RegId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One step of a compiled update program.
#[derive(Debug, Clone)]
pub enum UpdateOp {
    /// Load one of the instance's own parameters into a register.
    ReadParam {
        /// Parameter slot on the owning definition.
        param: ParamId,
        /// Destination register.
        reg: RegId,
    },
    /// Emit a transformed register value as a write to a child property.
    WriteChild {
        /// Part slot addressing the child.
        part: PartIdx,
        /// Property slot on the child's definition.
        property: ParamId,
        /// Source register.
        reg: RegId,
        /// Transform applied between register and property.
        transform: Transform,
    },
    /// A recorded bidirectional pair. Evaluation does not solve it; the op
    /// exists so disassembling a program shows every declared edge.
    BidirectionalHold {
        /// Left endpoint as (part, property).
        left: (PartIdx, ParamId),
        /// Right endpoint as (part, property).
        right: (PartIdx, ParamId),
    },
    /// Run the child's own compiled program after this instance's writes
    /// have landed. Children are never inlined.
    Descend {
        /// Part slot addressing the child.
        part: PartIdx,
        /// The child's definition, for program lookup.
        def: DefId,
    },
}

/// One pending property write produced by a program run.
///
/// Addresses the child by part slot; the caller maps slots to concrete
/// instances and admits the value against the child's parameter spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildWrite {
    /// Part slot addressing the child.
    pub part: PartIdx,
    /// Property slot on the child's definition.
    pub property: ParamId,
    /// Value to write.
    pub value: Value,
}

/// Compiled update steps for one definition.
///
/// Op order is fixed at compile time: every source read, then every child
/// write, then bidirectional holds, then descends. `run` is referentially
/// transparent with respect to other instances — it sees one instance's
/// parameter values and emits writes addressed only to that instance's own
/// children, so any number of clones of one definition evaluate
/// independently, in any order or in parallel.
#[derive(Debug, Clone)]
pub struct UpdateProgram {
    pub(crate) def: DefId,
    pub(crate) ops: SmallVec<[UpdateOp; 8]>,
    pub(crate) regs: u16,
}

impl UpdateProgram {
    /// Definition this program was compiled from.
    pub fn def(&self) -> DefId {
        self.def
    }

    /// The steps, in execution order.
    pub fn ops(&self) -> &[UpdateOp] {
        &self.ops
    }

    /// Number of registers a run allocates.
    pub fn reg_count(&self) -> u16 {
        self.regs
    }

    /// Execute against one instance's parameter values.
    ///
    /// Pure: no state outside the returned batch is touched. Hold and
    /// descend ops produce no writes.
    pub fn run(&self, values: &ParamStore) -> HoloformResult<Vec<ChildWrite>> {
        let mut regs: SmallVec<[Option<Value>; 8]> = smallvec![None; self.regs as usize];
        let mut batch = Vec::new();
        for op in &self.ops {
            match op {
                UpdateOp::ReadParam { param, reg } => {
                    let slot = regs.get_mut(reg.index()).ok_or_else(|| bad_reg(*reg))?;
                    *slot = Some(values.read(*param)?);
                }
                UpdateOp::WriteChild {
                    part,
                    property,
                    reg,
                    transform,
                } => {
                    let loaded = regs
                        .get(reg.index())
                        .copied()
                        .flatten()
                        .ok_or_else(|| bad_reg(*reg))?;
                    batch.push(ChildWrite {
                        part: *part,
                        property: *property,
                        value: transform.apply(loaded)?,
                    });
                }
                UpdateOp::BidirectionalHold { .. } | UpdateOp::Descend { .. } => {}
            }
        }
        Ok(batch)
    }

    /// Parts to evaluate after this instance, in part order.
    pub(crate) fn descents(&self) -> impl Iterator<Item = (PartIdx, DefId)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            UpdateOp::Descend { part, def } => Some((*part, *def)),
            _ => None,
        })
    }
}

fn bad_reg(reg: RegId) -> HoloformError {
    HoloformError::evaluation(format!("register {reg:?} used before load"))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/program.rs"]
mod tests;
