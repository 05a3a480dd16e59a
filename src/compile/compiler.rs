use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use smallvec::SmallVec;

use crate::compile::fingerprint::DefFingerprint;
use crate::compile::program::{RegId, UpdateOp, UpdateProgram};
use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::{DefId, ParamId, PartIdx};
use crate::holon::definition::{BindingMode, BindingSource, DefKind, HolonDef, PropertyRef};
use crate::holon::registry::DefinitionRegistry;

/// Compile one definition's bindings into an [`UpdateProgram`].
///
/// Binding endpoints, declared as names, resolve here: the target part must
/// exist on the whole, the target property on the part's definition, and a
/// one-way source on the whole itself. Each distinct source parameter is
/// read into a register once, no matter how many bindings it feeds; write
/// ops follow in declaration order, then holds, then one descend per
/// composed part. Primitives compile to the empty program.
#[tracing::instrument(skip(registry))]
pub fn compile(registry: &DefinitionRegistry, def: DefId) -> HoloformResult<UpdateProgram> {
    let whole = registry.get(def)?;
    if whole.kind() == DefKind::Primitive {
        return Ok(UpdateProgram {
            def,
            ops: SmallVec::new(),
            regs: 0,
        });
    }

    let mut reads: Vec<(ParamId, RegId)> = Vec::new();
    let mut writes: Vec<UpdateOp> = Vec::new();
    let mut holds: Vec<UpdateOp> = Vec::new();
    let mut claimed: BTreeMap<(PartIdx, ParamId), String> = BTreeMap::new();

    for binding in whole.bindings() {
        let (part, property) = resolve_property(registry, whole, &binding.target)?;
        match (&binding.source, binding.mode) {
            (BindingSource::Param(param_name), BindingMode::OneWay) => {
                let Some(source) = whole.param_id(param_name) else {
                    return Err(HoloformError::unresolved_reference(format!(
                        "definition `{}`: binding to `{}`: no parameter named `{param_name}`",
                        whole.name(),
                        binding.target
                    )));
                };
                if let Some(first) = claimed.insert((part, property), param_name.clone()) {
                    return Err(HoloformError::ambiguous_binding(format!(
                        "definition `{}`: bindings from `{first}` and `{param_name}` both \
                         target `{}`",
                        whole.name(),
                        binding.target
                    )));
                }
                let reg = match reads.iter().find(|(p, _)| *p == source) {
                    Some((_, reg)) => *reg,
                    None => {
                        let reg = RegId(reads.len() as u16);
                        reads.push((source, reg));
                        reg
                    }
                };
                writes.push(UpdateOp::WriteChild {
                    part,
                    property,
                    reg,
                    transform: binding.transform.clone(),
                });
            }
            (BindingSource::Property(left), BindingMode::Bidirectional) => {
                let (left_part, left_property) = resolve_property(registry, whole, left)?;
                holds.push(UpdateOp::BidirectionalHold {
                    left: (left_part, left_property),
                    right: (part, property),
                });
            }
            (BindingSource::Param(_), BindingMode::Bidirectional)
            | (BindingSource::Property(_), BindingMode::OneWay) => {
                return Err(HoloformError::composition(format!(
                    "definition `{}`: binding source and mode do not match",
                    whole.name()
                )));
            }
        }
    }

    let mut ops: SmallVec<[UpdateOp; 8]> = SmallVec::with_capacity(
        reads.len() + writes.len() + holds.len() + whole.parts().len(),
    );
    for (param, reg) in &reads {
        ops.push(UpdateOp::ReadParam {
            param: *param,
            reg: *reg,
        });
    }
    ops.extend(writes);
    ops.extend(holds);
    for (idx, part) in whole.parts().iter().enumerate() {
        let child = part_def(registry, whole, &part.name, part.def)?;
        if child.kind() == DefKind::Composed {
            ops.push(UpdateOp::Descend {
                part: PartIdx(idx as u32),
                def: part.def,
            });
        }
    }

    Ok(UpdateProgram {
        def,
        ops,
        regs: reads.len() as u16,
    })
}

/// Resolve a `part.property` name pair against the whole and its part's
/// definition.
fn resolve_property(
    registry: &DefinitionRegistry,
    whole: &HolonDef,
    target: &PropertyRef,
) -> HoloformResult<(PartIdx, ParamId)> {
    let Some(part_idx) = whole.part_idx(&target.part) else {
        return Err(HoloformError::unresolved_reference(format!(
            "definition `{}`: binding target `{target}`: no part named `{}`",
            whole.name(),
            target.part
        )));
    };
    let decl = &whole.parts()[part_idx.index()];
    let child = part_def(registry, whole, &decl.name, decl.def)?;
    let Some(property) = child.param_id(&target.property) else {
        return Err(HoloformError::unresolved_reference(format!(
            "definition `{}`: binding target `{target}`: part definition `{}` declares no \
             property `{}`",
            whole.name(),
            child.name(),
            target.property
        )));
    };
    Ok((part_idx, property))
}

fn part_def<'r>(
    registry: &'r DefinitionRegistry,
    whole: &HolonDef,
    part_name: &str,
    def: DefId,
) -> HoloformResult<&'r HolonDef> {
    registry.get(def).map_err(|_| {
        HoloformError::composition(format!(
            "definition `{}`: part `{part_name}` uses `{}` which is declared but never composed",
            whole.name(),
            registry.name_of(def).unwrap_or("?")
        ))
    })
}

/// Memoized compiled programs.
///
/// Entries are keyed per definition and carry the content fingerprint the
/// program was compiled under; a lookup whose fingerprint no longer matches
/// recompiles instead of serving the stale program. Definitions are
/// immutable once composed, so in practice every hit after the first is a
/// fingerprint-verified cache hit.
#[derive(Debug, Default)]
pub struct ProgramCache {
    programs: HashMap<DefId, (DefFingerprint, Arc<UpdateProgram>)>,
}

impl ProgramCache {
    /// Empty cache.
    pub fn new() -> ProgramCache {
        ProgramCache::default()
    }

    /// Number of cached programs.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Fetch the program for `def`, compiling on first use.
    pub fn get_or_compile(
        &mut self,
        registry: &DefinitionRegistry,
        def: DefId,
    ) -> HoloformResult<Arc<UpdateProgram>> {
        let fingerprint = DefFingerprint::of(registry, def)?;
        if let Some((cached, program)) = self.programs.get(&def)
            && *cached == fingerprint
        {
            return Ok(Arc::clone(program));
        }
        let program = Arc::new(compile(registry, def)?);
        self.programs.insert(def, (fingerprint, Arc::clone(&program)));
        Ok(program)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
