use std::sync::Arc;

use rayon::prelude::*;

use crate::compile::compiler::ProgramCache;
use crate::compile::program::{ChildWrite, UpdateProgram};
use crate::eval::arena::InstanceArena;
use crate::foundation::error::{HoloformError, HoloformResult};
use crate::foundation::ids::InstanceId;
use crate::holon::registry::DefinitionRegistry;

/// Evaluation pass options.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalOpts {
    /// Compute per-instance write batches on the rayon pool.
    ///
    /// Write application stays sequential in level order either way, so a
    /// parallel pass produces the same arena as a sequential one.
    pub parallel: bool,
}

/// One instance whose update failed during a pass.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EvalFailure {
    /// The failed instance.
    pub instance: InstanceId,
    /// Name of the instance's definition.
    pub definition: String,
    /// Rendered error.
    pub error: String,
}

/// Outcome of one evaluation pass.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct EvalReport {
    /// Instances whose programs ran, failed ones included.
    pub evaluated: u64,
    /// Per-instance failures. A failure stops that instance's remaining
    /// writes; siblings and descendants keep evaluating.
    pub failures: Vec<EvalFailure>,
}

impl EvalReport {
    /// Whether the pass finished without per-instance failures.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs compiled programs over an arena, parents before children.
///
/// Each level is evaluated in two phases: every instance's program runs
/// against a read-only arena and yields a pure write batch, then the
/// batches land one instance at a time. An instance's writes only ever
/// address its own children, so batches within a level never overlap and
/// phase one may run on the rayon pool without changing the result.
#[derive(Debug, Default)]
pub struct Evaluator {
    cache: ProgramCache,
}

impl Evaluator {
    /// Evaluator with an empty program cache.
    pub fn new() -> Evaluator {
        Evaluator::default()
    }

    /// The memoized program cache.
    pub fn cache(&self) -> &ProgramCache {
        &self.cache
    }

    /// Run one pass over the subtrees rooted at `roots`.
    #[tracing::instrument(skip(self, registry, arena, roots), fields(roots = roots.len()))]
    pub fn evaluate(
        &mut self,
        registry: &DefinitionRegistry,
        arena: &mut InstanceArena,
        roots: &[InstanceId],
        opts: EvalOpts,
    ) -> HoloformResult<EvalReport> {
        for id in roots {
            arena.get(*id)?;
        }

        let mut report = EvalReport::default();
        let mut level: Vec<InstanceId> = roots.to_vec();
        while !level.is_empty() {
            let mut jobs: Vec<(InstanceId, Arc<UpdateProgram>)> = Vec::with_capacity(level.len());
            for id in &level {
                let def = arena.get(*id)?.def();
                jobs.push((*id, self.cache.get_or_compile(registry, def)?));
            }

            let batches: Vec<(InstanceId, HoloformResult<Vec<ChildWrite>>)> = if opts.parallel {
                let shared: &InstanceArena = arena;
                jobs.par_iter()
                    .map(|(id, program)| (*id, run_one(shared, *id, program)))
                    .collect()
            } else {
                jobs.iter()
                    .map(|(id, program)| (*id, run_one(arena, *id, program)))
                    .collect()
            };

            for (id, outcome) in batches {
                report.evaluated += 1;
                match outcome {
                    Ok(batch) => apply_batch(registry, arena, id, &batch, &mut report),
                    Err(err) => push_failure(registry, arena, &mut report, id, &err),
                }
            }

            let mut next = Vec::new();
            for (id, program) in &jobs {
                let inst = arena.get(*id)?;
                for (part, _def) in program.descents() {
                    if let Some(child) = inst.children().get(part.index()) {
                        next.push(*child);
                    }
                }
            }
            level = next;
        }
        Ok(report)
    }
}

fn run_one(
    arena: &InstanceArena,
    id: InstanceId,
    program: &UpdateProgram,
) -> HoloformResult<Vec<ChildWrite>> {
    let inst = arena.get(id)?;
    program.run(inst.values())
}

/// Land one instance's batch; the first failing write stops the rest of
/// that batch and is recorded against the owning instance.
fn apply_batch(
    registry: &DefinitionRegistry,
    arena: &mut InstanceArena,
    id: InstanceId,
    batch: &[ChildWrite],
    report: &mut EvalReport,
) {
    for write in batch {
        let child = arena.get(id).and_then(|inst| {
            inst.children().get(write.part.index()).copied().ok_or_else(|| {
                HoloformError::evaluation(format!(
                    "part slot {:?} has no child instance",
                    write.part
                ))
            })
        });
        let landed =
            child.and_then(|child| arena.write(registry, child, write.property, write.value));
        if let Err(err) = landed {
            push_failure(registry, arena, report, id, &err);
            return;
        }
    }
}

fn push_failure(
    registry: &DefinitionRegistry,
    arena: &InstanceArena,
    report: &mut EvalReport,
    id: InstanceId,
    err: &HoloformError,
) {
    let definition = arena
        .get(id)
        .ok()
        .and_then(|inst| registry.name_of(inst.def()).ok())
        .unwrap_or("?")
        .to_string();
    report.failures.push(EvalFailure {
        instance: id,
        definition,
        error: err.to_string(),
    });
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
