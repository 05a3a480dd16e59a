//! Holoform is a declarative rigging and animation scheduling engine.
//!
//! Authors describe a visual entity once, as a *holon*: typed parameters, parts
//! (terminal primitives or nested holons), and bindings from the whole's
//! parameters to its parts' properties. The library turns that one declaration
//! into the two execution artifacts an external real-time renderer needs:
//!
//! 1. **Compose**: declare parameters, parts, bindings and states once per
//!    definition ([`DefinitionRegistry`], [`Composer`])
//! 2. **Compile**: `HolonDef -> UpdateProgram`, per-instance update steps in
//!    dependency order ([`ProgramCache`])
//! 3. **Evaluate**: run compiled programs over an [`InstanceArena`], one call
//!    per instance, with per-instance failure isolation ([`Evaluator`])
//! 4. **Schedule**: map behavior values onto absolute-time keyframe pairs for
//!    a [`KeyframeSink`] ([`Timeline`])
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **One definition, many instances**: definitions are immutable after
//!   composition and shared freely; instances carry all mutable state.
//! - **Referential transparency per instance**: a compiled program reads only
//!   its own instance's parameters and writes only that instance's children,
//!   so many clones of one definition evaluate independently.
//! - **Easing resolves once**: a transition is eased by the outermost layer
//!   that supplies a curve and never re-distorted by containing behaviors.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod param;

pub(crate) mod animation;
pub(crate) mod compile;
pub(crate) mod eval;
pub(crate) mod holon;
pub(crate) mod states;
pub(crate) mod timeline;

pub use crate::foundation::core::Fps;
pub use crate::foundation::error::{HoloformError, HoloformResult};
pub use crate::foundation::ids::{DefId, InstanceId, ParamId, PartIdx, StateId};

pub use crate::param::kind::{Color, ParamKind, RangePolicy, Value};
pub use crate::param::store::{ParamSpec, ParamStore};

pub use crate::holon::composer::Composer;
pub use crate::holon::definition::{
    BindingDecl, BindingMode, BindingSource, DefKind, HolonDef, PartDecl, PropertyRef, StateDecl,
    Transform,
};
pub use crate::holon::registry::{DefinitionRegistry, PrimitiveSpec};

pub use crate::compile::compiler::{ProgramCache, compile};
pub use crate::compile::fingerprint::DefFingerprint;
pub use crate::compile::program::{ChildWrite, RegId, UpdateOp, UpdateProgram};

pub use crate::eval::arena::{HolonInstance, InstanceArena};
pub use crate::eval::evaluator::{EvalFailure, EvalOpts, EvalReport, Evaluator};

pub use crate::animation::anim::{AnimTarget, Animation, Transition};
pub use crate::animation::ease::Ease;
pub use crate::animation::fluent::{Animate, ParamCursor};

pub use crate::timeline::scheduler::Timeline;
pub use crate::timeline::sink::{
    JsonLinesSink, KeyTarget, KeyframePair, KeyframeSink, KeyframeWrite, RecordingSink,
};

pub use crate::states::machine::{current_state, transition_to};
