use xxhash_rust::xxh3::Xxh3;

use crate::foundation::error::HoloformResult;
use crate::foundation::ids::DefId;
use crate::holon::definition::{BindingSource, DefKind, HolonDef, Transform};
use crate::holon::registry::DefinitionRegistry;
use crate::param::kind::{ParamKind, Value};

const XXH3_SEED: u64 = 0x6c3f0a97d25b41e8;

/// Stable 128-bit content fingerprint of one definition.
///
/// Covers the declaration in full: name, kind, parameter specs, part
/// structure (parts by definition *name*, so structurally identical
/// registries fingerprint alike), bindings and states. The one opacity is
/// [`Transform::Map`]: closures hash as a bare tag, so two definitions
/// differing only in a map body share a fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefFingerprint {
    pub(crate) hi: u64,
    pub(crate) lo: u64,
}

impl DefFingerprint {
    /// Fingerprint `def` as declared in `registry`.
    pub fn of(registry: &DefinitionRegistry, def: DefId) -> HoloformResult<DefFingerprint> {
        let d = registry.get(def)?;
        let mut h = StableHasher::new();
        write_def(&mut h, registry, d)?;
        Ok(h.finish())
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u16(&mut self, v: u16) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> DefFingerprint {
        let v = self.inner.digest128();
        DefFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_def(
    h: &mut StableHasher,
    registry: &DefinitionRegistry,
    d: &HolonDef,
) -> HoloformResult<()> {
    h.write_str(d.name());
    h.write_u8(match d.kind() {
        DefKind::Primitive => 0,
        DefKind::Composed => 1,
    });

    h.write_u32(d.params().len() as u32);
    for p in d.params() {
        h.write_str(&p.name);
        h.write_u8(kind_tag(p.kind));
        write_value(h, p.default);
        match &p.group {
            Some(g) => {
                h.write_u8(1);
                h.write_str(g);
            }
            None => h.write_u8(0),
        }
    }

    h.write_u32(d.parts().len() as u32);
    for part in d.parts() {
        h.write_str(&part.name);
        h.write_str(registry.name_of(part.def)?);
    }

    h.write_u32(d.bindings().len() as u32);
    for b in d.bindings() {
        match &b.source {
            BindingSource::Param(name) => {
                h.write_u8(0);
                h.write_str(name);
            }
            BindingSource::Property(prop) => {
                h.write_u8(1);
                h.write_str(&prop.part);
                h.write_str(&prop.property);
            }
        }
        h.write_str(&b.target.part);
        h.write_str(&b.target.property);
        h.write_u8(b.transform.tag());
        match &b.transform {
            Transform::Scale(k) | Transform::Offset(k) => h.write_f64(*k),
            Transform::Identity | Transform::Negate | Transform::Map(_) => {}
        }
    }

    h.write_u32(d.states().len() as u32);
    for s in d.states() {
        h.write_str(&s.name);
        h.write_u32(s.values.len() as u32);
        for (param, value) in &s.values {
            h.write_u16(param.0);
            write_value(h, *value);
        }
    }
    Ok(())
}

fn kind_tag(kind: ParamKind) -> u8 {
    match kind {
        ParamKind::Length => 0,
        ParamKind::Angle => 1,
        ParamKind::Bipolar => 2,
        ParamKind::Completion => 3,
        ParamKind::Color => 4,
        ParamKind::Integer => 5,
        ParamKind::Bool => 6,
    }
}

fn write_value(h: &mut StableHasher, value: Value) {
    match value {
        Value::Scalar(v) => {
            h.write_u8(0);
            h.write_f64(v);
        }
        Value::Int(v) => {
            h.write_u8(1);
            h.write_u64(v as u64);
        }
        Value::Bool(v) => {
            h.write_u8(2);
            h.write_bool(v);
        }
        Value::Color(c) => {
            h.write_u8(3);
            h.write_f64(c.r);
            h.write_f64(c.g);
            h.write_f64(c.b);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
