//! Effects, shader passes and LOD evaluators

use super::type_name_of;
use crate::document::{List, Value, ValueData, ValueKind};
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::enums::EnableFlag;
use crate::scene::{Effect, LodEvaluator, LodMetric, RenderState, RenderStateSlot, Shader, SymbolicEnum, Uniform};
use crate::serialization::error::{Result, VlxError};
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::Effect`
#[derive(Debug, Default)]
pub struct EffectCodec;

/// `vl::Shader`
#[derive(Debug, Default)]
pub struct ShaderCodec;

/// `vl::DistanceLODEvaluator` and `vl::PixelLODEvaluator`
#[derive(Debug, Default)]
pub struct LodEvaluatorCodec;

const SHADER_PASSES_TAG: &str = "<vl::ShaderPasses>";

impl Codec for EffectCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, Effect::default());
        let mut effect = Effect::default();

        if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
            effect.object_name = name;
        }
        if let Some(rank) = s.read(structure, "RenderRank", fields::int32)? {
            effect.render_rank = rank;
        }
        if let Some(mask) = s.read(structure, "EnableMask", fields::uint32)? {
            effect.enable_mask = mask;
        }
        if let Some(lod) = s.read(structure, "ActiveLod", fields::int32)? {
            effect.active_lod = lod;
        }
        if let Some(value) = structure.get("Lods") {
            if let Some(lods) = s.check(fields::list("Lods", value))? {
                for passes in lods.iter() {
                    if let Some(shaders) = s.import_list::<Shader>("Lods", passes)? {
                        effect.lods.push(shaders);
                    }
                }
            }
        }
        effect.lod_evaluator = s.read_ref::<LodEvaluator>(structure, "LODEvaluator")?;

        s.finalize(handle, effect);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let effect = s.object::<Effect>(handle)?;
        let key = s.register(handle, "vl::Effect", "effect_");

        let mut entries = Entries::new();
        entries
            .object_name(&effect.object_name, "vl::Effect")
            .push("RenderRank", Value::integer(i64::from(effect.render_rank)))
            .push("EnableMask", Value::integer(i64::from(effect.enable_mask)))
            .push("ActiveLod", Value::integer(i64::from(effect.active_lod)));

        let mut lods = List::new();
        for shaders in &effect.lods {
            let mut passes = List::tagged(SHADER_PASSES_TAG);
            for shader in shaders {
                if let Some(value) = s.export_field(Some(*shader))? {
                    passes.push(value);
                }
            }
            lods.push(Value::list(passes));
        }
        entries.push("Lods", Value::list(lods));
        entries.push_opt("LODEvaluator", s.export_field(effect.lod_evaluator)?);

        s.fill(key, entries)
    }
}

impl ShaderCodec {
    /// Render states with an optional index before each one
    fn decode_render_states(s: &mut ImportSession<'_>, value: &Value) -> Result<Vec<RenderStateSlot>> {
        let mut slots = Vec::new();
        let Some(list) = s.check(fields::list("RenderStates", value))? else {
            return Ok(slots);
        };

        let mut index = None;
        for item in list.iter() {
            match item.data() {
                ValueData::Integer(_) => index = s.check(fields::int32("RenderStates", item))?,
                ValueData::Structure(_) => {
                    let slot_index = index.take();
                    if let Some(state) = s.import_field::<RenderState>("RenderStates", item)? {
                        slots.push(RenderStateSlot { state, index: slot_index });
                    }
                }
                _ => {
                    index = None;
                    s.report(fields::kind_mismatch("RenderStates", ValueKind::Structure, item))?;
                }
            }
        }
        Ok(slots)
    }

    fn decode_enables(s: &mut ImportSession<'_>, value: &Value) -> Result<Vec<EnableFlag>> {
        let mut enables = Vec::new();
        if let Some(list) = s.check(fields::list("Enables", value))? {
            for item in list.iter() {
                if let Some(flag) = s.check(fields::required_enumeration::<EnableFlag>("Enables", item))? {
                    enables.push(flag);
                }
            }
        }
        Ok(enables)
    }
}

impl Codec for ShaderCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, Shader::default());
        let mut shader = Shader::default();

        if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
            shader.object_name = name;
        }
        if let Some(value) = structure.get("RenderStates") {
            shader.render_states = Self::decode_render_states(s, value)?;
        }
        if let Some(value) = structure.get("Enables") {
            shader.enables = Self::decode_enables(s, value)?;
        }
        if let Some(uniforms) = s.read_refs::<Uniform>(structure, "Uniforms")? {
            shader.uniforms = uniforms;
        }

        s.finalize(handle, shader);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let shader = s.object::<Shader>(handle)?;
        let key = s.register(handle, "vl::Shader", "shader_");

        let mut render_states = List::new();
        for slot in &shader.render_states {
            if let Some(value) = s.export_field(Some(slot.state))? {
                if let Some(index) = slot.index {
                    render_states.push(Value::integer(i64::from(index)));
                }
                render_states.push(value);
            }
        }
        let mut enables = List::new();
        for flag in &shader.enables {
            enables.push(Value::identifier(flag.as_str()));
        }

        let mut entries = Entries::new();
        entries
            .object_name(&shader.object_name, "vl::Shader")
            .push("RenderStates", Value::list(render_states))
            .push("Enables", Value::list(enables));
        entries.push("Uniforms", s.export_list(&shader.uniforms)?);

        s.fill(key, entries)
    }
}

impl Codec for LodEvaluatorCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let metric = match type_name_of(structure.tag()) {
            "vl::DistanceLODEvaluator" => LodMetric::Distance,
            "vl::PixelLODEvaluator" => LodMetric::Pixel,
            _ => {
                return Err(VlxError::UnknownTag {
                    tag: structure.tag().to_string(),
                    line: structure.line_number(),
                })
            }
        };
        let mut evaluator = LodEvaluator::new(metric);
        let handle = s.register(key, evaluator.clone());

        if let Some(ranges) = s.read(structure, evaluator.range_key(), fields::reals32)? {
            evaluator.ranges = ranges;
        }

        s.finalize(handle, evaluator);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let evaluator = s.object::<LodEvaluator>(handle)?;
        let key = s.register(handle, evaluator.type_name(), "lodevaluator_");

        let mut entries = Entries::new();
        entries.push(evaluator.range_key(), fields::reals_value(&evaluator.ranges));

        s.fill(key, entries)
    }
}
