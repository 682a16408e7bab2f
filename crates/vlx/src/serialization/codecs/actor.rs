//! Actors and their depth sort callbacks

use crate::document::Value;
use crate::foundation::collections::{ObjectHandle, StructureKey};
use crate::scene::{Actor, DepthSortCallback, Effect, Geometry, LodEvaluator, Transform, Uniform};
use crate::serialization::error::Result;
use crate::serialization::fields::{self, Entries};
use crate::serialization::registry::Codec;
use crate::serialization::session::{ExportSession, ImportSession};

/// `vl::Actor`
#[derive(Debug, Default)]
pub struct ActorCodec;

/// `vl::DepthSortCallback`
#[derive(Debug, Default)]
pub struct DepthSortCallbackCodec;

impl Codec for ActorCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, Actor::default());
        let mut actor = Actor::default();

        if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
            actor.object_name = name;
        }
        if let Some(mask) = s.read(structure, "EnableMask", fields::uint32)? {
            actor.enable_mask = mask;
        }
        if let Some(block) = s.read(structure, "RenderBlock", fields::int32)? {
            actor.render_block = block;
        }
        if let Some(rank) = s.read(structure, "RenderRank", fields::int32)? {
            actor.render_rank = rank;
        }
        if let Some(occludee) = s.read(structure, "IsOccludee", fields::boolean)? {
            actor.is_occludee = occludee;
        }
        if let Some(lods) = s.read_refs::<Geometry>(structure, "Lods")? {
            actor.lods = lods;
        }
        actor.effect = s.read_ref::<Effect>(structure, "Effect")?;
        actor.transform = s.read_ref::<Transform>(structure, "Transform")?;
        if let Some(uniforms) = s.read_refs::<Uniform>(structure, "Uniforms")? {
            actor.uniforms = uniforms;
        }
        actor.lod_evaluator = s.read_ref::<LodEvaluator>(structure, "LODEvaluator")?;
        if let Some(callbacks) = s.read_refs::<DepthSortCallback>(structure, "ActorEventCallbacks")? {
            actor.event_callbacks = callbacks;
        }

        s.finalize(handle, actor);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let actor = s.object::<Actor>(handle)?;
        let key = s.register(handle, "vl::Actor", "actor_");

        let mut entries = Entries::new();
        entries
            .object_name(&actor.object_name, "vl::Actor")
            .push("EnableMask", Value::integer(i64::from(actor.enable_mask)))
            .push("RenderBlock", Value::integer(i64::from(actor.render_block)))
            .push("RenderRank", Value::integer(i64::from(actor.render_rank)))
            .push("IsOccludee", Value::boolean(actor.is_occludee));
        entries.push("Lods", s.export_list(&actor.lods)?);
        entries.push_opt("Effect", s.export_field(actor.effect)?);
        entries.push_opt("Transform", s.export_field(actor.transform)?);
        if !actor.uniforms.is_empty() {
            entries.push("Uniforms", s.export_list(&actor.uniforms)?);
        }
        entries.push_opt("LODEvaluator", s.export_field(actor.lod_evaluator)?);
        if !actor.event_callbacks.is_empty() {
            entries.push("ActorEventCallbacks", s.export_list(&actor.event_callbacks)?);
        }

        s.fill(key, entries)
    }
}

impl Codec for DepthSortCallbackCodec {
    fn decode(&self, s: &mut ImportSession<'_>, key: StructureKey) -> Result<ObjectHandle> {
        let structure = s.structure(key)?;
        let handle = s.register(key, DepthSortCallback::default());
        let mut callback = DepthSortCallback::default();

        if let Some(name) = s.read(structure, "ObjectName", fields::string)? {
            callback.object_name = name;
        }
        if let Some(enabled) = s.read(structure, "Enabled", fields::boolean)? {
            callback.enabled = enabled;
        }
        if let Some(mode) = s.read(structure, "SortMode", fields::enumeration)? {
            callback.sort_mode = mode;
        }

        s.finalize(handle, callback);
        Ok(handle)
    }

    fn encode(&self, s: &mut ExportSession<'_>, handle: ObjectHandle) -> Result<StructureKey> {
        let callback = s.object::<DepthSortCallback>(handle)?;
        let key = s.register(handle, "vl::DepthSortCallback", "depthsortcallback_");

        let mut entries = Entries::new();
        entries
            .object_name(&callback.object_name, "vl::DepthSortCallback")
            .push("Enabled", Value::boolean(callback.enabled))
            .push("SortMode", fields::enum_value(callback.sort_mode));

        s.fill(key, entries)
    }
}
