//! UID linking
//!
//! Replaces every `#uid` reference in a parsed document by the structure that
//! declares `ID = #uid`, so shared and cyclic references become shared keys.

use std::collections::HashMap;

use crate::document::{Document, Value, ValueData};
use crate::foundation::collections::StructureKey;
use crate::serialization::{Result, VlxError};

/// Resolve every UID reference of `document` in place
pub fn link(document: &mut Document) -> Result<()> {
    let mut uids: HashMap<String, StructureKey> = HashMap::new();
    for (key, structure) in document.iter() {
        if let Some(uid) = structure.uid() {
            if uids.insert(uid.to_string(), key).is_some() {
                return Err(VlxError::Link {
                    uid: uid.to_string(),
                    message: "declared more than once".to_string(),
                    line: structure.line_number(),
                });
            }
        }
    }

    let keys: Vec<StructureKey> = document.keys().collect();
    let mut resolved = 0usize;
    for key in keys {
        if let Some(structure) = document.structure_mut(key) {
            for entry in structure.entries_mut() {
                resolved += link_value(&mut entry.value, &uids)?;
            }
        }
    }

    log::debug!("linked {resolved} references to {} UIDs", uids.len());
    Ok(())
}

fn link_value(value: &mut Value, uids: &HashMap<String, StructureKey>) -> Result<usize> {
    let line = value.line_number();
    match value.data_mut() {
        ValueData::Uid(uid) => {
            let Some(key) = uids.get(uid.as_str()) else {
                return Err(VlxError::Link {
                    uid: uid.clone(),
                    message: "no structure declares it".to_string(),
                    line,
                });
            };
            *value.data_mut() = ValueData::Structure(*key);
            Ok(1)
        }
        ValueData::List(list) => {
            let mut resolved = 0;
            for item in &mut list.values {
                resolved += link_value(item, uids)?;
            }
            Ok(resolved)
        }
        _ => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    #[test]
    fn test_references_become_shared_keys() {
        let mut parsed = parse(
            "VLX version=100 encoding=ascii
            <vl::Transform>
            {
                ID = #transform_id1
                Children = [ #transform_id1 <vl::Transform> { ID = #transform_id2 } #transform_id2 ]
            }",
        )
        .unwrap();
        link(&mut parsed.document).unwrap();

        let root = parsed.document.structure(parsed.root).unwrap();
        let children = root.get("Children").and_then(Value::as_list).unwrap();
        assert_eq!(children.values[0].as_structure(), Some(parsed.root));
        assert_eq!(children.values[1].as_structure(), children.values[2].as_structure());
        assert_ne!(children.values[1].as_structure(), Some(parsed.root));
    }

    #[test]
    fn test_unknown_uid_is_named() {
        let mut parsed = parse("VLX version=100 encoding=ascii\n<vl::Actor> { Effect = #effect_id9 }").unwrap();
        match link(&mut parsed.document) {
            Err(VlxError::Link { uid, line, .. }) => {
                assert_eq!(uid, "#effect_id9");
                assert_eq!(line, 2);
            }
            other => panic!("expected a link error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_uid_is_rejected() {
        let mut parsed = parse(
            "VLX version=100 encoding=ascii\n<vl::A> { ID = #a List = [ <vl::B> { ID = #a } ] }",
        )
        .unwrap();
        assert!(matches!(link(&mut parsed.document), Err(VlxError::Link { .. })));
    }
}
