//! Printer for VLX text documents.
//!
//! A structure reached more than once is printed in full at its first
//! occurrence and as `#uid` afterwards. `ID = #uid` lines are only written for
//! structures that are actually referenced again, unless
//! [`PrinterConfig::emit_unused_uids`] asks for all of them.

use std::collections::{HashMap, HashSet};

use super::parser::HEADER_MAGIC;
use crate::config::PrinterConfig;
use crate::document::{Document, List, Value, ValueData};
use crate::foundation::collections::StructureKey;
use crate::serialization::SERIALIZER_VERSION;

/// Lays out a linked document as text
pub struct Printer<'a> {
    document: &'a Document,
    config: &'a PrinterConfig,
    visits: HashMap<StructureKey, usize>,
    uids: HashMap<StructureKey, String>,
    printed: HashSet<StructureKey>,
    out: String,
    depth: usize,
}

impl<'a> Printer<'a> {
    /// Printer for `document`
    pub fn new(document: &'a Document, config: &'a PrinterConfig) -> Self {
        Self {
            document,
            config,
            visits: HashMap::new(),
            uids: HashMap::new(),
            printed: HashSet::new(),
            out: String::new(),
            depth: 0,
        }
    }

    /// Header plus the structure at `root` and everything it reaches
    pub fn print(mut self, root: StructureKey) -> String {
        self.count_references(root);
        self.assign_uids();

        self.out
            .push_str(&format!("{HEADER_MAGIC} version={SERIALIZER_VERSION} encoding=ascii\n\n"));
        self.write_structure(root);
        self.out.push('\n');
        self.out
    }

    /// How often each structure is reached from `root`
    fn count_references(&mut self, root: StructureKey) {
        let document = self.document;
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            let visits = self.visits.entry(key).or_insert(0);
            *visits += 1;
            if *visits > 1 {
                continue;
            }
            if let Some(structure) = document.structure(key) {
                for entry in structure.entries() {
                    collect_references(&entry.value, &mut stack);
                }
            }
        }
    }

    /// UIDs for every structure that will be printed as a reference
    fn assign_uids(&mut self) {
        let document = self.document;
        let mut taken: HashSet<String> = document
            .iter()
            .filter_map(|(_, structure)| structure.uid().map(str::to_string))
            .collect();
        let mut counter = 1usize;

        let mut keys: Vec<StructureKey> = self.visits.keys().copied().collect();
        keys.sort_unstable();
        for key in keys {
            let shared = self.visits.get(&key).is_some_and(|visits| *visits > 1);
            let Some(structure) = document.structure(key) else {
                continue;
            };
            match structure.uid() {
                Some(uid) if shared || self.config.emit_unused_uids => {
                    self.uids.insert(key, uid.to_string());
                }
                None if shared => {
                    let uid = loop {
                        let candidate = format!("#printer_id{counter}");
                        counter += 1;
                        if !taken.contains(&candidate) {
                            break candidate;
                        }
                    };
                    taken.insert(uid.clone());
                    self.uids.insert(key, uid);
                }
                _ => {}
            }
        }
    }

    fn indent(&mut self) {
        if self.config.indent_width == 0 {
            for _ in 0..self.depth {
                self.out.push('\t');
            }
        } else {
            let width = self.depth * self.config.indent_width;
            self.out.push_str(&" ".repeat(width));
        }
    }

    fn write_structure(&mut self, key: StructureKey) {
        if self.printed.contains(&key) {
            match self.uids.get(&key) {
                Some(uid) => {
                    let uid = uid.clone();
                    self.out.push_str(&uid);
                }
                None => self.out.push_str("NULL"),
            }
            return;
        }
        let document = self.document;
        let Some(structure) = document.structure(key) else {
            log::warn!("dangling structure reference printed as NULL");
            self.out.push_str("NULL");
            return;
        };
        self.printed.insert(key);

        self.out.push_str(structure.tag());
        self.out.push('\n');
        self.indent();
        self.out.push_str("{\n");
        self.depth += 1;

        if let Some(uid) = self.uids.get(&key) {
            let line = format!("ID = {uid}\n");
            self.indent();
            self.out.push_str(&line);
        }
        for entry in structure.entries() {
            self.indent();
            self.out.push_str(&entry.key);
            self.out.push_str(" = ");
            self.write_value(&entry.value);
            self.out.push('\n');
        }

        self.depth -= 1;
        self.indent();
        self.out.push('}');
    }

    fn write_tag(&mut self, tag: Option<&str>) {
        if let Some(tag) = tag {
            self.out.push_str(tag);
            self.out.push(' ');
        }
    }

    fn write_value(&mut self, value: &Value) {
        match value.data() {
            ValueData::Null => self.out.push_str("NULL"),
            ValueData::Bool(flag) => self.out.push_str(if *flag { "true" } else { "false" }),
            ValueData::Integer(number) => self.out.push_str(&number.to_string()),
            ValueData::Real(number) => self.out.push_str(&format_real(*number)),
            ValueData::String(text) => self.out.push_str(&quote(text)),
            ValueData::Identifier(name) | ValueData::Uid(name) => self.out.push_str(name),
            ValueData::RawtextBlock(block) => {
                self.write_tag(block.tag.as_deref());
                self.out.push_str("{<");
                self.out.push_str(&block.text);
                self.out.push_str(">}");
            }
            ValueData::ArrayInteger(array) => {
                self.write_tag(array.tag.as_deref());
                let items: Vec<String> = array.values.iter().map(i64::to_string).collect();
                self.write_array(&items);
            }
            ValueData::ArrayReal(array) => {
                self.write_tag(array.tag.as_deref());
                let items: Vec<String> = array.values.iter().map(|v| format_real(*v)).collect();
                self.write_array(&items);
            }
            ValueData::Structure(key) => self.write_structure(*key),
            ValueData::List(list) => self.write_list(list),
        }
    }

    fn write_array(&mut self, items: &[String]) {
        if items.is_empty() {
            self.out.push_str("( )");
        } else {
            self.out.push_str("( ");
            self.out.push_str(&items.join(" "));
            self.out.push_str(" )");
        }
    }

    fn write_list(&mut self, list: &List) {
        self.write_tag(list.tag.as_deref());
        let nested = list
            .values
            .iter()
            .any(|item| matches!(item.data(), ValueData::Structure(_) | ValueData::List(_)));

        if list.is_empty() {
            self.out.push_str("[ ]");
        } else if nested {
            self.out.push_str("[\n");
            self.depth += 1;
            for item in &list.values {
                self.indent();
                self.write_value(item);
                self.out.push('\n');
            }
            self.depth -= 1;
            self.indent();
            self.out.push(']');
        } else {
            self.out.push('[');
            for item in &list.values {
                self.out.push(' ');
                self.write_value(item);
            }
            self.out.push_str(" ]");
        }
    }
}

/// Structure keys directly referenced by `value`
fn collect_references(value: &Value, out: &mut Vec<StructureKey>) {
    match value.data() {
        ValueData::Structure(key) => out.push(*key),
        ValueData::List(list) => {
            for item in &list.values {
                collect_references(item, out);
            }
        }
        _ => {}
    }
}

/// Real that reads back as a real: always with a `.` or an exponent
fn format_real(number: f64) -> String {
    let text = format!("{number:?}");
    if text.contains(['.', 'e', 'E']) || !number.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Print `document` starting at `root`
pub fn print(document: &Document, root: StructureKey, config: &PrinterConfig) -> String {
    Printer::new(document, config).print(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Structure;
    use crate::syntax::{link, parse};

    fn reparse(text: &str) -> (Document, StructureKey) {
        let mut parsed = parse(text).unwrap();
        link(&mut parsed.document).unwrap();
        (parsed.document, parsed.root)
    }

    #[test]
    fn test_unshared_uid_is_dropped() {
        let mut document = Document::new();
        let child = document.insert(Structure::new("<vl::Transform>").with_uid("#transform_id2"));
        let mut root = Structure::new("<vl::Transform>").with_uid("#transform_id1");
        let mut children = List::new();
        children.push(Value::structure(child));
        root.push("Children", Value::list(children));
        let root = document.insert(root);

        let text = print(&document, root, &PrinterConfig::default());
        assert!(text.starts_with("VLX version=100 encoding=ascii"));
        assert!(!text.contains("ID ="));

        let config = PrinterConfig::new().with_unused_uids(true);
        let text = print(&document, root, &config);
        assert!(text.contains("ID = #transform_id1"));
        assert!(text.contains("ID = #transform_id2"));
    }

    #[test]
    fn test_cycle_prints_reference() {
        let mut document = Document::new();
        let root = document.insert(Structure::new("<vl::Transform>").with_uid("#transform_id1"));
        let mut children = List::new();
        children.push(Value::structure(root));
        document.structure_mut(root).unwrap().push("Children", Value::list(children));

        let text = print(&document, root, &PrinterConfig::default());
        assert!(text.contains("ID = #transform_id1"));
        assert_eq!(text.matches("#transform_id1").count(), 2);

        let (document, root) = reparse(&text);
        let children = document.structure(root).unwrap().get("Children").and_then(Value::as_list).unwrap();
        assert_eq!(children.values[0].as_structure(), Some(root));
    }

    #[test]
    fn test_values_read_back() {
        let source = r#"VLX version=100 encoding=ascii
<vl::Sample>
{
    Name = "say \"hi\"\n"
    Whole = 2.0
    Count = -3
    Flag = false
    Empty = NULL
    Mode = PT_LINES
    Reals = <vl::ArrayFloat2> ( 1.0 -2.5 )
    Ints = ( 1 2 )
    Text = {<line one
line two>}
}
"#;
        let (document, root) = reparse(source);
        let printed = print(&document, root, &PrinterConfig::new().with_indent_width(2));
        let (again, again_root) = reparse(&printed);

        let a = document.structure(root).unwrap();
        let b = again.structure(again_root).unwrap();
        assert_eq!(a.len(), b.len());
        for (left, right) in a.entries().iter().zip(b.entries()) {
            assert_eq!(left.key, right.key);
            assert_eq!(left.value.data(), right.value.data());
        }
        assert!(printed.contains("\n  Whole = 2.0\n"));
    }

    #[test]
    fn test_format_real_keeps_point() {
        assert_eq!(format_real(2.0), "2.0");
        assert_eq!(format_real(-0.5), "-0.5");
        assert_eq!(format_real(1e20), "1e20");
    }
}
