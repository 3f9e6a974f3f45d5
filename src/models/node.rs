use serde_yaml::{Mapping, Value};

/// Structured result of parsing a legacy markup blob.
///
/// A node is either an ordered mapping of normalized tag names to child
/// nodes, a plain cleaned-text leaf, or one of the two bracket-dialect
/// shapes (a section listing, or a full template with an optional usage
/// preamble).
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    /// Ordered tag-name → child mapping. Keys are unique (last write wins).
    Map(Vec<(String, MarkupNode)>),
    /// Cleaned scalar text.
    Leaf(String),
    /// Bracketed `[Label: ...]` sections with the cleaned original text.
    Sections {
        sections: Vec<String>,
        raw_format: String,
    },
    /// Bracketed-section template found inside a tag body.
    Template {
        sections: Vec<String>,
        usage: Option<String>,
        template: String,
    },
}

impl MarkupNode {
    /// Leaf wrapped in a single-key `content` mapping, the shape used when
    /// a blob carries no markup at all.
    pub fn content_leaf(text: String) -> Self {
        MarkupNode::Map(vec![("content".to_string(), MarkupNode::Leaf(text))])
    }

    /// Insert into a `Map` node, overwriting an existing key in place so the
    /// original position is kept. Duplicate tags at one level overwrite.
    pub fn upsert(entries: &mut Vec<(String, MarkupNode)>, key: String, node: MarkupNode) {
        if let Some(existing) = entries.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = node;
        } else {
            entries.push((key, node));
        }
    }

    /// Convert to a `serde_yaml::Value`, preserving key order.
    pub fn to_value(&self) -> Value {
        match self {
            MarkupNode::Map(entries) => {
                let mut map = Mapping::new();
                for (key, node) in entries {
                    map.insert(Value::String(key.clone()), node.to_value());
                }
                Value::Mapping(map)
            }
            MarkupNode::Leaf(text) => Value::String(text.clone()),
            MarkupNode::Sections {
                sections,
                raw_format,
            } => {
                let mut map = Mapping::new();
                map.insert(
                    Value::String("sections".to_string()),
                    Value::Sequence(sections.iter().cloned().map(Value::String).collect()),
                );
                map.insert(
                    Value::String("raw_format".to_string()),
                    Value::String(raw_format.clone()),
                );
                Value::Mapping(map)
            }
            MarkupNode::Template {
                sections,
                usage,
                template,
            } => {
                let mut map = Mapping::new();
                map.insert(
                    Value::String("format".to_string()),
                    Value::String("bracketed_sections".to_string()),
                );
                map.insert(
                    Value::String("sections".to_string()),
                    Value::Sequence(sections.iter().cloned().map(Value::String).collect()),
                );
                if let Some(usage) = usage {
                    map.insert(
                        Value::String("usage".to_string()),
                        Value::String(usage.clone()),
                    );
                }
                map.insert(
                    Value::String("template".to_string()),
                    Value::String(template.clone()),
                );
                Value::Mapping(map)
            }
        }
    }

    /// Look up a child node by key (only meaningful on `Map` nodes).
    pub fn get(&self, key: &str) -> Option<&MarkupNode> {
        match self {
            MarkupNode::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, n)| n),
            _ => None,
        }
    }

    /// Leaf text, if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            MarkupNode::Leaf(text) => Some(text),
            _ => None,
        }
    }
}
