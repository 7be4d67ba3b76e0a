use linked_hash_map::LinkedHashMap;
use yaml_rust::yaml::Hash;
use yaml_rust::Yaml;

/// A value in the translation dictionary
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Translated text
    Leaf(String),
    /// Nested namespace
    Node(Dictionary),
    /// Any other YAML value (numbers, booleans, lists, null), carried
    /// through untouched
    Other(Yaml),
}

impl Value {
    pub fn from_yaml(yaml: Yaml) -> Self {
        match yaml {
            Yaml::String(text) => Value::Leaf(text),
            Yaml::Hash(hash) => Value::Node(Dictionary::from_hash(hash)),
            other => Value::Other(other),
        }
    }

    pub fn into_yaml(self) -> Yaml {
        match self {
            Value::Leaf(text) => Yaml::String(text),
            Value::Node(dict) => Yaml::Hash(dict.into_hash()),
            Value::Other(yaml) => yaml,
        }
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Value::Leaf(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Dictionary> {
        match self {
            Value::Node(dict) => Some(dict),
            _ => None,
        }
    }

    /// Short description used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Leaf(_) => "string",
            Value::Node(_) => "mapping",
            Value::Other(yaml) => yaml_kind(yaml),
        }
    }
}

pub(crate) fn yaml_kind(yaml: &Yaml) -> &'static str {
    match yaml {
        Yaml::Real(_) => "float",
        Yaml::Integer(_) => "integer",
        Yaml::String(_) => "string",
        Yaml::Boolean(_) => "boolean",
        Yaml::Array(_) => "list",
        Yaml::Hash(_) => "mapping",
        Yaml::Alias(_) => "alias",
        Yaml::Null => "null",
        Yaml::BadValue => "invalid value",
    }
}

/// Insertion-ordered mapping. Keys stay YAML values so that non-string keys
/// in hand-written files survive a rewrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: LinkedHashMap<Yaml, Value>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_hash(hash: Hash) -> Self {
        let entries = hash
            .into_iter()
            .map(|(key, value)| (key, Value::from_yaml(value)))
            .collect();
        Self { entries }
    }

    pub fn into_hash(self) -> Hash {
        self.entries
            .into_iter()
            .map(|(key, value)| (key, value.into_yaml()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&string_key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&string_key(key))
    }

    /// Insert or replace; a replaced key keeps its position
    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.entries.insert(string_key(key), value)
    }

    /// Descend into `key`, creating an empty node when absent.
    ///
    /// Returns the existing value instead when it is not a node.
    pub fn node_mut(&mut self, key: &str) -> Result<&mut Dictionary, &Value> {
        let value = self
            .entries
            .entry(string_key(key))
            .or_insert_with(|| Value::Node(Dictionary::new()));
        match value {
            Value::Node(dict) => Ok(dict),
            other => Err(&*other),
        }
    }

    /// Follow a dotted path of nodes down to a value
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for part in parents {
            current = current.get(part)?.as_node()?;
        }
        current.get(last)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in document order; non-string keys are rendered as debug text
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .keys()
            .map(|key| match key.as_str() {
                Some(s) => s.to_string(),
                None => format!("{:?}", key),
            })
            .collect()
    }
}

fn string_key(key: &str) -> Yaml {
    Yaml::String(key.to_string())
}
