use crate::error::{ExtractError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use yaml_rust::yaml::Hash;
use yaml_rust::{Yaml, YamlEmitter, YamlLoader};

use super::merge::SkipReason;
use super::value::{yaml_kind, Dictionary, Value};

/// The YAML dictionary document on disk
#[derive(Debug, Clone)]
pub struct DictionaryStore {
    path: PathBuf,
}

impl DictionaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory the document lives in
    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Read the document.
    ///
    /// A missing file, an empty file and a bare `~` all load as an empty
    /// dictionary. Anything that cannot be rewritten without losing content
    /// is refused with a `SkipReason`.
    pub fn load(&self) -> std::result::Result<Dictionary, SkipReason> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Dictionary::new()),
            Err(e) => {
                return Err(SkipReason::Unreadable {
                    file: self.path.clone(),
                    reason: e.to_string(),
                })
            }
        };

        let mut docs = YamlLoader::load_from_str(&content).map_err(|e| SkipReason::Parse {
            file: self.path.clone(),
            reason: e.to_string(),
        })?;

        match docs.len() {
            0 => Ok(Dictionary::new()),
            1 => match docs.remove(0) {
                Yaml::Null => Ok(Dictionary::new()),
                Yaml::Hash(hash) => Ok(Dictionary::from_hash(hash)),
                other => Err(SkipReason::NonMappingRoot {
                    file: self.path.clone(),
                    kind: yaml_kind(&other),
                }),
            },
            count => Err(SkipReason::MultipleDocuments {
                file: self.path.clone(),
                count,
            }),
        }
    }

    /// Write the whole document back in block style with 2-space indentation
    pub fn save(&self, dict: Dictionary) -> Result<()> {
        let rendered = render(dict).map_err(|reason| ExtractError::yaml_emit_error(&self.path, reason))?;
        fs::write(&self.path, rendered)?;
        Ok(())
    }
}

/// Serialize a dictionary as a YAML document.
///
/// The emitter leaves some strings unquoted that the loader reads back as
/// another type (`0o17` becomes an integer). Those strings are written
/// double-quoted, and the output is reloaded and compared before it is
/// returned.
pub fn render(dict: Dictionary) -> std::result::Result<String, String> {
    let doc = Value::Node(dict).into_yaml();

    let mut quoted = Vec::new();
    let masked = mask_ambiguous(doc.clone(), &mut quoted)?;
    let mut out = emit(&masked)?;
    for (token, text) in &quoted {
        let literal = serde_json::to_string(text).map_err(|e| e.to_string())?;
        out = out.replace(token.as_str(), &literal);
    }
    out.push('\n');

    let reloaded = YamlLoader::load_from_str(&out).map_err(|e| e.to_string())?;
    if reloaded.len() != 1 || reloaded[0] != doc {
        return Err("rendered document does not read back as written".to_string());
    }
    Ok(out)
}

fn emit(doc: &Yaml) -> std::result::Result<String, String> {
    let mut out = String::new();
    {
        let mut emitter = YamlEmitter::new(&mut out);
        emitter.dump(doc).map_err(|e| format!("{:?}", e))?;
    }
    Ok(out)
}

/// Swap every string the emitter would leave ambiguous for a plain token
fn mask_ambiguous(
    yaml: Yaml,
    quoted: &mut Vec<(String, String)>,
) -> std::result::Result<Yaml, String> {
    match yaml {
        Yaml::String(text) => {
            if reads_back(&text)? {
                Ok(Yaml::String(text))
            } else {
                let token = format!("i18n_extract_quoted_{}_end", quoted.len());
                quoted.push((token.clone(), text));
                Ok(Yaml::String(token))
            }
        }
        Yaml::Array(items) => items
            .into_iter()
            .map(|item| mask_ambiguous(item, quoted))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Yaml::Array),
        Yaml::Hash(hash) => {
            let mut masked = Hash::new();
            for (key, value) in hash {
                let key = mask_ambiguous(key, quoted)?;
                let value = mask_ambiguous(value, quoted)?;
                masked.insert(key, value);
            }
            Ok(Yaml::Hash(masked))
        }
        other => Ok(other),
    }
}

fn reads_back(text: &str) -> std::result::Result<bool, String> {
    let scalar = Yaml::String(text.to_string());
    let out = emit(&scalar)?;
    let docs = YamlLoader::load_from_str(&out).map_err(|e| e.to_string())?;
    Ok(docs.len() == 1 && docs[0] == scalar)
}
