use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{SpecError, SpecResult};

/// One generation request: where to write and what to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    pub out_dir: String,
    pub lang: Lang,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lang {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub php: Option<PhpLang>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<TsLang>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhpLang {
    pub namespace: String,
    pub clazz: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsLang {
    pub clazz: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
}

/// Membership of a field in a named serialization group, with the key the
/// field is stored under in that group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub member: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            comment: None,
            groups: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = if comment.is_empty() { None } else { Some(comment) };
        self
    }

    pub fn with_group(mut self, name: impl Into<String>, member: impl Into<String>) -> Self {
        self.groups.push(Group::new(name, member));
        self
    }
}

impl Group {
    pub fn new(name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            member: member.into(),
        }
    }
}

impl Spec {
    pub fn from_json_str(source: &str) -> SpecResult<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    pub fn from_file(path: impl AsRef<Path>) -> SpecResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let spec = Self::from_json_str(&source)?;
        debug!(path = %path.display(), fields = spec.fields.len(), "loaded spec");
        Ok(spec)
    }

    /// Check required keys, then deserialize.
    pub fn from_value(value: Value) -> SpecResult<Self> {
        check_required_keys(&value)?;
        let mut spec: Spec = serde_json::from_value(value)?;
        for field in &mut spec.fields {
            if field.comment.as_deref() == Some("") {
                field.comment = None;
            }
        }
        Ok(spec)
    }

    pub fn php(&self) -> SpecResult<&PhpLang> {
        self.lang
            .php
            .as_ref()
            .ok_or_else(|| SpecError::missing_language("php"))
    }

    pub fn ts(&self) -> SpecResult<&TsLang> {
        self.lang
            .ts
            .as_ref()
            .ok_or_else(|| SpecError::missing_language("ts"))
    }
}

fn check_required_keys(value: &Value) -> SpecResult<()> {
    require(value, "", &["outDir", "lang", "fields"])?;

    if let Some(php) = value["lang"].get("php") {
        require(php, "lang.php", &["namespace", "clazz"])?;
    }
    if let Some(ts) = value["lang"].get("ts") {
        require(ts, "lang.ts", &["clazz"])?;
    }

    for (i, field) in value["fields"].as_array().into_iter().flatten().enumerate() {
        let path = format!("fields[{}]", i);
        require(field, &path, &["name", "type"])?;

        for (j, group) in field
            .get("groups")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .enumerate()
        {
            require(group, &format!("{}.groups[{}]", path, j), &["name", "member"])?;
        }
    }

    Ok(())
}

fn require(object: &Value, path: &str, keys: &[&str]) -> SpecResult<()> {
    for key in keys {
        if object.get(key).is_none() {
            let key = if path.is_empty() {
                key.to_string()
            } else {
                format!("{}.{}", path, key)
            };
            return Err(SpecError::missing_key(key));
        }
    }
    Ok(())
}
