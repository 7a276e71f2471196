use anyhow::Context as _;
use fsopts::{DelegatingOptionsBuilder, FileSystemOptions};

use crate::TypeCatalog;

/// A named list of options.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

/// A single option of a profile.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OptionEntry {
    pub scheme: String,
    pub option: String,
    pub value: EntryValue,
}

impl OptionEntry {
    pub fn new(scheme: impl Into<String>, option: impl Into<String>, value: EntryValue) -> Self {
        Self {
            scheme: scheme.into(),
            option: option.into(),
            value,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum EntryValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Class(ClassRef),
}

impl From<&str> for EntryValue {
    fn from(value: &str) -> Self {
        EntryValue::Scalar(Scalar::Text(value.to_string()))
    }
}

/// Reference to a type registered in a [`TypeCatalog`].
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClassRef {
    pub class: String,
}

/// A plain value. Rendered to text before it is handed to the dispatcher,
/// which converts it to the parameter type of the option.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl Scalar {
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Bool(v) => v.to_string(),
            Scalar::Int(v) => v.to_string(),
            Scalar::UInt(v) => v.to_string(),
            Scalar::Float(v) => v.to_string(),
            Scalar::Text(v) => v.clone(),
        }
    }
}

impl ProfileConfig {
    /// Apply all options in order.
    ///
    /// Stops at the first failing entry. Entries before it stay applied.
    /// The returned error wraps the [`fsopts::ConfigError`] of the failed
    /// entry, if the dispatcher rejected it.
    pub fn apply(
        &self,
        delegate: &DelegatingOptionsBuilder,
        catalog: &TypeCatalog,
        opts: &mut FileSystemOptions,
    ) -> Result<(), anyhow::Error> {
        for (index, entry) in self.options.iter().enumerate() {
            let context = || {
                format!(
                    "profile '{}': could not apply option #{index} ({}.{})",
                    self.name, entry.scheme, entry.option
                )
            };

            match &entry.value {
                EntryValue::Scalar(value) => delegate
                    .set_config_string(opts, &entry.scheme, &entry.option, value.to_text())
                    .with_context(context)?,
                EntryValue::List(values) => {
                    let values = values.iter().map(Scalar::to_text).collect::<Vec<_>>();
                    delegate
                        .set_config_strings(opts, &entry.scheme, &entry.option, &values)
                        .with_context(context)?
                }
                EntryValue::Class(ClassRef { class }) => {
                    let ty = catalog
                        .get(class)
                        .with_context(|| format!("unknown class '{class}'"))
                        .with_context(context)?;
                    delegate
                        .set_config_class(opts, &entry.scheme, &entry.option, ty.clone())
                        .with_context(context)?
                }
            }
        }
        Ok(())
    }
}
