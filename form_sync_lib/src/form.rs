use anyhow::{format_err, Error};
use clap::ValueEnum;
use serde_json::Value;
use stack_string::StackString;
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::config::Config;

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum FormKind {
    Owner,
    Dog,
}

impl FromStr for FormKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "dog" => Ok(Self::Dog),
            _ => Err(format_err!("Failed to parse FormKind {s}")),
        }
    }
}

impl FormKind {
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Dog => "dog",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// A remote form paired with the local json file mirroring it.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    id: StackString,
    filepath: PathBuf,
    contents: Option<Value>,
}

impl Form {
    pub fn new(id: &str, docs_path: &Path, filename: &str) -> Self {
        Self {
            id: id.into(),
            filepath: docs_path.join(filename),
            contents: None,
        }
    }

    pub fn from_kind(kind: FormKind, config: &Config) -> Self {
        let (id, filename) = config.form_entry(kind);
        Self::new(id, &config.docs_path, filename)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    pub fn contents(&self) -> Option<&Value> {
        self.contents.as_ref()
    }

    pub fn set_contents(&mut self, contents: Value) {
        self.contents = Some(contents);
    }
}
