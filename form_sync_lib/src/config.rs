use anyhow::Error;
use log::debug;
use stack_string::StackString;
use std::{
    env::var,
    ops::Deref,
    path::{Path, PathBuf},
    sync::Arc,
};
use url::Url;

use crate::form::FormKind;

const TYPEFORM_API_URL: &str = "https://api.typeform.com/";

#[derive(Debug)]
pub struct ConfigInner {
    pub root_dir: PathBuf,
    pub typeform_token: Option<StackString>,
    pub typeform_url: Url,
    pub docs_path: PathBuf,
    pub owner_form_id: StackString,
    pub owner_form_filename: StackString,
    pub dog_form_id: StackString,
    pub dog_form_filename: StackString,
}

#[derive(Debug, Clone)]
pub struct Config(Arc<ConfigInner>);

impl Config {
    /// Build a configuration rooted at `root_dir` without consulting the
    /// environment.
    ///
    /// # Errors
    /// Returns error if the builtin api url fails to parse
    pub fn new(root_dir: &Path, typeform_token: Option<&str>) -> Result<Self, Error> {
        let conf = ConfigInner {
            root_dir: root_dir.to_path_buf(),
            typeform_token: typeform_token
                .filter(|t| !t.is_empty())
                .map(Into::into),
            typeform_url: TYPEFORM_API_URL.parse()?,
            docs_path: root_dir.join("docs"),
            owner_form_id: "A4nDvf".into(),
            owner_form_filename: "owner-form.json".into(),
            dog_form_id: "b6s4oE".into(),
            dog_form_filename: "dog-form.json".into(),
        };
        Ok(Self(Arc::new(conf)))
    }

    /// Load `<root_dir>/.env` if present, then read `TYPEFORM_TOKEN`.
    ///
    /// A missing token is not an error here, requests will fail later.
    ///
    /// # Errors
    /// Returns error if the env file exists but cannot be parsed
    pub fn init_config(root_dir: &Path) -> Result<Self, Error> {
        let env_file = root_dir.join(".env");
        if env_file.exists() {
            debug!("loading {}", env_file.display());
            dotenv::from_path(&env_file)?;
        }
        let typeform_token = var("TYPEFORM_TOKEN").ok();
        Self::new(root_dir, typeform_token.as_deref())
    }

    pub fn form_entry(&self, kind: FormKind) -> (&str, &str) {
        match kind {
            FormKind::Owner => (self.owner_form_id.as_str(), self.owner_form_filename.as_str()),
            FormKind::Dog => (self.dog_form_id.as_str(), self.dog_form_filename.as_str()),
        }
    }
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
