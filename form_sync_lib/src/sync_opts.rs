use anyhow::{Context, Error};
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde_json::Value;
use stack_string::format_sstr;
use std::{
    env::current_dir,
    fs::File,
    io::{stdout, BufReader, BufWriter, Write},
};

use crate::{
    config::Config,
    errors::FormSyncError,
    form::{Form, FormKind},
    typeform_instance::{FormsApi, TypeformInstance},
};

/// Sync the owner and dog survey forms between docs/ and Typeform
#[derive(Parser, Debug)]
#[command(
    name = "form-sync-rust",
    disable_help_subcommand = true,
    after_help = "Run from the project root: .env is read from and forms are stored under docs/ \
                  in the current directory."
)]
pub struct SyncOpts {
    #[command(subcommand)]
    pub action: FormSyncAction,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSyncAction {
    /// Download the remote form and overwrite the local json file
    Fetch {
        #[arg(value_enum)]
        form: FormKind,
    },
    /// Push the local json file as the new remote form
    Update {
        #[arg(value_enum)]
        form: FormKind,
    },
}

impl FormSyncAction {
    pub fn form_kind(self) -> FormKind {
        match self {
            Self::Fetch { form } | Self::Update { form } => form,
        }
    }
}

impl SyncOpts {
    /// Parse the command line and run it against Typeform, treating the
    /// current directory as the project root.
    ///
    /// # Errors
    /// Return error if any step of the requested action fails
    pub async fn process_args() -> Result<(), Error> {
        let opts = Self::parse();
        let config = Config::init_config(&current_dir()?)?;
        let typeform = TypeformInstance::new(&config)?;

        let form = opts.process_sync_opts(&config, &typeform).await?;
        let verb = match opts.action {
            FormSyncAction::Fetch { .. } => "fetched",
            FormSyncAction::Update { .. } => "updated",
        };
        writeln!(
            stdout().lock(),
            "{verb} {} form {} ({})",
            opts.action.form_kind(),
            form.id(),
            form.filepath().display()
        )?;
        Ok(())
    }

    /// # Errors
    /// Return error if the api call, file access or update check fails
    pub async fn process_sync_opts(
        &self,
        config: &Config,
        api: &dyn FormsApi,
    ) -> Result<Form, Error> {
        let mut form = Form::from_kind(self.action.form_kind(), config);
        debug!("{:?} {:?}", self.action, form);
        match self.action {
            FormSyncAction::Fetch { .. } => fetch_form(&mut form, api).await?,
            FormSyncAction::Update { .. } => update_form(&mut form, api).await?,
        }
        Ok(form)
    }
}

/// Download the remote definition and write it as 2-space indented json.
///
/// # Errors
/// Return error if the request fails or the file can't be written
pub async fn fetch_form(form: &mut Form, api: &dyn FormsApi) -> Result<(), Error> {
    let contents = api.get_form(form.id()).await?;
    {
        let f = File::create(form.filepath())
            .with_context(|| format_sstr!("Failed to create {}", form.filepath().display()))?;
        let mut f = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut f, &contents)?;
        f.flush()?;
    }
    info!("wrote form {} to {}", form.id(), form.filepath().display());
    form.set_contents(contents);
    Ok(())
}

/// Push the local file and require the service to echo it back unchanged.
///
/// # Errors
/// Return error if the file is missing or not json, the request fails, or
/// the response differs from the payload
pub async fn update_form(form: &mut Form, api: &dyn FormsApi) -> Result<(), Error> {
    let payload: Value = {
        let f = File::open(form.filepath())
            .with_context(|| format_sstr!("Failed to open {}", form.filepath().display()))?;
        serde_json::from_reader(BufReader::new(f))
            .with_context(|| format_sstr!("Invalid json in {}", form.filepath().display()))?
    };
    let response = api.update_form(form.id(), &payload).await?;
    let accepted = response == payload;
    form.set_contents(payload);
    if !accepted {
        return Err(FormSyncError::ResponseMismatch(form.id().into()).into());
    }
    info!("updated form {} from {}", form.id(), form.filepath().display());
    Ok(())
}
