use anyhow::{format_err, Error};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use stack_string::{format_sstr, StackString};
use std::fmt::Debug;
use url::Url;

use crate::{config::Config, errors::FormSyncError};

/// The two form operations the sync commands need from a form service.
#[async_trait]
pub trait FormsApi: Send + Sync + Debug {
    /// # Errors
    /// Return error if the request fails or the body is not json
    async fn get_form(&self, id: &str) -> Result<Value, Error>;

    /// Replace the remote definition of form `id`, returning what the
    /// service stored.
    ///
    /// # Errors
    /// Return error if the request fails or the body is not json
    async fn update_form(&self, id: &str, payload: &Value) -> Result<Value, Error>;
}

#[derive(Debug, Clone)]
pub struct TypeformInstance {
    client: Client,
    base_url: Url,
    token: Option<StackString>,
}

impl TypeformInstance {
    /// # Errors
    /// Returns error if the http client cannot be built
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: config.typeform_url.clone(),
            token: config.typeform_token.clone(),
        })
    }

    fn get_token(&self) -> Result<&str, Error> {
        self.token
            .as_ref()
            .map(StackString::as_str)
            .ok_or_else(|| FormSyncError::MissingToken.into())
    }

    /// # Errors
    /// Returns error if the form id produces an invalid url
    pub fn form_url(&self, id: &str) -> Result<Url, Error> {
        if id.is_empty() || id.contains('/') {
            return Err(format_err!("Invalid form id {id:?}"));
        }
        self.base_url
            .join(&format_sstr!("forms/{id}"))
            .map_err(Into::into)
    }
}

#[async_trait]
impl FormsApi for TypeformInstance {
    async fn get_form(&self, id: &str) -> Result<Value, Error> {
        let token = self.get_token()?;
        let url = self.form_url(id)?;
        debug!("GET {url}");
        self.client
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(Into::into)
    }

    async fn update_form(&self, id: &str, payload: &Value) -> Result<Value, Error> {
        let token = self.get_token()?;
        let url = self.form_url(id)?;
        debug!("PUT {url}");
        self.client
            .put(url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Error;
    use serde_json::json;

    use crate::{
        config::Config,
        errors::FormSyncError,
        typeform_instance::{FormsApi, TypeformInstance},
    };

    #[test]
    fn test_form_url() -> Result<(), Error> {
        let config = Config::new("/tmp".as_ref(), Some("tfp_token"))?;
        let typeform = TypeformInstance::new(&config)?;
        assert_eq!(
            typeform.form_url("A4nDvf")?.as_str(),
            "https://api.typeform.com/forms/A4nDvf"
        );
        assert!(typeform.form_url("").is_err());
        assert!(typeform.form_url("../me").is_err());
        Ok(())
    }

    #[test]
    fn test_get_token() -> Result<(), Error> {
        let config = Config::new("/tmp".as_ref(), Some("tfp_token"))?;
        let typeform = TypeformInstance::new(&config)?;
        assert_eq!(typeform.get_token()?, "tfp_token");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_request() -> Result<(), Error> {
        let config = Config::new("/tmp".as_ref(), None)?;
        let typeform = TypeformInstance::new(&config)?;

        let err = typeform.get_form("A4nDvf").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormSyncError>(),
            Some(FormSyncError::MissingToken)
        ));

        let err = typeform
            .update_form("b6s4oE", &json!({"id": "b6s4oE"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormSyncError>(),
            Some(FormSyncError::MissingToken)
        ));
        Ok(())
    }
}
