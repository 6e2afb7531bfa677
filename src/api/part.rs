//! The generic API part: one node of slick's URL tree.

use std::fmt;
use std::marker::PhantomData;

use reqwest::Method;
use serde::Serialize;
use url::form_urlencoded;

use crate::client::{RequestBody, SlickClient};
use crate::error::{Result, SlickError};
use crate::model::Model;
use crate::queries::query_pairs;

/// Which result [`ApiPart::find_one`] keeps when several match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FindOneMode {
    #[default]
    First,
    Last,
}

/// A slick endpoint holding models of type `M`.
///
/// A part knows its parent's URL and its own segment. Pending data set
/// with [`with`](Self::with) or [`with_id`](Self::with_id) narrows the
/// next request to one item and is consumed when the URL is resolved,
/// so each terminal call starts from the bare collection again.
///
/// ```no_run
/// # async fn demo(slick: slickqa::SlickConnection) -> slickqa::Result<()> {
/// use slickqa::models::Build;
///
/// let project = slick.projects().find_by_name("Acme").await?;
/// let release = project.release_named("1.0").cloned().unwrap_or_default();
/// let build = Build { name: Some("42".into()), ..Default::default() };
/// let created = slick
///     .projects()
///     .with(&project)
///     .releases()
///     .with(&release)
///     .builds()
///     .create(&build)
///     .await?;
/// # let _ = created;
/// # Ok(())
/// # }
/// ```
pub struct ApiPart<M> {
    client: SlickClient,
    parent_url: String,
    name: String,
    pending: Option<String>,
    _model: PhantomData<fn() -> M>,
}

impl<M> Clone for ApiPart<M> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            parent_url: self.parent_url.clone(),
            name: self.name.clone(),
            pending: self.pending.clone(),
            _model: PhantomData,
        }
    }
}

impl<M> fmt::Debug for ApiPart<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiPart")
            .field("parent_url", &self.parent_url)
            .field("name", &self.name)
            .field("pending", &self.pending)
            .finish()
    }
}

impl<M: Model> ApiPart<M> {
    pub(crate) fn new(client: SlickClient, parent_url: impl Into<String>) -> Self {
        Self {
            client,
            parent_url: parent_url.into(),
            name: M::url_part(),
            pending: None,
            _model: PhantomData,
        }
    }

    /// URL segment of this part.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Narrow the next request to `model`, by its id.
    ///
    /// A model with no id leaves nothing pending.
    pub fn with(mut self, model: &M) -> Self {
        self.pending = model.id().map(str::to_string);
        self
    }

    /// Narrow the next request to a raw path segment, usually an id.
    pub fn with_id(mut self, segment: impl Into<String>) -> Self {
        self.pending = Some(segment.into());
        self
    }

    pub(crate) fn set_pending(&mut self, segment: impl Into<String>) {
        self.pending = Some(segment.into());
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn client(&self) -> &SlickClient {
        &self.client
    }

    /// Resolve this part's URL, consuming any pending data.
    pub fn url(&mut self) -> String {
        let base = format!("{}/{}", self.parent_url, self.name);
        match self.pending.take() {
            Some(segment) => format!("{base}/{segment}"),
            None => base,
        }
    }

    /// The same endpoint read as model `C`, taking over the pending data.
    pub(crate) fn take_as<C: Model>(&mut self) -> ApiPart<C> {
        ApiPart {
            client: self.client.clone(),
            parent_url: self.parent_url.clone(),
            name: self.name.clone(),
            pending: self.pending.take(),
            _model: PhantomData,
        }
    }

    /// A child part below this part's resolved URL.
    pub(crate) fn child<C: Model>(mut self) -> ApiPart<C> {
        let url = self.url();
        ApiPart::new(self.client, url)
    }

    /// Find every model matching `query`.
    ///
    /// The query may be a typed query, a map, or a slice of
    /// `(key, value)` pairs. No matches is an empty vector.
    #[tracing::instrument(skip(self, query), fields(part = %self.name))]
    pub async fn find<Q>(&mut self, query: &Q) -> Result<Vec<M>>
    where
        Q: Serialize + ?Sized,
    {
        let pairs = query_pairs(query)?;
        let mut url = self.url();
        if !pairs.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        let body = self.client.send(Method::GET, &url, RequestBody::Empty).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Find every model in the collection.
    pub async fn find_all(&mut self) -> Result<Vec<M>> {
        self.find(&()).await
    }

    /// Like [`find`](Self::find), keeping at most one result.
    pub async fn find_one<Q>(&mut self, query: &Q, mode: FindOneMode) -> Result<Option<M>>
    where
        Q: Serialize + ?Sized,
    {
        let found = self.find(query).await?;
        Ok(match mode {
            FindOneMode::First => found.into_iter().next(),
            FindOneMode::Last => found.into_iter().last(),
        })
    }

    /// Fetch the single model at the resolved URL.
    #[tracing::instrument(skip(self), fields(part = %self.name))]
    pub async fn get(&mut self) -> Result<M> {
        let url = self.url();
        self.fetch(Method::GET, &url, RequestBody::Empty).await
    }

    /// PUT `model` and return the server's copy.
    ///
    /// Without pending data the model's own id picks the item.
    #[tracing::instrument(skip(self, model), fields(part = %self.name))]
    pub async fn update(&mut self, model: &M) -> Result<M> {
        if self.pending.is_none() {
            self.pending = model.id().map(str::to_string);
        }
        let url = self.url();
        let json = model.to_json()?;
        tracing::debug!(url, data = %json, "Updating slick item");
        self.fetch(Method::PUT, &url, RequestBody::Json(json)).await
    }

    /// POST `model` and return the server's copy, including its new id.
    #[tracing::instrument(skip(self, model), fields(part = %self.name))]
    pub async fn create(&mut self, model: &M) -> Result<M> {
        let url = self.url();
        let json = model.to_json()?;
        tracing::debug!(url, data = %json, "Creating slick item");
        self.fetch(Method::POST, &url, RequestBody::Json(json)).await
    }

    /// DELETE the item selected with [`with`](Self::with) or
    /// [`with_id`](Self::with_id).
    ///
    /// # Errors
    ///
    /// Returns [`SlickError::MissingId`] without contacting the server
    /// when nothing is pending.
    #[tracing::instrument(skip(self), fields(part = %self.name))]
    pub async fn remove(&mut self) -> Result<()> {
        if self.pending.is_none() {
            return Err(SlickError::MissingId(M::NAME));
        }
        let url = self.url();
        self.client.send(Method::DELETE, &url, RequestBody::Empty).await?;
        Ok(())
    }

    /// Send a request and parse the body as a model of type `T`.
    pub(crate) async fn fetch<T: Model>(&self, method: Method, url: &str, body: RequestBody) -> Result<T> {
        let text = self.client.send(method, url, body).await?;
        T::from_json(&text)
    }
}
