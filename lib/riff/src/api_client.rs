//! Web API client: executes endpoints and walks paginated collections.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::{
    DEFAULT_API_URL, Endpoint, Error, HttpClient, HyperClient, Pagable, Paginated, Request,
    Result, bind, resolve,
};

/// Client for the Web API.
///
/// Combines a transport with the base URL relative route templates resolve
/// against. Every call is independent; the client holds no per-request state.
///
/// # Example
///
/// ```ignore
/// use riff::{ApiClient, HyperClient};
///
/// let api = ApiClient::spotify(HyperClient::new())?;
/// let tracks = api
///     .walk(GetPlaylistTracks::new("37i9dQZF1DXcBWIGoYBM5M"), Some(&token.access_token))
///     .await?;
/// ```
#[derive(Debug)]
pub struct ApiClient<C = HyperClient> {
    client: C,
    base_url: Url,
}

impl<C: Clone> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl<C> ApiClient<C> {
    /// Create a new API client with the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(client: C, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?,
        })
    }

    /// Create a new API client with a pre-parsed URL.
    #[must_use]
    pub fn with_url(client: C, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Create a client for the public Spotify Web API.
    ///
    /// # Errors
    ///
    /// Returns an error if [`DEFAULT_API_URL`] cannot be parsed.
    pub fn spotify(client: C) -> Result<Self> {
        Self::new(client, DEFAULT_API_URL)
    }

    /// Base URL of relative route templates.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the inner HTTP client.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the wrapper and return the inner HTTP client.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }

    /// Build the request of an endpoint without sending it.
    ///
    /// # Errors
    ///
    /// Returns configuration errors of the endpoint type and binding errors
    /// of its value.
    pub fn build<E: Endpoint>(&self, endpoint: &E, bearer: Option<&str>) -> Result<Request<Bytes>> {
        let route = resolve::<E>()?;
        bind(endpoint, &route, &self.base_url, bearer)
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// Send a built request and decode the success payload as `T`.
    ///
    /// # Errors
    ///
    /// - transport errors;
    /// - [`Error::RemoteApi`] for a non-2xx status;
    /// - decoding errors when neither the body nor the status code decodes as `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: Request<Bytes>) -> Result<T> {
        let method = request.method();
        let url = request.url().clone();
        debug!(%method, path = url.path(), "sending request");

        let response = self.client.execute(request).await?;
        if response.is_success() {
            return response.decode();
        }

        let err = response.into_remote_error();
        warn!(%method, path = url.path(), error = %err, "remote API error");
        Err(err)
    }

    /// Build and send the request of an endpoint.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::build`] and [`ApiClient::send`]. Configuration errors
    /// are returned before any network call.
    pub async fn request<E: Endpoint>(
        &self,
        endpoint: &E,
        bearer: Option<&str>,
    ) -> Result<E::Response> {
        let request = self.build(endpoint, bearer)?;
        self.send(request).await
    }

    /// Fetch every page of a paginated endpoint into one list.
    ///
    /// Pages are fetched one after the other, starting at the endpoint's
    /// offset (0 when unset) and advancing it by each page's `limit`.
    /// The walk stops on the first page that has no `next` link, brings the
    /// item count to `total`, is empty, or reports a zero `limit`.
    /// Items keep the server order and are not deduplicated.
    ///
    /// # Errors
    ///
    /// The first failing fetch aborts the walk and its error is returned;
    /// items fetched so far are dropped.
    pub async fn walk_all<E, T, F>(
        &self,
        mut endpoint: E,
        extract_page: F,
        bearer: Option<&str>,
    ) -> Result<Vec<T>>
    where
        E: Paginated,
        F: Fn(E::Response) -> Pagable<T>,
    {
        let mut offset = endpoint.offset().unwrap_or(0);
        let mut items = Vec::new();

        loop {
            endpoint.set_offset(offset);
            let page = extract_page(self.request(&endpoint, bearer).await?);

            let fetched = page.items.len();
            items.extend(page.items);
            debug!(
                offset,
                fetched,
                accumulated = items.len(),
                total = ?page.total,
                "fetched page"
            );

            let reached_total = page
                .total
                .is_some_and(|total| u32::try_from(items.len()).unwrap_or(u32::MAX) >= total);
            if page.next.is_none() || reached_total || fetched == 0 || page.limit == 0 {
                break;
            }
            offset = offset.saturating_add(page.limit);
        }

        Ok(items)
    }

    /// [`ApiClient::walk_all`] for endpoints whose response is the page itself.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::walk_all`].
    pub async fn walk<E, T>(&self, endpoint: E, bearer: Option<&str>) -> Result<Vec<T>>
    where
        E: Paginated<Response = Pagable<T>>,
    {
        self.walk_all(endpoint, |page| page, bearer).await
    }
}
