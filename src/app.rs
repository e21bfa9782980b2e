// app.rs
use crate::colors::ColorBag;
use crate::config::AppConfig;
use crate::permits::{
    Blocklist, CityPermitApi, FetchError, PermitFetcher, PermitLoader, PermitSource,
};
use tokio_util::sync::CancellationToken;

/// Shared by every worker thread for the lifetime of the server.
pub struct AppState {
    fetcher: PermitFetcher,
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new(fetcher: PermitFetcher) -> Self {
        Self {
            fetcher,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let api: Box<dyn PermitSource> =
            Box::new(CityPermitApi::new(config.endpoint.as_str(), config.timeout)?);
        let blocklist = Blocklist::new(config.blocklist.iter().cloned());
        Ok(Self::new(PermitFetcher::new(api, blocklist)))
    }

    pub fn loader(&self) -> PermitLoader<'_> {
        PermitLoader::new(&self.fetcher)
    }

    /// Starts a view. Its loads are abandoned once the view is dropped or the
    /// server shuts down.
    pub fn open_view(&self) -> ViewSession {
        ViewSession {
            colors: ColorBag::new(),
            cancel: self.shutdown.child_token(),
        }
    }

    /// Called from the signal listener in `main`.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

/// Per-request state: one color bag, one cancellation token.
pub struct ViewSession {
    pub colors: ColorBag,
    cancel: CancellationToken,
}

impl ViewSession {
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl Drop for ViewSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
