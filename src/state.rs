//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the navigator built at startup and the SPA shell. Nothing in it is
//! mutated after construction, so clones share everything through `Arc`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::nav::Navigator;

/// Shell served when the SPA build has no `index.html`.
pub const FALLBACK_SHELL: &str = "<!DOCTYPE html>
<html lang=\"en\">
    <head>
        <meta charset=\"utf-8\"/>
        <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>
        <title>Participant Portal</title>
    </head>
    <body>
        <div id=\"app\"></div>
    </body>
</html>
";

#[derive(Clone)]
pub struct AppState {
    pub navigator: Arc<Navigator>,
    pub session_cookie: Arc<str>,
    pub base_url: Arc<str>,
    pub dist_dir: PathBuf,
    /// HTML document every page route answers with.
    pub shell: Arc<str>,
}

impl AppState {
    #[must_use]
    pub fn new(navigator: Navigator, config: &AppConfig, shell: impl Into<Arc<str>>) -> Self {
        Self {
            navigator: Arc::new(navigator),
            session_cookie: config.session_cookie.as_str().into(),
            base_url: config.base_url.as_str().into(),
            dist_dir: config.dist_dir.clone(),
            shell: shell.into(),
        }
    }
}

/// Read `index.html` from the SPA build, falling back to [`FALLBACK_SHELL`].
pub async fn load_shell(dist_dir: &Path) -> String {
    let path = dist_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "SPA shell not found, serving fallback shell");
            FALLBACK_SHELL.to_owned()
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
