//! Implementation of [`WebAppExt`](crate::WebAppExt) for velinserver
//!
//! Mounts the embedded client on a `velinserver::Server`, normalizing the
//! mount path and adding a trailing-slash redirect so `/app/` serves the
//! app too.

use crate::WebAppExt;
use rust_embed::RustEmbed;
use velinserver::Server;

impl WebAppExt for Server {
    async fn add_webapp<W>(&mut self, path: &str)
    where
        W: RustEmbed + Clone + Send + Sync + 'static,
    {
        let mount_path = normalize_mount_path(path);
        mount_spa_with_trailing_slash_redirect::<W>(self, &mount_path).await;
    }

    async fn add_webapp_with_redirect<W>(&mut self, path: &str)
    where
        W: RustEmbed + Clone + Send + Sync + 'static,
    {
        let mount_path = normalize_mount_path(path);

        mount_spa_with_trailing_slash_redirect::<W>(self, &mount_path).await;
        self.add_redirect("/", &mount_path).await;
    }
}

/// Keep mount paths consistent: `"app/"` becomes `"/app"`, `"/"` stays
/// as-is. Stray whitespace and duplicate slashes are trimmed so routes are
/// never registered twice.
fn normalize_mount_path(path: &str) -> String {
    let trimmed = path.trim();

    if trimmed.is_empty() || trimmed == "/" {
        "/".to_string()
    } else {
        format!("/{}", trimmed.trim_matches('/'))
    }
}

/// Mount the SPA and redirect `"/app/" -> "/app"` so URLs with a trailing
/// slash also serve the application.
async fn mount_spa_with_trailing_slash_redirect<W>(server: &mut Server, path: &str)
where
    W: RustEmbed + Clone + Send + Sync + 'static,
{
    server.add_spa::<W>(path).await;

    if path != "/" {
        let trailing = format!("{}/", path.trim_end_matches('/'));
        server.add_redirect(&trailing, path).await;
    }
}
