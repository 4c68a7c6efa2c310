//! Authenticated requests on behalf of screens

use anyhow::{bail, Result};

use conecta_core::{App, CoreError};

pub async fn get(app: &App, path: &str) -> Result<()> {
    let session = app.initialize().await;
    if !session.is_authenticated() {
        bail!("Not signed in, run `conecta login` first");
    }

    match app.client().get_json::<serde_json::Value>(path).await {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(CoreError::Unauthorized) => bail!("Session expired, sign in again"),
        Err(e) => Err(e.into()),
    }
}
