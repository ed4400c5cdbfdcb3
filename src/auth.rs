use anyhow::Result;
use rspotify::{ClientCredsSpotify, Config, Credentials};

use crate::config::SpotifyConfig;
use crate::error::FinderError;

const CREDENTIALS_HINT: &str =
    "set RSPOTIFY_CLIENT_ID and RSPOTIFY_CLIENT_SECRET, or [spotify] client_id/client_secret in music-finder.toml";

fn credentials(config: &SpotifyConfig) -> Result<Credentials> {
    match (&config.client_id, &config.client_secret) {
        (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
            Ok(Credentials::new(id, secret))
        }
        _ => Err(FinderError::upstream(
            "Spotify authentication",
            format!("client credentials missing ({CREDENTIALS_HINT})"),
        )
        .into()),
    }
}

/// Exchange the client credentials for an access token.
///
/// The returned client refreshes its token on its own once it expires.
pub async fn connect(config: &SpotifyConfig) -> Result<ClientCredsSpotify> {
    let creds = credentials(config)?;

    let spotify = ClientCredsSpotify::with_config(
        creds,
        Config {
            token_cached: false,
            token_refreshing: true,
            ..Default::default()
        },
    );

    tracing::info!("Requesting Spotify access token");
    if let Err(e) = spotify.request_token().await {
        tracing::error!(error = %e, "Spotify token exchange failed");
        return Err(FinderError::spotify("Spotify authentication", &e).into());
    }

    tracing::info!("Spotify client authorized");
    Ok(spotify)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_are_an_upstream_error() {
        let config = SpotifyConfig {
            client_id: Some("id".into()),
            client_secret: None,
            ..Default::default()
        };
        let err = credentials(&config).unwrap_err();
        let err = err.downcast_ref::<FinderError>().unwrap();
        assert!(matches!(err, FinderError::Upstream { .. }));
        assert!(err.to_string().contains("RSPOTIFY_CLIENT_ID"));
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let config = SpotifyConfig {
            client_id: Some(String::new()),
            client_secret: Some("secret".into()),
            ..Default::default()
        };
        assert!(credentials(&config).is_err());
    }

    #[test]
    fn complete_credentials_are_accepted() {
        let config = SpotifyConfig {
            client_id: Some("id".into()),
            client_secret: Some("secret".into()),
            ..Default::default()
        };
        let creds = credentials(&config).unwrap();
        assert_eq!(creds.id, "id");
        assert_eq!(creds.secret.as_deref(), Some("secret"));
    }
}
