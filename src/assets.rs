use rust_embed::Embed;
use thiserror::Error;

use crate::profile::{Asset, Profile};

/// Manifest of everything shipped in the site's public directory.
#[derive(Embed)]
#[folder = "public"]
#[cfg_attr(feature = "hydrate", metadata_only = true)]
pub struct PublicAssets;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    Missing(String),
}

pub fn check(asset: &Asset) -> Result<(), AssetError> {
    match PublicAssets::get(asset.path()) {
        Some(_) => Ok(()),
        None => Err(AssetError::Missing(asset.href.to_string())),
    }
}

/// The avatar if it ships with the site, otherwise its placeholder. The
/// manifest is compiled into both the server and the client, so the choice is
/// made before the first render and survives hydration.
pub fn avatar_source(profile: &Profile) -> Asset {
    match check(&profile.avatar) {
        Ok(()) => profile.avatar,
        Err(e) => {
            log::debug!("using avatar placeholder: {e}");
            profile.avatar_fallback
        }
    }
}

/// Checks the avatar, its fallback and the resume. Problems are returned, not
/// raised; the page renders either way.
pub fn check_profile_assets(profile: &Profile) -> Vec<AssetError> {
    [profile.avatar, profile.avatar_fallback, profile.resume]
        .iter()
        .filter_map(|a| check(a).err())
        .collect()
}
