use std::{
    fs,
    io,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
};

use catalog_engine::{catalog_types::User, MerchantSession};
use dirs::home_dir;
use log::{debug, info};
use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = ".mctools";
const CONFIG_FILE: &str = "config.toml";

/// What `mctools` remembers between runs: which server to talk to, and the merchant session if signed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub api_url: Option<String>,
    pub session: Option<StoredSession>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

impl Profile {
    pub fn sign_in(&mut self, session: &MerchantSession) {
        self.session =
            Some(StoredSession { token: session.token().reveal().clone(), user: session.user().clone() });
    }

    pub fn sign_out(&mut self) -> Option<User> {
        self.session.take().map(|s| s.user)
    }

    pub fn merchant_session(&self) -> Option<MerchantSession> {
        self.session.as_ref().map(|s| MerchantSession::restore(s.token.clone(), s.user.clone()))
    }
}

pub fn get_config_path() -> io::Result<PathBuf> {
    let home = home_dir().ok_or_else(|| Error::new(ErrorKind::NotFound, "Home directory not found"))?;
    ensure_config_file(&home.join(CONFIG_DIR))
}

fn ensure_config_file(config_dir: &Path) -> io::Result<PathBuf> {
    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }
    set_permissions(config_dir, 0o700)?;
    let config_file = config_dir.join(CONFIG_FILE);
    if !config_file.exists() {
        info!("Creating default config file");
        write_profile_to(&config_file, &Profile::default())?;
    }
    Ok(config_file)
}

fn set_permissions(path: &Path, perms: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut permissions = fs::metadata(path)?.permissions();
        permissions.set_mode(perms);
        fs::set_permissions(path, permissions)?;
    }
    #[cfg(not(unix))]
    let _ = (path, perms);
    Ok(())
}

fn read_profile_from(path: &Path) -> io::Result<Profile> {
    let config_str = fs::read_to_string(path)?;
    toml::from_str(&config_str).map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))
}

fn write_profile_to(path: &Path, profile: &Profile) -> io::Result<()> {
    let config_str = toml::to_string(profile).map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))?;
    fs::write(path, config_str)?;
    // The file holds the session token
    set_permissions(path, 0o600)
}

pub fn read_profile() -> io::Result<Profile> {
    let path = get_config_path()?;
    debug!("Reading profile from {}", path.display());
    read_profile_from(&path)
}

pub fn write_profile(profile: &Profile) -> anyhow::Result<()> {
    let path = get_config_path()?;
    write_profile_to(&path, profile)?;
    debug!("Profile saved to {}", path.display());
    Ok(())
}
