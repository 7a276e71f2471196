//! Apply a stored option profile.
//!
//! `cargo run --bin profile -- <config-dir> <profile-name>`
//!
//! Profiles are read from `<config-dir>/profiles/`.

use anyhow::Context as _;
use fsopts::FileSystemOptions;
use fsopts_config::{FsProfileStore, ProfileStore as _, TypeCatalog};
use fsopts_sftp::TrustEveryoneUserInfo;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let dir = args.next().context("missing config directory argument")?;
    let name = args.next().context("missing profile name argument")?;

    let store = FsProfileStore::new(dir.into());
    let loaded = store.load_profiles().await?;
    for failed in &loaded.failed {
        eprintln!(
            "skipping invalid profile in {:?} (index {:?}): {}",
            failed.source, failed.index, failed.error
        );
    }
    let profile = loaded
        .get(&name)
        .with_context(|| format!("profile '{name}' not found"))?;

    let catalog = TypeCatalog::new().with_type("trust-everyone", TrustEveryoneUserInfo::type_ref());
    let delegate = fsopts_standard::standard_delegate();
    let mut opts = FileSystemOptions::new();
    profile.config.apply(&delegate, &catalog, &mut opts)?;

    let http = fsopts_http::HttpConfigBuilder::instance();
    println!("applied profile '{}': {opts:?}", profile.config.name);
    if let Some(host) = http.get_proxy_host(&opts) {
        println!("http proxy: {host}:{}", http.get_proxy_port(&opts).unwrap_or(80));
    }
    Ok(())
}
