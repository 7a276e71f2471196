//! Set a single option through the standard registry.
//!
//! `cargo run --bin set_option -- http proxyPort 8080`
//!
//! Multiple values after the option name are passed as a list:
//!
//! `cargo run --bin set_option -- sftp identities ~/.ssh/id_rsa ~/.ssh/id_ed25519`

use std::sync::Arc;

use anyhow::Context as _;
use fsopts::{FileSystemOptions, RegistryBuilder, wrapper::trace::TracedConfigBuilder};

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let scheme = args.next().context("missing scheme argument")?;
    let option = args.next().context("missing option argument")?;
    let values = args.collect::<Vec<_>>();

    let mut registry = RegistryBuilder::new();
    fsopts_standard::register_standard(&mut registry);
    let builder = registry
        .build()
        .resolve(&scheme)
        .context("scheme is not part of the standard registry")?;

    // Same builder, but every applied option is logged.
    let mut registry = RegistryBuilder::new();
    registry.register(
        scheme.clone(),
        Arc::new(TracedConfigBuilder::new(scheme.clone(), builder)),
    );
    let delegate = fsopts::DelegatingOptionsBuilder::new(registry.build());

    let mut opts = FileSystemOptions::new();
    match values.as_slice() {
        [] => anyhow::bail!("missing value argument"),
        [value] => delegate.set_config_string(&mut opts, &scheme, &option, value.as_str())?,
        values => delegate.set_config_strings(&mut opts, &scheme, &option, values)?,
    }

    println!("{opts:?}");
    Ok(())
}
