use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use reportvault::access::visible_to;
use reportvault::Vault;

/// Demo walkthrough: open a seeded vault, sign each demo principal in and
/// report how many reports each one can see.
fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    let data_dir = std::env::var("REPORTVAULT_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    info!(target: "reportvault", "ReportVault starting: data_dir='{}'", data_dir);

    let vault = Vault::open_demo(&data_dir)?;
    let identities = vault.directory().identities().to_vec();
    let reports = vault.registry().list();

    for identity in identities {
        let signed_in = vault.authenticator().authenticate(&identity.email, "demo")?;
        let visible = visible_to(Some(&signed_in), &reports);
        info!(
            target: "reportvault",
            "{} <{}> ({}) sees {}/{} reports",
            signed_in.name,
            signed_in.email,
            signed_in.role.as_str(),
            visible.len(),
            reports.len()
        );
        vault.authenticator().logout()?;
    }

    info!(target: "reportvault", "audit trail now holds {} event(s)", vault.audit().len());
    Ok(())
}
