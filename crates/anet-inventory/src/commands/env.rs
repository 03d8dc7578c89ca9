use anet_config::{Credentials, ENV_PRIVATE_KEY, ENV_PUBLIC_KEY};

/// Credentials as `KEY=value` lines, ready for `export $(anet_inventory --env)`
pub fn render(credentials: &Credentials) -> String {
    format!(
        "{}={}\n{}={}",
        ENV_PUBLIC_KEY, credentials.public_key, ENV_PRIVATE_KEY, credentials.private_key
    )
}

pub fn handle(credentials: &Credentials) {
    println!("{}", render(credentials));
}
