//! Node endpoint and credential resolution for [`HttpRpcClient`](super::HttpRpcClient).

use std::path::Path;

use reqwest::Url;

use crate::error::CoreError;

/// RPC port of a Magi mainnet daemon, used when the URL names none.
pub const DEFAULT_RPC_PORT: u16 = 8232;

/// Basic-auth pair sent with every node call.
pub(super) type Credentials = (String, String);

/// Pick credentials for the node.
///
/// An explicit `--rpc-user`/`--rpc-pass` pair wins over the cookie file. A
/// half-given pair is a configuration mistake rather than a fallback to the
/// cookie, since the daemon would reject it anyway.
pub(super) fn resolve_auth(
    user: Option<&str>,
    pass: Option<&str>,
    cookie_file: Option<&Path>,
) -> Result<Option<Credentials>, CoreError> {
    match (user, pass, cookie_file) {
        (Some(user), Some(pass), _) => Ok(Some((user.to_owned(), pass.to_owned()))),
        (Some(_), None, _) => Err(CoreError::Config(
            "MAGIRPC_RPC_USER is set without MAGIRPC_RPC_PASS".to_owned(),
        )),
        (None, Some(_), _) => Err(CoreError::Config(
            "MAGIRPC_RPC_PASS is set without MAGIRPC_RPC_USER".to_owned(),
        )),
        (None, None, Some(path)) => read_cookie(path).map(Some),
        (None, None, None) => Ok(None),
    }
}

fn read_cookie(path: &Path) -> Result<Credentials, CoreError> {
    let invalid = |reason: &str| {
        CoreError::Config(format!("magi cookie file {}: {reason}", path.display()))
    };

    let content = std::fs::read_to_string(path).map_err(|e| invalid(&e.to_string()))?;
    let line = content.lines().map(str::trim).next().unwrap_or_default();

    match line.split_once(':') {
        Some((user, pass)) if !user.is_empty() && !pass.is_empty() => {
            Ok((user.to_owned(), pass.to_owned()))
        }
        Some(_) => Err(invalid("user and password must both be non-empty")),
        None if line.is_empty() => Err(invalid("file is empty")),
        None => Err(invalid("expected `user:password` on the first line")),
    }
}

/// Normalize the node URL, filling in the Magi RPC port when none is given.
pub(super) fn parse_connection(connection: &str) -> Result<String, CoreError> {
    let mut url = Url::parse(connection).map_err(|e| {
        CoreError::Config(format!(
            "MAGIRPC_RPC_URL `{connection}` is not a URL ({e}); expected e.g. http://127.0.0.1:{DEFAULT_RPC_PORT}"
        ))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(CoreError::Config(format!(
            "MAGIRPC_RPC_URL scheme `{}` is not supported; the daemon speaks http or https",
            url.scheme()
        )));
    }
    if url.port().is_none() {
        url.set_port(Some(DEFAULT_RPC_PORT)).map_err(|()| {
            CoreError::Config(format!("MAGIRPC_RPC_URL `{connection}` cannot carry a port"))
        })?;
    }
    Ok(url.into())
}
