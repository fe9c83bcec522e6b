use std::fmt;

/// Failures reported by a collaborator: the node RPC endpoint or a price
/// source.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server error {code}: {message}")]
    ServerError { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Public façade operation that produced an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetWallets,
    WalletExists,
    CreateWallet,
    GetAccountName,
    GetAccountAddress,
    GetTransactions,
    Send,
    GetPrice,
    GetStatistics,
    GetBalance,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GetWallets => "getting wallets",
            Self::WalletExists => "checking wallet existence",
            Self::CreateWallet => "creating wallet",
            Self::GetAccountName => "getting account name",
            Self::GetAccountAddress => "getting account address",
            Self::GetTransactions => "getting transactions",
            Self::Send => "sending funds",
            Self::GetPrice => "getting prices",
            Self::GetStatistics => "getting statistics",
            Self::GetBalance => "getting balance",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("error while {operation}: {source}")]
    Upstream {
        operation: Operation,
        #[source]
        source: RpcError,
    },

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("wallet already exists: {0}")]
    Conflict(String),

    #[error("no addresses found for account `{0}`")]
    NotFound(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    pub fn upstream(operation: Operation, source: RpcError) -> Self {
        Self::Upstream { operation, source }
    }
}

/// Tags a collaborator failure with the façade operation it happened in.
pub(crate) trait UpstreamContext<T> {
    fn during(self, operation: Operation) -> Result<T, CoreError>;
}

impl<T> UpstreamContext<T> for Result<T, RpcError> {
    fn during(self, operation: Operation) -> Result<T, CoreError> {
        self.map_err(|source| CoreError::upstream(operation, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_names_operation_and_cause() {
        let err = CoreError::upstream(
            Operation::GetWallets,
            RpcError::ServerError {
                code: -28,
                message: "Loading block index...".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "error while getting wallets: server error -28: Loading block index..."
        );
    }

    #[test]
    fn during_preserves_ok_values() {
        let ok: Result<u32, RpcError> = Ok(7);
        assert_eq!(ok.during(Operation::GetBalance).expect("ok passes through"), 7);

        let err: Result<u32, RpcError> = Err(RpcError::InvalidResponse("bad".into()));
        assert!(matches!(
            err.during(Operation::GetBalance),
            Err(CoreError::Upstream {
                operation: Operation::GetBalance,
                ..
            })
        ));
    }
}
