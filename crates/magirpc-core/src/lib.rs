pub mod accounts;
pub mod error;
pub mod fee;
mod parse;
pub mod price;
pub mod prices;
pub mod resolver;
pub mod rpc;
pub mod service;
pub mod stats;
#[cfg(test)]
mod test_util;
pub mod transfer;
pub mod wallets;

pub use error::{CoreError, Operation, RpcError};
pub use prices::PriceBook;
pub use service::WalletService;
pub use stats::StatisticsSnapshot;
pub use transfer::TransferRequest;
pub use wallets::Wallet;
