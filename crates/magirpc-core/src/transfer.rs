use bitcoin::Amount;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CoreError, Operation, UpstreamContext};
use crate::service::WalletService;

pub const DEFAULT_MEMO: &str = "none";
pub const DEFAULT_FEE: f64 = 0.005;

/// Confirmations the sending account's funds need before they can be spent.
const SEND_MIN_CONFIRMATIONS: u32 = 1;

// ==============================================================================
// Transfer Request
// ==============================================================================

/// A fund transfer between two wallets.
///
/// `sender` may be an address or a label; `recipient` is passed to the node
/// as given. When `subtract_fee` is set the fee comes out of `amount`,
/// otherwise `amount` is sent in full and the node adds the fee on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
    #[serde(default = "default_memo")]
    pub memo: String,
    #[serde(default = "default_fee")]
    pub fee: f64,
    #[serde(default = "default_subtract_fee")]
    pub subtract_fee: bool,
}

fn default_memo() -> String {
    DEFAULT_MEMO.to_owned()
}

fn default_fee() -> f64 {
    DEFAULT_FEE
}

fn default_subtract_fee() -> bool {
    true
}

impl TransferRequest {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: f64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
            memo: default_memo(),
            fee: default_fee(),
            subtract_fee: default_subtract_fee(),
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_fee(mut self, fee: f64) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_subtract_fee(mut self, subtract_fee: bool) -> Self {
        self.subtract_fee = subtract_fee;
        self
    }

    /// The amount handed to `sendfrom`, checked before any node call.
    pub fn amount_to_send(&self) -> Result<Amount, CoreError> {
        self.checked_amounts().map(|(amount, _)| amount)
    }

    /// The fee applied with `settxfee`, rounded to whole satoshis.
    pub fn fee_to_apply(&self) -> Result<Amount, CoreError> {
        to_coin_amount(self.fee, "fee")
    }

    fn checked_amounts(&self) -> Result<(Amount, Amount), CoreError> {
        let amount = to_coin_amount(self.amount, "amount")?;
        let fee = self.fee_to_apply()?;
        let too_small = || {
            CoreError::Validation(format!(
                "amount too small: {} does not exceed fee {}",
                self.amount, self.fee
            ))
        };

        if amount <= fee {
            return Err(too_small());
        }

        let sent = if self.subtract_fee {
            amount.checked_sub(fee).ok_or_else(too_small)?
        } else {
            amount
        };
        Ok((sent, fee))
    }
}

/// Round a coin value to the nearest satoshi.
///
/// Callers often compute amounts in floating point, so values carrying more
/// than eight decimals are rounded rather than rejected.
fn to_coin_amount(value: f64, field: &str) -> Result<Amount, CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "invalid {field} {value}: must be a finite, non-negative number"
        )));
    }
    let sats = (value * 100_000_000.0).round();
    if sats > Amount::MAX_MONEY.to_sat() as f64 {
        return Err(CoreError::Validation(format!(
            "invalid {field} {value}: exceeds the maximum coin supply"
        )));
    }
    Ok(Amount::from_sat(sats as u64))
}

// ==============================================================================
// Send
// ==============================================================================

impl WalletService {
    /// Validate and submit a transfer, returning the node's txid.
    ///
    /// Amount and fee are checked before the node is contacted. The node fee
    /// is held exclusively from `settxfee` until `sendfrom` returns.
    ///
    /// An address sender the wallet does not know resolves to the node's
    /// default `""` account, so the transfer spends from that account.
    pub async fn send(&self, request: &TransferRequest) -> Result<String, CoreError> {
        let (amount, fee_amount) = request.checked_amounts()?;

        let sender = self
            .resolve_label(&request.sender)
            .await
            .during(Operation::Send)?;

        let mut fee = self.fee.acquire().await;
        fee.apply(self.rpc.as_ref(), fee_amount.to_btc())
            .await
            .during(Operation::Send)?;

        let txid = self
            .rpc
            .send_from(
                &sender,
                &request.recipient,
                amount.to_btc(),
                SEND_MIN_CONFIRMATIONS,
                &request.memo,
            )
            .await
            .during(Operation::Send)?;
        drop(fee);

        info!(
            transfer.sender = %sender,
            transfer.recipient = %request.recipient,
            transfer.amount = amount.to_btc(),
            transfer.fee = fee_amount.to_btc(),
            %txid,
            "sent funds"
        );
        Ok(txid)
    }
}
