//! Process-wide choice of what `with_txn` does with a successful transaction.

use std::sync::OnceLock;

/// Whether `with_txn` commits or rolls back a successful transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxnPolicy {
    #[default]
    CommitOnOk,
    /// Tests use this so writes never outlive the test
    RollbackOnOk,
}

impl TxnPolicy {
    /// Parse an `ATLAS_TXN_POLICY` value; anything but `commit` rolls back.
    pub fn from_env_value(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("commit") {
            Self::CommitOnOk
        } else {
            Self::RollbackOnOk
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Policy in force; `CommitOnOk` until one is set.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or_default()
}

/// Set the policy once. Later calls are ignored and return `false`.
pub fn set_txn_policy(policy: TxnPolicy) -> bool {
    POLICY.set(policy).is_ok()
}
