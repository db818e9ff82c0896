use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A shared transaction that can be injected into request extensions
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    /// Begin a transaction that tests can hand to several requests in turn.
    pub async fn open(db: &DatabaseConnection) -> Result<Self, AppError> {
        Ok(Self(Arc::new(db.begin().await?)))
    }

    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    /// Roll back, provided this is the last handle to the transaction.
    pub async fn rollback(self) -> Result<(), AppError> {
        match Arc::try_unwrap(self.0) {
            Ok(txn) => Ok(txn.rollback().await?),
            Err(_) => Err(AppError::internal(
                "shared transaction still in use; cannot roll back",
            )),
        }
    }

    /// Attach to the request so `with_txn` picks it up.
    pub fn inject(&self, req: &HttpRequest) {
        req.extensions_mut().insert(self.clone());
    }
}

/// Execute a function within a database transaction
///
/// 1) If a SharedTxn is in request extensions → use it (no commit/rollback here)
/// 2) Otherwise → begin txn, run closure, apply policy on Ok / rollback on Err
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'a> FnOnce(
        &'a DatabaseTransaction,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<R, AppError>> + 'a>,
    >,
{
    // Clone out of the extensions before awaiting so no RefCell borrow is held
    let shared_txn: Option<SharedTxn> =
        req.and_then(|r| r.extensions().get::<SharedTxn>().cloned());

    if let Some(shared) = shared_txn {
        return f(shared.transaction()).await;
    }

    let txn = require_db(state)?.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
