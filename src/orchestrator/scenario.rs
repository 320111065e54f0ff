use log::info;

use super::error::{ContractError, ExecError, QueryError, ScenarioError};
use super::wallet::WalletClient;
use crate::contract::application::{Application, Authz};

const UNAUTHORIZED: &str = "Generic error: unauthorized";

/// End to end check of a deployed application contract.
///
/// `owner` writes `<prefix>-1` (public), `<prefix>-2` (private) and
/// `<prefix>-3` (readable by `readers[0]`) unless they already exist, then
/// the visibility rules and the no-overwrite rule are asserted.
pub async fn run(
    app: &Application<'_>,
    owner: &WalletClient,
    readers: &[WalletClient],
    prefix: &str,
) -> Result<(), ScenarioError> {
    let (reader, outsider) = match readers {
        [reader, outsider, ..] => (reader, outsider),
        _ => {
            return Err(ScenarioError::check(
                "setup",
                "two reader wallets are required",
            ))
        }
    };

    let public = format!("{prefix}-1");
    let private = format!("{prefix}-2");
    let protected = format!("{prefix}-3");

    if app.get(reader, &public).await?.is_none() {
        app.set(owner, &public, 31, Authz::Public).await?;
        app.set(owner, &private, 52, Authz::Private).await?;
        app.set(owner, &protected, 73, Authz::Protected(reader.address.clone()))
            .await?;
    }

    match app.set(owner, &public, 0, Authz::Public).await {
        Err(ContractError::ExecError(ExecError::Execution { log })) => {
            info!("overwrite rejected: {log}")
        }
        other => return Err(ScenarioError::check("overwrite", format!("{other:?}"))),
    }

    expect_value(app.get(reader, &public).await?, 31, "public read")?;
    expect_unauthorized(app.get(reader, &private).await, "private read")?;
    expect_unauthorized(app.get(outsider, &private).await, "private read by outsider")?;
    expect_value(app.get(reader, &protected).await?, 73, "protected read")?;
    expect_unauthorized(app.get(outsider, &protected).await, "protected read by outsider")?;

    info!("scenario passed for {}", app.info().address);
    Ok(())
}

fn expect_value(got: Option<u32>, want: u32, check: &str) -> Result<(), ScenarioError> {
    if got == Some(want) {
        Ok(())
    } else {
        Err(ScenarioError::check(check, format!("expected {want}, got {got:?}")))
    }
}

fn expect_unauthorized(
    res: Result<Option<u32>, ContractError>,
    check: &str,
) -> Result<(), ScenarioError> {
    match res {
        Err(ContractError::QueryError(QueryError::Chain { msg })) if msg == UNAUTHORIZED => Ok(()),
        other => Err(ScenarioError::check(check, format!("{other:?}"))),
    }
}
