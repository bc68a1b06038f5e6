//! Token contract entry points.
//!
//! Every amount read from an argument or from the store is lifted into a
//! [`BigNum`]; every amount written back is its canonical decimal string.

use super::storage::{TokenState, TokenStorage};
use super::{event_names, fields};
use crate::domain::args::{field, parse_at_least_args};
use crate::errors::ContractError;
use crate::host::InvocationHost;
use crate::ports::Contract;
use tracing::debug;
use uvm_core::json;
use uvm_core::prelude::{Array, BigNum, Map, Table, Value};

/// Entry points that only read state.
pub const OFFLINE_APIS: &[&str] = &[
    "state",
    "tokenName",
    "tokenSymbol",
    "precision",
    "supply",
    "totalSupply",
    "admin",
    "isAllowLock",
    "balanceOf",
    "approvedBalanceFrom",
    "allApprovedFromUser",
    "lockedBalanceOf",
];

/// The fungible token contract.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenContract;

impl Contract for TokenContract {
    type Storage = TokenStorage;

    fn name(&self) -> &'static str {
        "token"
    }

    fn init(&self, host: &mut InvocationHost<'_>, storage: &mut TokenStorage) -> Result<(), ContractError> {
        *storage = TokenStorage {
            precision: 1,
            admin: host.caller_address().to_owned(),
            ..TokenStorage::default()
        };
        debug!(admin = %storage.admin, "token storage initialized");
        Ok(())
    }

    fn call(
        &self,
        api: &str,
        arg: &str,
        host: &mut InvocationHost<'_>,
        storage: &mut TokenStorage,
    ) -> Result<Option<String>, ContractError> {
        match api {
            "state" => Ok(Some(storage.state.as_str().to_owned())),
            "tokenName" => Ok(Some(storage.name.clone())),
            "tokenSymbol" => Ok(Some(storage.symbol.clone())),
            "precision" => Ok(Some(storage.precision.to_string())),
            "supply" | "totalSupply" => Ok(Some(storage.supply.clone())),
            "admin" => Ok(Some(storage.admin.clone())),
            "isAllowLock" => Ok(Some(storage.allow_lock.to_string())),
            "balanceOf" => balance_of(host, storage, arg).map(Some),
            "approvedBalanceFrom" => approved_balance_from(host, arg).map(Some),
            "allApprovedFromUser" => all_approved_from_user(host, arg).map(Some),
            "lockedBalanceOf" => locked_balance_of(host, arg).map(Some),

            "init_token" => init_token(host, storage, arg).map(|()| None),
            "openAllowLock" => open_allow_lock(host, storage).map(|()| None),
            "transfer" => transfer(host, storage, arg).map(|()| None),
            "transferFrom" => transfer_from(host, storage, arg).map(|()| None),
            "approve" => approve(host, storage, arg).map(|()| None),
            "pause" => pause(host, storage).map(|()| None),
            "resume" => resume(host, storage).map(|()| None),
            "stop" => stop(host, storage).map(|()| None),
            "lock" => lock(host, storage, arg).map(|()| None),
            "unlock" => unlock(host, storage).map(|()| None),
            "forceUnlock" => force_unlock(host, storage, arg).map(|()| None),
            "on_deposit" => Err(ContractError::validation("not support deposit to token contract")),
            other => Err(ContractError::UnknownApi(other.to_owned())),
        }
    }

    fn is_offline(&self, api: &str) -> bool {
        OFFLINE_APIS.contains(&api)
    }
}

// =============================================================================
// GUARDS
// =============================================================================

/// The effective sender: the calling contract when there is one, otherwise
/// the signing account.
fn from_address(host: &InvocationHost<'_>) -> String {
    match host.prev_contract_address() {
        Some(prev) if host.is_valid_contract_address(prev) => prev.to_owned(),
        _ => host.caller_address().to_owned(),
    }
}

fn check_admin(host: &InvocationHost<'_>, storage: &TokenStorage) -> Result<(), ContractError> {
    if storage.admin != from_address(host) {
        return Err(ContractError::validation("you are not admin, can't call this function"));
    }
    Ok(())
}

/// Only direct calls and self-calls may mutate the token.
fn check_caller_frame_valid(host: &InvocationHost<'_>) -> Result<(), ContractError> {
    match host.prev_contract_address() {
        Some(prev) if prev != host.current_contract_address() => Err(ContractError::validation(
            format!("this api can't called by invalid contract:{prev}"),
        )),
        _ => Ok(()),
    }
}

fn check_state(storage: &TokenStorage) -> Result<(), ContractError> {
    match storage.state {
        TokenState::NotInited => Err(ContractError::validation("contract token not inited")),
        TokenState::Paused => Err(ContractError::validation("contract paused")),
        TokenState::Stopped => Err(ContractError::validation("contract stopped")),
        TokenState::Common => Ok(()),
    }
}

fn check_state_inited(storage: &TokenStorage) -> Result<(), ContractError> {
    if storage.state == TokenState::NotInited {
        return Err(ContractError::validation("contract token not inited"));
    }
    Ok(())
}

fn check_address(host: &InvocationHost<'_>, addr: &str) -> Result<(), ContractError> {
    if !host.is_valid_address(addr) {
        return Err(ContractError::validation("address format error"));
    }
    Ok(())
}

fn check_allow_lock(storage: &TokenStorage) -> Result<(), ContractError> {
    if !storage.allow_lock {
        return Err(ContractError::validation("this token contract not allow lock balance"));
    }
    Ok(())
}

// =============================================================================
// STORE HELPERS
// =============================================================================

fn parse_stored(field_name: &str, key: &str, text: &str) -> Result<BigNum, ContractError> {
    BigNum::parse(text)
        .map_err(|_| ContractError::storage(format!("{field_name}[{key}] is not an integer: {text}")))
}

fn balance(host: &InvocationHost<'_>, addr: &str) -> Result<BigNum, ContractError> {
    match host.fast_map_get(fields::USERS, addr)? {
        Some(text) => parse_stored(fields::USERS, addr, &text),
        None => Ok(BigNum::zero()),
    }
}

/// Writes a balance; zero deletes the entry.
fn store_balance(host: &mut InvocationHost<'_>, addr: &str, amount: &BigNum) -> Result<(), ContractError> {
    let text = (!amount.is_zero()).then(|| amount.to_string());
    host.fast_map_set(fields::USERS, addr, text.as_deref())?;
    Ok(())
}

fn load_allowances(host: &InvocationHost<'_>, owner: &str) -> Result<Option<Table>, ContractError> {
    let Some(text) = host.fast_map_get(fields::ALLOWED, owner)? else {
        return Ok(None);
    };
    json::loads_table(&text)?
        .map(Some)
        .ok_or_else(|| ContractError::storage("allowed storage data error"))
}

/// Writes an owner's allowances; an empty table deletes the entry.
fn store_allowances(host: &mut InvocationHost<'_>, owner: &str, allowances: &Table) -> Result<(), ContractError> {
    let text = if allowances.is_empty() {
        None
    } else {
        Some(json::dumps_table(allowances)?)
    };
    host.fast_map_set(fields::ALLOWED, owner, text.as_deref())?;
    Ok(())
}

fn amount_text(value: &Value) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.clone()),
        Value::Int(n) => Some(n.to_string()),
        Value::Number(text) => Some(text.clone()),
        Value::Bool(_) | Value::Table(_) => None,
    }
}

fn json_payload(pairs: &[(&str, &str)]) -> Result<String, ContractError> {
    let payload: Map = pairs.iter().map(|&(k, v)| (k, Value::from(v))).collect();
    Ok(json::dumps_table(payload.table())?)
}

fn allowed_precisions() -> Array {
    std::iter::successors(Some(1_i64), |p| Some(p * 10))
        .take(9)
        .map(Value::Int)
        .collect()
}

// =============================================================================
// OFFLINE QUERIES
// =============================================================================

fn balance_of(host: &InvocationHost<'_>, storage: &TokenStorage, owner: &str) -> Result<String, ContractError> {
    check_state_inited(storage)?;
    check_address(host, owner)?;
    Ok(balance(host, owner)?.to_string())
}

fn approved_balance_from(host: &InvocationHost<'_>, arg: &str) -> Result<String, ContractError> {
    let args = parse_at_least_args(
        arg,
        2,
        "argument format error, need format is spenderAddress,authorizerAddress",
    )?;
    let spender = field(&args, 1);
    let authorizer = field(&args, 2);
    check_address(host, spender)?;
    check_address(host, authorizer)?;

    let Some(allowances) = load_allowances(host, authorizer)? else {
        return Ok("0".to_owned());
    };
    let approved = allowances.as_map().get(spender).and_then(amount_text);
    Ok(approved.unwrap_or_else(|| "0".to_owned()))
}

fn all_approved_from_user(host: &InvocationHost<'_>, authorizer: &str) -> Result<String, ContractError> {
    check_address(host, authorizer)?;
    Ok(host
        .fast_map_get(fields::ALLOWED, authorizer)?
        .unwrap_or_else(|| "{}".to_owned()))
}

fn locked_balance_of(host: &InvocationHost<'_>, owner: &str) -> Result<String, ContractError> {
    Ok(host
        .fast_map_get(fields::LOCKED_AMOUNTS, owner)?
        .unwrap_or_else(|| "0,0".to_owned()))
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// `name,symbol,supply,precision`
fn init_token(host: &mut InvocationHost<'_>, storage: &mut TokenStorage, arg: &str) -> Result<(), ContractError> {
    check_admin(host, storage)?;
    check_caller_frame_valid(host)?;
    if storage.state != TokenState::NotInited {
        return Err(ContractError::validation("this token contract inited before"));
    }
    let args = parse_at_least_args(
        arg,
        4,
        "argument format error, need format: name,symbol,supply,precision",
    )?;

    let name = field(&args, 1);
    if name.is_empty() {
        return Err(ContractError::validation("name needed"));
    }
    let symbol = field(&args, 2);
    if symbol.is_empty() {
        return Err(ContractError::validation("symbol needed"));
    }
    let supply_text = field(&args, 3);
    let supply = BigNum::parse(supply_text)?;
    if !supply.is_positive() {
        return Err(ContractError::validation(format!("invalid supply:{supply_text}")));
    }

    let caller = host.caller_address().to_owned();
    let from = from_address(host);
    if from != caller {
        return Err(ContractError::validation(format!(
            "init_token can't be called from other contract:{from}"
        )));
    }

    let precision: i64 = field(&args, 4)
        .parse()
        .map_err(|_| ContractError::argument("precision must be positive integer"))?;
    if precision < 1 {
        return Err(ContractError::validation("precision must be positive integer"));
    }
    let allowed = allowed_precisions();
    if !allowed.contains(&Value::Int(precision)) {
        return Err(ContractError::validation(format!(
            "precision can only be positive integer in {}",
            json::dumps_table(allowed.table())?
        )));
    }

    storage.name = name.to_owned();
    storage.symbol = symbol.to_owned();
    storage.supply = supply.to_string();
    storage.precision = precision;
    storage.state = TokenState::Common;
    store_balance(host, &caller, &supply)?;

    host.emit(event_names::INITED, storage.supply.clone());
    let payload = json_payload(&[("from", ""), ("to", caller.as_str()), ("amount", storage.supply.as_str())])?;
    host.emit(event_names::TRANSFER, payload);
    debug!(name, symbol, supply = %supply, precision, "token initialized");
    Ok(())
}

fn open_allow_lock(host: &mut InvocationHost<'_>, storage: &mut TokenStorage) -> Result<(), ContractError> {
    check_admin(host, storage)?;
    check_state(storage)?;
    check_caller_frame_valid(host)?;
    if storage.allow_lock {
        return Err(ContractError::validation("this contract had been opened allowLock before"));
    }
    storage.allow_lock = true;
    host.emit(event_names::ALLOWED_LOCK, "");
    Ok(())
}

fn pause(host: &mut InvocationHost<'_>, storage: &mut TokenStorage) -> Result<(), ContractError> {
    check_caller_frame_valid(host)?;
    check_state_inited(storage)?;
    match storage.state {
        TokenState::Stopped => return Err(ContractError::validation("this contract stopped now, can't pause")),
        TokenState::Paused => return Err(ContractError::validation("this contract paused now, can't pause")),
        TokenState::NotInited | TokenState::Common => {}
    }
    check_admin(host, storage)?;
    storage.state = TokenState::Paused;
    host.emit(event_names::PAUSED, "");
    Ok(())
}

fn resume(host: &mut InvocationHost<'_>, storage: &mut TokenStorage) -> Result<(), ContractError> {
    check_caller_frame_valid(host)?;
    if storage.state != TokenState::Paused {
        return Err(ContractError::validation("this contract not paused now, can't resume"));
    }
    check_admin(host, storage)?;
    storage.state = TokenState::Common;
    host.emit(event_names::RESUMED, "");
    Ok(())
}

fn stop(host: &mut InvocationHost<'_>, storage: &mut TokenStorage) -> Result<(), ContractError> {
    check_caller_frame_valid(host)?;
    check_state_inited(storage)?;
    match storage.state {
        TokenState::Stopped => return Err(ContractError::validation("this contract stopped now, can't stop")),
        TokenState::Paused => return Err(ContractError::validation("this contract paused now, can't stop")),
        TokenState::NotInited | TokenState::Common => {}
    }
    check_admin(host, storage)?;
    storage.state = TokenState::Stopped;
    host.emit(event_names::STOPPED, "");
    Ok(())
}

// =============================================================================
// TRANSFERS AND ALLOWANCES
// =============================================================================

fn parse_positive_amount(text: &str) -> Result<BigNum, ContractError> {
    let amount = BigNum::parse(text)?;
    if !amount.is_positive() {
        return Err(ContractError::validation(format!("invalid amount:{text}")));
    }
    Ok(amount)
}

/// Moves `amount` between two distinct holders. The caller has already
/// checked that `from` holds enough.
fn move_balance(
    host: &mut InvocationHost<'_>,
    from: &str,
    from_balance: &BigNum,
    to: &str,
    amount: &BigNum,
) -> Result<(), ContractError> {
    let to_balance = balance(host, to)?;
    store_balance(host, from, &from_balance.sub(amount))?;
    store_balance(host, to, &to_balance.add(amount))?;
    Ok(())
}

/// `to_address,integer_amount[,memo]`
fn transfer(host: &mut InvocationHost<'_>, storage: &TokenStorage, arg: &str) -> Result<(), ContractError> {
    check_state(storage)?;
    check_caller_frame_valid(host)?;
    let args = parse_at_least_args(
        arg,
        2,
        "argument format error, need format is to_address,integer_amount[,memo]",
    )?;
    let to = field(&args, 1);
    check_address(host, to)?;
    let amount = parse_positive_amount(field(&args, 2))?;

    let from = from_address(host);
    if from == to {
        return Err(ContractError::validation(format!(
            "fromAddress and toAddress is same:{from}"
        )));
    }
    let from_balance = balance(host, &from)?;
    if from_balance < amount {
        return Err(ContractError::validation(format!("insufficient balance:{from_balance}")));
    }
    move_balance(host, &from, &from_balance, to, &amount)?;

    let payload = json_payload(&[("from", from.as_str()), ("to", to), ("amount", amount.to_string().as_str())])?;
    host.emit(event_names::TRANSFER, payload);
    Ok(())
}

/// `fromAddress,toAddress,amount`, spending an allowance granted to the
/// effective sender.
fn transfer_from(host: &mut InvocationHost<'_>, storage: &TokenStorage, arg: &str) -> Result<(), ContractError> {
    check_state(storage)?;
    check_caller_frame_valid(host)?;
    let args = parse_at_least_args(
        arg,
        3,
        "argument format error, need format is fromAddress,toAddress,amount(with precision)",
    )?;
    let from = field(&args, 1);
    let to = field(&args, 2);
    check_address(host, from)?;
    check_address(host, to)?;
    if from == to {
        return Err(ContractError::validation(format!(
            "fromAddress and toAddress is same:{from}"
        )));
    }
    let amount = parse_positive_amount(field(&args, 3))?;

    let from_balance = balance(host, from)?;
    if from_balance < amount {
        return Err(ContractError::validation(format!("insufficient balance :{from_balance}")));
    }

    let mut allowances = load_allowances(host, from)?
        .ok_or_else(|| ContractError::validation("not enough approved amount to withdraw"))?;
    let spender = from_address(host);
    let approved_text = allowances
        .as_map()
        .get(&spender)
        .and_then(amount_text)
        .ok_or_else(|| ContractError::validation("no approved amount to withdraw"))?;
    let approved = parse_stored(fields::ALLOWED, from, &approved_text)?;
    if amount > approved {
        return Err(ContractError::validation("not enough approved amount to withdraw"));
    }

    move_balance(host, from, &from_balance, to, &amount)?;

    let remaining = approved.sub(&amount);
    allowances
        .as_map_mut()
        .set(spender.as_str(), (!remaining.is_zero()).then(|| Value::from(&remaining)));
    store_allowances(host, from, &allowances)?;

    let payload = json_payload(&[("from", from), ("to", to), ("amount", amount.to_string().as_str())])?;
    host.emit(event_names::TRANSFER, payload);
    Ok(())
}

/// `spenderAddress,amount`; a zero amount revokes.
fn approve(host: &mut InvocationHost<'_>, storage: &TokenStorage, arg: &str) -> Result<(), ContractError> {
    check_state(storage)?;
    check_caller_frame_valid(host)?;
    let args = parse_at_least_args(
        arg,
        2,
        "argument format error, need format is spenderAddress,amount(with precision)",
    )?;
    let spender = field(&args, 1);
    check_address(host, spender)?;
    let amount = BigNum::parse(field(&args, 2))?;
    if amount.is_negative() {
        return Err(ContractError::validation("amount must be non-negative integer"));
    }

    let owner = from_address(host);
    let mut allowances = load_allowances(host, &owner)?.unwrap_or_default();
    allowances
        .as_map_mut()
        .set(spender, (!amount.is_zero()).then(|| Value::from(&amount)));
    store_allowances(host, &owner, &allowances)?;

    let payload = json_payload(&[
        ("from", owner.as_str()),
        ("spender", spender),
        ("amount", amount.to_string().as_str()),
    ])?;
    host.emit(event_names::APPROVED, payload);
    Ok(())
}

// =============================================================================
// LOCKED BALANCES
// =============================================================================

/// `integer_amount,unlockBlockNumber`
fn lock(host: &mut InvocationHost<'_>, storage: &TokenStorage, arg: &str) -> Result<(), ContractError> {
    check_state(storage)?;
    check_caller_frame_valid(host)?;
    check_allow_lock(storage)?;
    let args = parse_at_least_args(
        arg,
        2,
        "arg format error, need format is integer_amount,unlockBlockNumber",
    )?;
    let amount = BigNum::parse(field(&args, 1))?;
    if !amount.is_positive() {
        return Err(ContractError::validation("to lock amount must be positive integer"));
    }
    let unlock_block: u64 = field(&args, 2)
        .parse()
        .map_err(|_| ContractError::argument("unlock block number must be a non-negative integer"))?;
    if unlock_block < host.block_number() {
        return Err(ContractError::validation(format!(
            "to unlock block number can't be earlier than current block number {}",
            host.block_number()
        )));
    }

    let from = from_address(host);
    if from != host.caller_address() {
        return Err(ContractError::validation("only common user account can lock balance"));
    }
    let current = balance(host, &from)?;
    if current.is_zero() {
        return Err(ContractError::validation("your balance is 0"));
    }
    if amount > current {
        return Err(ContractError::validation("you have not enough balance to lock"));
    }
    if host.fast_map_get(fields::LOCKED_AMOUNTS, &from)?.is_some() {
        return Err(ContractError::validation(
            "you have locked balance now, before lock again, you need unlock them or use other address to lock",
        ));
    }

    let record = format!("{amount},{unlock_block}");
    host.fast_map_set(fields::LOCKED_AMOUNTS, &from, Some(&record))?;
    store_balance(host, &from, &current.sub(&amount))?;
    host.emit(event_names::LOCKED, amount.to_string());
    Ok(())
}

fn unlock(host: &mut InvocationHost<'_>, storage: &TokenStorage) -> Result<(), ContractError> {
    check_caller_frame_valid(host)?;
    let from = from_address(host);
    release_lock(host, storage, &from)
}

/// Any caller may release `addr`'s lock; funds only ever return to `addr`.
fn force_unlock(host: &mut InvocationHost<'_>, storage: &TokenStorage, addr: &str) -> Result<(), ContractError> {
    release_lock(host, storage, addr)
}

/// Returns `addr`'s locked amount to its balance once the unlock block is
/// reached.
fn release_lock(host: &mut InvocationHost<'_>, storage: &TokenStorage, addr: &str) -> Result<(), ContractError> {
    check_state(storage)?;
    check_caller_frame_valid(host)?;
    check_allow_lock(storage)?;
    if addr.is_empty() {
        return Err(ContractError::validation("unlockAdress should not be empty"));
    }
    let Some(record) = host.fast_map_get(fields::LOCKED_AMOUNTS, addr)? else {
        return Err(ContractError::validation("you have not locked balance"));
    };

    let parts = parse_at_least_args(&record, 2, "")
        .map_err(|_| ContractError::storage("locked amount info format error"))?;
    let amount = parse_stored(fields::LOCKED_AMOUNTS, addr, field(&parts, 1))?;
    let unlock_block: u64 = field(&parts, 2)
        .parse()
        .map_err(|_| ContractError::storage("locked amount info format error"))?;
    if host.block_number() < unlock_block {
        return Err(ContractError::validation(format!(
            "your locked balance only can be unlock after block #{unlock_block}"
        )));
    }

    host.fast_map_set(fields::LOCKED_AMOUNTS, addr, None)?;
    let current = balance(host, addr)?;
    store_balance(host, addr, &current.add(&amount))?;
    host.emit(event_names::UNLOCKED, format!("{addr},{record}"));
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
