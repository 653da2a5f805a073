use soroban_sdk::{Env, Vec};
use types::position::{PositionRecord, RedemptionFailure};

use crate::constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use crate::types::{self, storage::DataKey};

fn extend(e: &Env, key: &DataKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub(crate) fn get_open_positions(e: &Env) -> Vec<u64> {
    e.storage()
        .persistent()
        .get(&DataKey::OpenPositions)
        .unwrap_or(Vec::new(e))
}

fn put_open_positions(e: &Env, handles: &Vec<u64>) {
    e.storage()
        .persistent()
        .set(&DataKey::OpenPositions, handles);
    extend(e, &DataKey::OpenPositions);
}

pub(crate) fn has_open_positions(e: &Env) -> bool {
    !get_open_positions(e).is_empty()
}

pub(crate) fn is_open(e: &Env, handle: u64) -> bool {
    get_open_positions(e).contains(handle)
}

pub(crate) fn get_position(e: &Env, handle: u64) -> Option<PositionRecord> {
    e.storage().persistent().get(&DataKey::Position(handle))
}

pub(crate) fn open_position(e: &Env, record: &PositionRecord) {
    let key = DataKey::Position(record.handle);
    e.storage().persistent().set(&key, record);
    extend(e, &key);

    let mut handles = get_open_positions(e);
    handles.push_back(record.handle);
    put_open_positions(e, &handles);
}

/// Removes `handle` from the open set. Returns false if it was not open.
pub(crate) fn close_position(e: &Env, handle: u64) -> bool {
    let mut handles = get_open_positions(e);
    match handles.first_index_of(handle) {
        Some(index) => {
            handles.remove(index);
            put_open_positions(e, &handles);
            true
        }
        None => false,
    }
}

/// Puts a handle back into the open set after its redemption failed.
pub(crate) fn reopen_position(e: &Env, handle: u64) {
    let mut handles = get_open_positions(e);
    if !handles.contains(handle) {
        handles.push_back(handle);
        put_open_positions(e, &handles);
    }
}

pub(crate) fn get_redemption_failure(e: &Env, handle: u64) -> Option<RedemptionFailure> {
    e.storage()
        .persistent()
        .get(&DataKey::RedemptionFailure(handle))
}

pub(crate) fn put_redemption_failure(e: &Env, handle: u64, reason: RedemptionFailure) {
    let key = DataKey::RedemptionFailure(handle);
    e.storage().persistent().set(&key, &reason);
    extend(e, &key);
}

pub(crate) fn clear_redemption_failure(e: &Env, handle: u64) {
    e.storage()
        .persistent()
        .remove(&DataKey::RedemptionFailure(handle));
}
