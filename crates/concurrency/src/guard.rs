//! CAS concurrency guard
//!
//! Optimistic concurrency for single-key mutations. The guard does two
//! things and holds no state of its own:
//!
//! 1. Turns a caller's intent (store mode + optional CAS) into the
//!    [`Precondition`] sent to the provider.
//! 2. Evaluates a precondition against the key's current CAS, as reported
//!    fresh by the provider for each call.
//!
//! ## Precondition Modes
//!
//! | Mode | Key absent | Key present, CAS matches | Key present, CAS differs |
//! |------|------------|--------------------------|--------------------------|
//! | BlindSet | store | store | store |
//! | BlindSet + CAS | KeyExists | store | KeyExists |
//! | CreateOnly | store | KeyExists | KeyExists |
//! | ReplaceOnly | KeyNotFound | store | store |
//! | ReplaceOnly + CAS | KeyNotFound | store | KeyExists |
//!
//! CAS mismatch and "already exists" share one status: both mean an
//! expectation about the key's existing state was violated, and which
//! expectation is already known from the requested mode.
//!
//! Two writers racing on one key will both pass the caller-side checks and
//! one of them will fail at the provider with `KeyExists`. That is the
//! expected outcome of optimistic concurrency.

use stratakv_core::{Cas, Status};
use thiserror::Error;

/// Store operation requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreMode {
    /// Write unconditionally (compare-and-swap when a CAS is given)
    Set,
    /// Write only if the key does not exist
    Add,
    /// Write only if the key exists
    Replace,
}

impl StoreMode {
    /// Operation name used in logs
    pub fn name(self) -> &'static str {
        match self {
            StoreMode::Set => "set",
            StoreMode::Add => "add",
            StoreMode::Replace => "replace",
        }
    }
}

/// Existence precondition sent to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreconditionMode {
    /// No existence requirement
    BlindSet,
    /// Key must not exist
    CreateOnly,
    /// Key must exist
    ReplaceOnly,
}

/// Full precondition for one store: existence mode plus optional CAS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precondition {
    /// Existence requirement
    pub mode: PreconditionMode,
    /// CAS the stored value must currently carry
    pub expected_cas: Option<Cas>,
}

impl Precondition {
    /// Unconditional write
    pub const BLIND: Precondition = Precondition {
        mode: PreconditionMode::BlindSet,
        expected_cas: None,
    };

    /// Whether this precondition compares CAS tokens
    pub fn is_compare_and_swap(&self) -> bool {
        self.expected_cas.is_some()
    }
}

/// Caller intent the guard refuses to translate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardError {
    /// A CAS was supplied to a create-only store
    #[error("cas is not allowed with add: a key that must not exist has no CAS to compare")]
    CasWithAdd,
}

impl GuardError {
    /// Status recorded on the rejected key
    pub fn status(&self) -> Status {
        Status::InvalidArgument
    }
}

/// Stateless CAS precondition guard
#[derive(Debug, Clone, Copy, Default)]
pub struct CasGuard;

impl CasGuard {
    /// Precondition for a store in `mode` with a caller-supplied CAS
    ///
    /// A zero CAS means "no CAS".
    ///
    /// # Errors
    ///
    /// [`GuardError::CasWithAdd`] when a non-zero CAS is combined with
    /// [`StoreMode::Add`].
    pub fn for_store(mode: StoreMode, cas: Option<Cas>) -> Result<Precondition, GuardError> {
        let expected_cas = Cas::normalize(cas);
        let mode = match mode {
            StoreMode::Set => PreconditionMode::BlindSet,
            StoreMode::Replace => PreconditionMode::ReplaceOnly,
            StoreMode::Add if expected_cas.is_some() => return Err(GuardError::CasWithAdd),
            StoreMode::Add => PreconditionMode::CreateOnly,
        };
        Ok(Precondition { mode, expected_cas })
    }

    /// Evaluate a store precondition against the key's current CAS
    ///
    /// `current` is `None` when the key has no live value. Returns
    /// [`Status::Success`] when the write may proceed.
    pub fn check_store(precondition: &Precondition, current: Option<Cas>) -> Status {
        let cas_matches = |expected: Cas| current == Some(expected);
        match (precondition.mode, precondition.expected_cas) {
            (PreconditionMode::CreateOnly, Some(_)) => Status::InvalidArgument,
            (PreconditionMode::CreateOnly, None) => match current {
                Some(_) => Status::KeyExists,
                None => Status::Success,
            },
            (PreconditionMode::ReplaceOnly, _) if current.is_none() => Status::KeyNotFound,
            (_, Some(expected)) if !cas_matches(expected) => Status::KeyExists,
            _ => Status::Success,
        }
    }

    /// Evaluate a delete against the key's current CAS
    pub fn check_delete(expected_cas: Option<Cas>, current: Option<Cas>) -> Status {
        match (Cas::normalize(expected_cas), current) {
            (_, None) => Status::KeyNotFound,
            (Some(expected), Some(actual)) if expected != actual => Status::KeyExists,
            _ => Status::Success,
        }
    }

    /// Interpret a provider status relative to the precondition sent
    ///
    /// Providers that only say "not stored" leave it to the caller to know
    /// which expectation failed; the requested mode settles it.
    pub fn interpret(precondition: &Precondition, status: Status) -> Status {
        let replace_only = precondition.mode == PreconditionMode::ReplaceOnly;
        match (status.normalize(), precondition.mode) {
            (Status::NotStored, PreconditionMode::CreateOnly) => Status::KeyExists,
            (Status::NotStored, _) if replace_only && !precondition.is_compare_and_swap() => {
                Status::KeyNotFound
            }
            (Status::NotStored, _) if precondition.is_compare_and_swap() => Status::KeyExists,
            (status, _) => status,
        }
    }
}
