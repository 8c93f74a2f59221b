//! In-memory management session for testing.
//!
//! Behaves like a server for the purposes of the command protocol:
//! duplicate adds fail, removals flag a pending reload, and every call is
//! recorded so tests can assert on the exact step sequence.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::Address;
use crate::values::{AttributeValue, ValueSet};

use super::{Administration, ManagementSession, SessionError};

/// A recorded session call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `exists(address)`
    Exists(Address),
    /// `add(address, ..)`
    Add(Address),
    /// `remove_if_exists(address)`
    Remove(Address),
    /// `query(address, attribute)`
    Query(Address, String),
    /// `reload_if_required()`
    ReloadIfRequired,
    /// A reload actually happened.
    Reload,
}

/// Mock implementation of [`ManagementSession`] and [`Administration`].
#[derive(Debug, Default)]
pub struct InMemorySession {
    nodes: Mutex<HashMap<Address, ValueSet>>,
    calls: Mutex<Vec<Call>>,
    reload_pending: AtomicBool,
    reloads: AtomicUsize,
    rejected_attribute: Mutex<Option<String>>,
    unavailable: AtomicBool,
}

impl InMemorySession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `add` fail with `InvalidAttributes` whenever the payload sets `attribute`.
    pub fn reject_attribute(&self, attribute: impl Into<String>) {
        *self.rejected_attribute.lock().unwrap() = Some(attribute.into());
    }

    /// Makes every call fail with a transport error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Inserts a node directly, bypassing the recorded calls.
    pub fn seed(&self, address: Address, values: ValueSet) {
        self.nodes.lock().unwrap().insert(address, values);
    }

    /// Returns the attributes of the node at `address`.
    #[must_use]
    pub fn node(&self, address: &Address) -> Option<ValueSet> {
        self.nodes.lock().unwrap().get(address).cloned()
    }

    /// Number of nodes currently present.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.lock().unwrap().len()
    }

    /// All recorded calls in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of reloads performed.
    #[must_use]
    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) -> Result<(), SessionError> {
        self.calls.lock().unwrap().push(call);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SessionError::Transport(super::HttpError::Timeout));
        }
        Ok(())
    }
}

impl ManagementSession for InMemorySession {
    async fn exists(&self, address: &Address) -> Result<bool, SessionError> {
        self.record(Call::Exists(address.clone()))?;
        Ok(self.nodes.lock().unwrap().contains_key(address))
    }

    async fn add(&self, address: &Address, values: &ValueSet) -> Result<(), SessionError> {
        self.record(Call::Add(address.clone()))?;

        if let Some(attribute) = self.rejected_attribute.lock().unwrap().as_deref() {
            if values.contains(attribute) {
                return Err(SessionError::InvalidAttributes {
                    address: address.clone(),
                    detail: format!("'{attribute}' rejected"),
                });
            }
        }

        let mut nodes = self.nodes.lock().unwrap();
        if nodes.contains_key(address) {
            return Err(SessionError::DuplicateResource {
                address: address.clone(),
            });
        }
        nodes.insert(address.clone(), values.clone());
        Ok(())
    }

    async fn remove_if_exists(&self, address: &Address) -> Result<bool, SessionError> {
        self.record(Call::Remove(address.clone()))?;
        let removed = self.nodes.lock().unwrap().remove(address).is_some();
        if removed {
            self.reload_pending.store(true, Ordering::SeqCst);
        }
        Ok(removed)
    }

    async fn query(
        &self,
        address: &Address,
        attribute: &str,
    ) -> Result<AttributeValue, SessionError> {
        self.record(Call::Query(address.clone(), attribute.to_string()))?;
        self.nodes
            .lock()
            .unwrap()
            .get(address)
            .and_then(|values| values.get(attribute).cloned())
            .ok_or_else(|| SessionError::NotFound {
                address: address.clone(),
                attribute: attribute.to_string(),
            })
    }
}

impl Administration for InMemorySession {
    async fn reload_if_required(&self) -> Result<bool, SessionError> {
        self.record(Call::ReloadIfRequired)?;
        if !self.reload_pending.swap(false, Ordering::SeqCst) {
            return Ok(false);
        }
        self.reload().await?;
        Ok(true)
    }

    async fn reload(&self) -> Result<(), SessionError> {
        self.record(Call::Reload)?;
        self.reload_pending.store(false, Ordering::SeqCst);
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
