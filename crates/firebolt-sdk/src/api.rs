//! Declarative descriptors for module members.
//!
//! A module is a set of `const` descriptors; the generic gateway core does the
//! work. Each descriptor knows its wire names and its payload types.

use crate::registry::{MethodInfo, MethodKind};
use firebolt_gateway::{
    change_event_name, method_name, setter_name, typed_provider, FireboltResult, Gateway,
    ListenerId, Registration,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

/// Property access marker
pub trait Access {
    const WRITABLE: bool;
}

/// Property with a getter and change event only
pub struct ReadOnly;

/// Property that also has a setter
pub struct ReadWrite;

impl Access for ReadOnly {
    const WRITABLE: bool = false;
}

impl Access for ReadWrite {
    const WRITABLE: bool = true;
}

/// A named property of type `T`
pub struct Property<T, A = ReadOnly> {
    module: &'static str,
    name: &'static str,
    _marker: PhantomData<fn() -> (T, A)>,
}

impl<T, A: Access> Property<T, A> {
    pub const fn new(module: &'static str, name: &'static str) -> Self {
        Self {
            module,
            name,
            _marker: PhantomData,
        }
    }

    pub const fn module(&self) -> &'static str {
        self.module
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Getter wire name
    pub fn method(&self) -> String {
        method_name(self.module, self.name)
    }

    /// Change notification wire name
    pub fn change_event(&self) -> String {
        change_event_name(self.module, self.name)
    }

    /// Read the current value
    pub async fn get(&self, gateway: &Gateway) -> FireboltResult<T>
    where
        T: DeserializeOwned,
    {
        gateway.properties(self.module).get_as(self.name).await
    }

    /// Listen for changes
    pub async fn on_change<F>(&self, gateway: &Gateway, listener: F) -> FireboltResult<ListenerId>
    where
        T: DeserializeOwned,
        F: Fn(T) + Send + Sync + 'static,
    {
        gateway
            .events()
            .subscribe_as(&self.change_event(), listener)
            .await
    }

    /// Stop listening for changes
    pub async fn off_change(&self, gateway: &Gateway, id: ListenerId) -> FireboltResult<()> {
        gateway.events().unsubscribe(&self.change_event(), id).await
    }

    pub(crate) fn entries(&self) -> Vec<MethodInfo> {
        let mut entries = vec![
            MethodInfo::new(self.method(), self.module, MethodKind::Getter),
            MethodInfo::new(self.change_event(), self.module, MethodKind::Event),
        ];
        if A::WRITABLE {
            entries.push(MethodInfo::new(
                setter_name(self.module, self.name),
                self.module,
                MethodKind::Setter,
            ));
        }
        entries
    }
}

impl<T: Serialize> Property<T, ReadWrite> {
    /// Write a new value
    pub async fn set(&self, gateway: &Gateway, value: &T) -> FireboltResult<()> {
        gateway.properties(self.module).set_as(self.name, value).await
    }

    /// Setter wire name
    pub fn setter(&self) -> String {
        setter_name(self.module, self.name)
    }
}

/// A callable method taking `P` and returning `R`
pub struct Method<P, R> {
    module: &'static str,
    name: &'static str,
    timeout: Option<Duration>,
    _marker: PhantomData<fn(P) -> R>,
}

impl<P, R> Clone for Method<P, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, R> Copy for Method<P, R> {}

impl<P, R> Method<P, R> {
    pub const fn new(module: &'static str, name: &'static str) -> Self {
        Self {
            module,
            name,
            timeout: None,
            _marker: PhantomData,
        }
    }

    /// Override the gateway's default deadline
    pub const fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            module: self.module,
            name: self.name,
            timeout: Some(timeout),
            _marker: PhantomData,
        }
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn method(&self) -> String {
        method_name(self.module, self.name)
    }

    pub(crate) fn entries(&self) -> Vec<MethodInfo> {
        vec![MethodInfo::new(self.method(), self.module, MethodKind::Method)
            .with_timeout(self.timeout)]
    }
}

impl<P: Serialize, R: DeserializeOwned> Method<P, R> {
    pub async fn call(&self, gateway: &Gateway, params: &P) -> FireboltResult<R> {
        gateway
            .call_typed(&self.method(), params, self.timeout)
            .await
    }
}

/// A named event carrying `T`
pub struct Event<T> {
    module: &'static str,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Event<T> {
    pub const fn new(module: &'static str, name: &'static str) -> Self {
        Self {
            module,
            name,
            _marker: PhantomData,
        }
    }

    pub fn event(&self) -> String {
        method_name(self.module, self.name)
    }

    pub async fn unsubscribe(&self, gateway: &Gateway, id: ListenerId) -> FireboltResult<()> {
        gateway.events().unsubscribe(&self.event(), id).await
    }

    pub(crate) fn entries(&self) -> Vec<MethodInfo> {
        vec![MethodInfo::new(self.event(), self.module, MethodKind::Event)]
    }
}

impl<T: DeserializeOwned> Event<T> {
    pub async fn subscribe<F>(&self, gateway: &Gateway, listener: F) -> FireboltResult<ListenerId>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        gateway.events().subscribe_as(&self.event(), listener).await
    }
}

/// Provider capability event: platform calls carrying `P`, answered with `R`
pub struct ProviderEvent<P, R> {
    module: &'static str,
    name: &'static str,
    _marker: PhantomData<fn(P) -> R>,
}

impl<P, R> ProviderEvent<P, R> {
    pub const fn new(module: &'static str, name: &'static str) -> Self {
        Self {
            module,
            name,
            _marker: PhantomData,
        }
    }

    pub fn event(&self) -> String {
        method_name(self.module, self.name)
    }

    /// Withdraw this capability
    pub async fn revoke(&self, gateway: &Gateway) -> FireboltResult<bool> {
        gateway.providers().revoke(&self.event()).await
    }

    pub(crate) fn entries(&self) -> Vec<MethodInfo> {
        vec![MethodInfo::new(self.event(), self.module, MethodKind::Provider)]
    }
}

impl<P, R> ProviderEvent<P, R>
where
    P: DeserializeOwned + Send + 'static,
    R: Serialize + 'static,
{
    /// Answer platform calls for this capability with `handler`
    pub async fn provide<F, Fut>(&self, gateway: &Gateway, handler: F) -> FireboltResult<Registration>
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FireboltResult<R>> + Send + 'static,
    {
        gateway
            .providers()
            .provide(&self.event(), typed_provider(handler))
            .await
    }
}
