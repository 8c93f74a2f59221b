//! Tests for the upsert protocol and batch dispatch.

use serde_json::json;

use crate::Address;
use crate::command::{
    Backend, Command, CommandError, Dispatcher, Step, add_transform, apply_live, apply_offline,
};
use crate::document::mock::MemoryDocument;
use crate::document::{TransformRegistry, add_resource};
use crate::session::mock::{Call, InMemorySession};
use crate::values::{Scalar, ValueSet};

/// Minimal key-store command used to drive the protocol.
#[derive(Debug, Clone)]
struct KeyStore {
    name: String,
    store_type: Option<String>,
    replace_existing: bool,
    offline: bool,
}

impl KeyStore {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            store_type: Some("JKS".to_string()),
            replace_existing: false,
            offline: true,
        }
    }

    fn with_type(mut self, store_type: Option<&str>) -> Self {
        self.store_type = store_type.map(str::to_string);
        self
    }

    const fn replacing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    const fn live_only(mut self) -> Self {
        self.offline = false;
        self
    }
}

impl Command for KeyStore {
    fn kind(&self) -> &'static str {
        "key-store"
    }

    fn address(&self) -> Address {
        Address::subsystem("elytron").and("key-store", &self.name)
    }

    fn values(&self) -> ValueSet {
        ValueSet::empty()
            .and_optional("type", self.store_type.as_deref())
            .and_list_optional("providers", ["a", "b"])
    }

    fn replace_existing(&self) -> bool {
        self.replace_existing
    }

    fn offline(&self) -> Option<crate::document::Transform> {
        if self.offline {
            add_transform("add-key-store", self)
        } else {
            None
        }
    }
}

fn key_store_address(name: &str) -> Address {
    Address::subsystem("elytron").and("key-store", name)
}

fn document() -> MemoryDocument {
    MemoryDocument::new(
        json!({"subsystem": {"elytron": {}}}),
        TransformRegistry::new().with("add-key-store", add_resource("key-store")),
    )
}

mod live {
    use super::*;

    #[tokio::test]
    async fn creates_missing_node_with_literal_attributes() {
        let session = InMemorySession::new();
        let command = KeyStore::new("ks");

        apply_live(&command, &session, &session).await.unwrap();

        let address = key_store_address("ks");
        let node = session.node(&address).unwrap();
        assert_eq!(node.get("type").and_then(|v| v.as_scalar()), Some(&Scalar::from("JKS")));
        assert_eq!(session.calls(), [Call::Add(address)]);
    }

    #[tokio::test]
    async fn unset_optional_attribute_is_absent() {
        let session = InMemorySession::new();

        apply_live(&KeyStore::new("ks").with_type(None), &session, &session)
            .await
            .unwrap();

        let node = session.node(&key_store_address("ks")).unwrap();
        assert!(!node.contains("type"));
    }

    #[tokio::test]
    async fn second_apply_without_replace_is_duplicate_and_keeps_node() {
        let session = InMemorySession::new();
        let first = KeyStore::new("ks");
        apply_live(&first, &session, &session).await.unwrap();
        let before = session.node(&key_store_address("ks"));

        let err = apply_live(&first.clone().with_type(Some("PKCS12")), &session, &session)
            .await
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(err.step(), Some(Step::Add));
        assert_eq!(session.node(&key_store_address("ks")), before);
    }

    #[tokio::test]
    async fn replace_removes_reloads_then_adds() {
        let session = InMemorySession::new();
        apply_live(&KeyStore::new("ks"), &session, &session)
            .await
            .unwrap();

        let replacement = KeyStore::new("ks").with_type(Some("PKCS12")).replacing();
        apply_live(&replacement, &session, &session).await.unwrap();

        let address = key_store_address("ks");
        assert_eq!(
            session.calls()[1..],
            [
                Call::Remove(address.clone()),
                Call::ReloadIfRequired,
                Call::Reload,
                Call::Add(address.clone()),
            ]
        );
        assert_eq!(session.node_count(), 1);
        assert_eq!(session.node(&address).unwrap(), replacement.values());
    }

    #[tokio::test]
    async fn replace_of_missing_node_skips_reload() {
        let session = InMemorySession::new();

        apply_live(&KeyStore::new("ks").replacing(), &session, &session)
            .await
            .unwrap();

        assert_eq!(session.reloads(), 0);
        assert!(session.node(&key_store_address("ks")).is_some());
    }

    #[tokio::test]
    async fn failed_add_after_remove_is_not_rolled_back() {
        let session = InMemorySession::new();
        apply_live(&KeyStore::new("ks"), &session, &session)
            .await
            .unwrap();
        session.reject_attribute("type");

        let err = apply_live(&KeyStore::new("ks").replacing(), &session, &session)
            .await
            .unwrap_err();

        assert_eq!(err.step(), Some(Step::Add));
        assert!(!err.is_duplicate());
        assert!(session.node(&key_store_address("ks")).is_none());
    }

    #[tokio::test]
    async fn transport_failure_names_address_and_step() {
        let session = InMemorySession::new();
        session.set_unavailable(true);

        let err = apply_live(&KeyStore::new("ks").replacing(), &session, &session)
            .await
            .unwrap_err();

        match err {
            CommandError::Failed { address, step, .. } => {
                assert_eq!(address, key_store_address("ks"));
                assert_eq!(step, Step::Remove);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

mod offline {
    use super::*;

    #[test]
    fn add_transform_locates_parent_and_carries_name_and_flag() {
        let transform = KeyStore::new("ks").replacing().offline().unwrap();

        assert_eq!(transform.id(), "add-key-store");
        assert_eq!(transform.locator(), &Address::subsystem("elytron"));
        let params: Vec<_> = transform.parameters().iter().collect();
        assert_eq!(
            params,
            [
                ("name", "ks"),
                ("type", "JKS"),
                ("providers", "a b"),
                ("replace-existing", "true"),
            ]
        );
    }

    #[test]
    fn add_transform_needs_a_parent() {
        #[derive(Debug)]
        struct Root;
        impl Command for Root {
            fn kind(&self) -> &'static str {
                "root"
            }
            fn address(&self) -> Address {
                Address::root("subsystem", "elytron")
            }
            fn values(&self) -> ValueSet {
                ValueSet::empty()
            }
            fn replace_existing(&self) -> bool {
                false
            }
        }

        assert!(add_transform("add-root", &Root).is_none());
    }

    #[tokio::test]
    async fn produces_same_node_as_live_path() {
        let document = document();

        apply_offline(&KeyStore::new("ks"), &document).await.unwrap();

        assert_eq!(
            document.snapshot()["subsystem"]["elytron"]["key-store"]["ks"],
            json!({"type": "JKS", "providers": "a b"})
        );
    }

    #[tokio::test]
    async fn duplicate_without_replace_surfaces_unchanged() {
        let document = document();
        apply_offline(&KeyStore::new("ks"), &document).await.unwrap();

        let err = apply_offline(&KeyStore::new("ks").with_type(Some("PKCS12")), &document)
            .await
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(
            document.snapshot()["subsystem"]["elytron"]["key-store"]["ks"]["type"],
            "JKS"
        );
    }

    #[tokio::test]
    async fn replace_overwrites_wholesale() {
        let document = document();
        apply_offline(&KeyStore::new("ks"), &document).await.unwrap();

        apply_offline(&KeyStore::new("ks").with_type(None).replacing(), &document)
            .await
            .unwrap();

        assert_eq!(
            document.snapshot()["subsystem"]["elytron"]["key-store"]["ks"],
            json!({"providers": "a b"})
        );
    }

    #[tokio::test]
    async fn live_only_command_is_unsupported_without_touching_document() {
        let document = document();

        let err = apply_offline(&KeyStore::new("ks").live_only(), &document)
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::Unsupported { command: "key-store", .. }));
        assert!(document.applied().is_empty());
    }
}

mod dispatcher {
    use super::*;

    #[tokio::test]
    async fn applies_live_batch_in_order() {
        let session = InMemorySession::new();
        let dispatcher = Dispatcher::default()
            .with(KeyStore::new("first"))
            .with(KeyStore::new("second"));

        let applied = dispatcher
            .dispatch(Backend::<_, MemoryDocument>::Live(&session))
            .await
            .unwrap();

        assert_eq!(applied, 2);
        assert_eq!(
            session.calls(),
            [
                Call::Add(key_store_address("first")),
                Call::Add(key_store_address("second")),
            ]
        );
    }

    #[tokio::test]
    async fn stops_at_first_failure_and_keeps_earlier_commands() {
        let session = InMemorySession::new();
        let dispatcher = Dispatcher::default()
            .with(KeyStore::new("a"))
            .with(KeyStore::new("a"))
            .with(KeyStore::new("b"));

        let err = dispatcher
            .dispatch(Backend::<_, MemoryDocument>::Live(&session))
            .await
            .unwrap_err();

        assert_eq!(err.index, 1);
        assert!(err.source.is_duplicate());
        assert!(session.node(&key_store_address("a")).is_some());
        assert!(session.node(&key_store_address("b")).is_none());
    }

    #[tokio::test]
    async fn offline_batch_fails_fast_on_live_only_command() {
        let document = document();
        let dispatcher = Dispatcher::default()
            .with(KeyStore::new("a"))
            .with(KeyStore::new("b").live_only());

        let err = dispatcher
            .dispatch(Backend::<InMemorySession, _>::Offline(&document))
            .await
            .unwrap_err();

        assert_eq!(err.index, 1);
        assert!(matches!(err.source, CommandError::Unsupported { .. }));
        assert!(document.applied().is_empty());
    }

    #[tokio::test]
    async fn offline_batch_applies_every_transform() {
        let document = document();
        let dispatcher = Dispatcher::default()
            .with(KeyStore::new("a"))
            .with(KeyStore::new("b"));

        dispatcher
            .dispatch(Backend::<InMemorySession, _>::Offline(&document))
            .await
            .unwrap();

        let stores = document.snapshot()["subsystem"]["elytron"]["key-store"].clone();
        let names: Vec<_> = stores.as_object().unwrap().keys().cloned().collect();
        assert_eq!(names, ["a", "b"]);
    }
}
