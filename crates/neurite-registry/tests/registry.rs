use std::sync::Arc;

use neurite_canonical::Did;
use neurite_registry::{
    open_registry_backend, IdentityRegistry, RegistryError, RegistryMode, SignatureEntry,
};
use serde_json::json;
use tempfile::TempDir;

fn did(value: &str) -> Did {
    Did::parse(value).unwrap()
}

fn signature(suite: &str, signer: &str) -> SignatureEntry {
    SignatureEntry {
        suite: suite.to_string(),
        signer: Some(signer.to_string()),
        signature: Some("c2ln".to_string()),
        created: None,
        purpose: Some("assertionMethod".to_string()),
    }
}

/// Runs the same assertions over both modes; behavior must be identical.
fn for_each_mode(check: impl Fn(IdentityRegistry, &str)) {
    let dir = TempDir::new().unwrap();
    let modes = [
        ("volatile", RegistryMode::Volatile),
        ("durable", RegistryMode::Durable(dir.path().join("registry.db"))),
    ];
    for (label, mode) in modes {
        let backend = open_registry_backend(&mode).unwrap();
        check(IdentityRegistry::new(backend), label);
    }
}

#[test]
fn register_then_resolve_round_trips() {
    for_each_mode(|registry, label| {
        let subject = did("did:neuro:subject-1");
        let document = json!({"id": "did:neuro:subject-1", "service": []});
        let signatures = vec![signature("ed25519-2020", "did:neuro:issuer-1")];

        let hash = registry
            .register(&subject, &document, signatures.clone())
            .unwrap();
        assert_eq!(hash.as_str().len(), 64, "mode {}", label);

        let resolved = registry.resolve(&subject).unwrap();
        assert_eq!(resolved.did, subject, "mode {}", label);
        assert_eq!(resolved.document, document, "mode {}", label);
        assert_eq!(resolved.signatures, signatures, "mode {}", label);
        assert!(resolved.attestations.is_empty(), "mode {}", label);
    });
}

#[test]
fn second_register_replaces_not_merges() {
    for_each_mode(|registry, label| {
        let subject = did("did:neuro:subject-2");
        registry
            .register(
                &subject,
                &json!({"v": 1}),
                vec![signature("ed25519-2020", "did:neuro:issuer-1")],
            )
            .unwrap();
        registry
            .register(
                &subject,
                &json!({"v": 2}),
                vec![signature("ecdsa-p256", "did:neuro:issuer-2")],
            )
            .unwrap();

        let resolved = registry.resolve(&subject).unwrap();
        assert_eq!(resolved.document, json!({"v": 2}), "mode {}", label);
        assert_eq!(resolved.signatures.len(), 1, "mode {}", label);
        assert_eq!(resolved.signatures[0].suite, "ecdsa-p256", "mode {}", label);
    });
}

#[test]
fn attestations_accumulate_in_order() {
    for_each_mode(|registry, label| {
        let subject = did("did:neuro:subject-3");
        registry.register(&subject, &json!({}), vec![]).unwrap();

        registry
            .attest(&subject, json!({"claim": "first"}), None)
            .unwrap();
        registry
            .attest(&subject, json!({"claim": "second"}), Some("c2ln".into()))
            .unwrap();

        let resolved = registry.resolve(&subject).unwrap();
        assert_eq!(resolved.attestations.len(), 2, "mode {}", label);
        assert_eq!(
            resolved.attestations[0].attestation,
            json!({"claim": "first"}),
            "mode {}",
            label
        );
        assert_eq!(
            resolved.attestations[1].attestation,
            json!({"claim": "second"}),
            "mode {}",
            label
        );
        assert_eq!(
            resolved.attestations[1].signature.as_deref(),
            Some("c2ln"),
            "mode {}",
            label
        );
    });
}

#[test]
fn unregistered_did_is_not_found() {
    for_each_mode(|registry, label| {
        let subject = did("did:neuro:ghost");
        match registry.resolve(&subject) {
            Err(RegistryError::NotFound { did }) => assert_eq!(did, subject, "mode {}", label),
            other => panic!("mode {}: expected NotFound, got {:?}", label, other.map(|_| ())),
        }
        match registry.attest(&subject, json!({}), None) {
            Err(RegistryError::NotFound { did }) => assert_eq!(did, subject, "mode {}", label),
            other => panic!("mode {}: expected NotFound, got {:?}", label, other),
        }
    });
}

#[test]
fn re_registration_keeps_attestation_history() {
    for_each_mode(|registry, label| {
        let subject = did("did:neuro:subject-4");
        registry.register(&subject, &json!({"v": 1}), vec![]).unwrap();
        registry
            .attest(&subject, json!({"claim": "early"}), None)
            .unwrap();
        registry.register(&subject, &json!({"v": 2}), vec![]).unwrap();

        let resolved = registry.resolve(&subject).unwrap();
        assert_eq!(resolved.document, json!({"v": 2}), "mode {}", label);
        assert_eq!(resolved.attestations.len(), 1, "mode {}", label);
    });
}

#[test]
fn register_returns_the_document_content_hash() {
    for_each_mode(|registry, label| {
        let subject = did("did:neuro:subject-5");
        let document = json!({"id": "did:neuro:subject-5"});
        let first = registry.register(&subject, &document, vec![]).unwrap();
        let second = registry.register(&subject, &document, vec![]).unwrap();
        assert_eq!(first, second, "mode {}", label);
    });
}

#[test]
fn durable_registry_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("registry.db");
    let subject = did("did:neuro:subject-6");

    {
        let backend = open_registry_backend(&RegistryMode::Durable(db_path.clone())).unwrap();
        let registry = IdentityRegistry::new(backend);
        registry.register(&subject, &json!({"v": 1}), vec![]).unwrap();
        registry.attest(&subject, json!({"claim": "kept"}), None).unwrap();
    }

    let backend = open_registry_backend(&RegistryMode::Durable(db_path)).unwrap();
    let registry = IdentityRegistry::new(backend);
    let resolved = registry.resolve(&subject).unwrap();
    assert_eq!(resolved.document, json!({"v": 1}));
    assert_eq!(resolved.attestations.len(), 1);
}

#[test]
fn concurrent_attestations_all_land() {
    let backend = open_registry_backend(&RegistryMode::Volatile).unwrap();
    let registry = Arc::new(IdentityRegistry::new(backend));
    let subject = did("did:neuro:subject-7");
    registry.register(&subject, &json!({}), vec![]).unwrap();

    let threads: Vec<_> = (0..8)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            let subject = subject.clone();
            std::thread::spawn(move || {
                registry
                    .attest(&subject, json!({"worker": worker}), None)
                    .unwrap();
            })
        })
        .collect();
    for handle in threads {
        handle.join().unwrap();
    }

    let resolved = registry.resolve(&subject).unwrap();
    assert_eq!(resolved.attestations.len(), 8);
}
