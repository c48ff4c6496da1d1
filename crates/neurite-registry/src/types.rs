//! Record types held by the registry.

use neurite_canonical::{Did, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A signature over a DID document.
///
/// Every member is informational; nothing here is verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    /// Signature suite (e.g. `ed25519-2020`).
    pub suite: String,
    /// Identifier of the signer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,
    /// Raw signature value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// When the signature was created, as supplied by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Stated purpose (e.g. `assertionMethod`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// A third-party claim appended to a DID's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    /// The claim payload.
    pub attestation: Value,
    /// Optional raw signature over the claim; stored, not verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// When the registry accepted the claim.
    pub created_at: Timestamp,
}

/// Full current state of a DID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDid {
    /// The resolved identifier.
    pub did: Did,
    /// Current identity document (last registration wins).
    pub document: Value,
    /// Signature set from the last registration.
    pub signatures: Vec<SignatureEntry>,
    /// Complete attestation history in acceptance order.
    pub attestations: Vec<Attestation>,
}
