//! Client certificates.
//!
//! The canonical export carries a certificate with its payload inline. The
//! store keeps two records per certificate: a small index record used for
//! listings and a payload record holding the certificate material. Both share
//! the same `_id`.

use serde::{Deserialize, Serialize};

use super::entity::{EntityMeta, impl_entity, require};

/// Container format of the certificate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateType {
    /// PKCS #12 bundle (binary, carried as base64).
    #[default]
    P12,
    /// PEM encoded certificate and key.
    Pem,
}

/// One piece of certificate material.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateMaterial {
    /// PEM text, or base64 of the binary container.
    #[serde(default)]
    pub data: String,
    /// Passphrase protecting the material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
}

/// A client certificate as it appears in the canonical export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCertificate {
    /// Identity and revision metadata.
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Container format.
    #[serde(rename = "type", default)]
    pub cert_type: CertificateType,
    /// Certificate material.
    #[serde(default)]
    pub cert: CertificateMaterial,
    /// Private key material (PEM certificates only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<CertificateMaterial>,
}

impl ClientCertificate {
    /// Creates a certificate from its material.
    #[must_use]
    pub fn new(name: impl Into<String>, cert_type: CertificateType, data: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::default(),
            name: name.into(),
            cert_type,
            cert: CertificateMaterial {
                data: data.into(),
                passphrase: None,
            },
            key: None,
        }
    }

    /// Returns the index record stored for listings.
    #[must_use]
    pub fn index_record(&self) -> ClientCertificateIndex {
        ClientCertificateIndex {
            meta: EntityMeta {
                id: self.meta.id.clone(),
                rev: None,
                created: self.meta.created,
                updated: self.meta.updated,
            },
            name: self.name.clone(),
            cert_type: self.cert_type,
            data_key: self.meta.id.clone().unwrap_or_default(),
        }
    }

    /// Returns the payload record linked to the index record by id.
    #[must_use]
    pub fn data_record(&self) -> ClientCertificateData {
        ClientCertificateData {
            meta: EntityMeta {
                id: self.meta.id.clone(),
                rev: None,
                created: self.meta.created,
                updated: self.meta.updated,
            },
            cert: self.cert.clone(),
            key: self.key.clone(),
        }
    }
}

fn validate_certificate(certificate: &ClientCertificate) -> std::result::Result<(), String> {
    require("cert.data", &certificate.cert.data)
}

impl_entity!(ClientCertificate, validate_certificate);

/// Listing record of a client certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCertificateIndex {
    /// Identity and revision metadata.
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Container format.
    #[serde(rename = "type", default)]
    pub cert_type: CertificateType,
    /// Id of the payload record.
    #[serde(default)]
    pub data_key: String,
}

fn validate_index(index: &ClientCertificateIndex) -> std::result::Result<(), String> {
    require("dataKey", &index.data_key)
}

impl_entity!(ClientCertificateIndex, validate_index);

/// Payload record of a client certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCertificateData {
    /// Identity and revision metadata.
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Certificate material.
    #[serde(default)]
    pub cert: CertificateMaterial,
    /// Private key material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<CertificateMaterial>,
}

impl_entity!(ClientCertificateData);
