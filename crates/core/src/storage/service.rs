//! Blob store implementation using Apache OpenDAL.

use std::time::Duration;

use opendal::{ErrorKind, Operator, services};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// First eight bytes of every PNG file.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Returns true when the payload starts with the PNG signature.
#[must_use]
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Object key under which a photo identifier is stored.
#[must_use]
pub fn object_key(id: Uuid) -> String {
    format!("{id}.png")
}

/// Blob store for photo objects.
///
/// Identifiers are generated here at save time; the relational index only
/// ever sees identifiers this store has produced.
pub struct BlobStore {
    operator: Operator,
    config: StorageConfig,
}

impl BlobStore {
    /// Create a new blob store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
                prefix,
            } => {
                let mut builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);
                if !prefix.is_empty() {
                    builder = builder.root(prefix);
                }

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
        }
    }

    /// Validate and persist a PNG payload under a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotPng` when the payload lacks the PNG signature, or an
    /// operation error if the write fails.
    pub async fn save(&self, bytes: Vec<u8>) -> Result<Uuid, StorageError> {
        if !is_png(&bytes) {
            return Err(StorageError::NotPng);
        }

        let id = Uuid::new_v4();
        self.operator
            .write(&object_key(id), bytes)
            .await
            .map_err(|e| StorageError::operation(e.to_string()))?;

        Ok(id)
    }

    /// Read the stored bytes for an identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no object exists for the identifier.
    pub async fn read(&self, id: Uuid) -> Result<Vec<u8>, StorageError> {
        let buffer = self
            .operator
            .read(&object_key(id))
            .await
            .map_err(|e| map_object_err(id, e))?;

        Ok(buffer.to_vec())
    }

    /// Remove the object for an identifier.
    ///
    /// Idempotent: returns false when no object existed, true when one was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage call itself fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let key = object_key(id);

        match self.operator.stat(&key).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(StorageError::operation(e.to_string())),
        }

        self.operator
            .delete(&key)
            .await
            .map_err(|e| StorageError::operation(e.to_string()))?;

        Ok(true)
    }

    /// Reference string a client can use to fetch the raw bytes.
    ///
    /// The local backend points at the service's own raw-fetch route; the
    /// S3 backend mints a time-limited signed URL. No existence check is
    /// made in either case.
    ///
    /// # Errors
    ///
    /// Returns an error if presigning fails (S3 backend).
    pub async fn locate(&self, id: Uuid) -> Result<String, StorageError> {
        match &self.config.provider {
            StorageProvider::LocalFs { .. } => Ok(format!("/photos/raw/{id}")),
            StorageProvider::S3 { .. } => {
                let ttl = Duration::from_secs(self.config.presign_ttl_secs);
                let presigned = self
                    .operator
                    .presign_read(&object_key(id), ttl)
                    .await
                    .map_err(|e| map_object_err(id, e))?;

                Ok(presigned.uri().to_string())
            }
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

/// Map an OpenDAL error on one object to a storage error carrying its id.
fn map_object_err(id: Uuid, err: opendal::Error) -> StorageError {
    match err.kind() {
        ErrorKind::NotFound => StorageError::not_found(id),
        ErrorKind::Unsupported => StorageError::PresignNotSupported,
        _ => StorageError::operation(err.to_string()),
    }
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Property: the PNG check accepts exactly the payloads carrying the
    // 8-byte signature prefix.
    proptest! {
        #[test]
        fn prop_is_png_matches_signature_prefix(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let expected = bytes.len() >= 8 && bytes[..8] == PNG_SIGNATURE;
            prop_assert_eq!(is_png(&bytes), expected);
        }
    }

    // Property: prefixing any payload with the signature makes it pass.
    proptest! {
        #[test]
        fn prop_signature_prefix_always_accepted(tail in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut bytes = PNG_SIGNATURE.to_vec();
            bytes.extend_from_slice(&tail);
            prop_assert!(is_png(&bytes));
        }
    }

    // Property: object keys parse back to the identifier they encode.
    proptest! {
        #[test]
        fn prop_object_key_roundtrips(seed in any::<u128>()) {
            let id = Uuid::from_u128(seed);
            let key = object_key(id);

            let stem = key.strip_suffix(".png").expect("key should end in .png");
            prop_assert_eq!(Uuid::parse_str(stem).expect("stem should be a uuid"), id);
        }
    }
}
