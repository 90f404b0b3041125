use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};
use object_store::path::Path as StorePath;
use object_store::signer::Signer;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use crate::application::ports::{BlobStore, StorageError};
use crate::domain::StorageKey;

/// Google Cloud Storage blob store with V4 signed read URLs.
pub struct GcsBlobStore {
    inner: Arc<GoogleCloudStorage>,
}

impl GcsBlobStore {
    pub fn new(bucket: &str, service_account_path: Option<&str>) -> Result<Self, StorageError> {
        let mut builder = GoogleCloudStorageBuilder::new().with_bucket_name(bucket);
        if let Some(path) = service_account_path {
            builder = builder.with_service_account_path(path);
        }
        let store = builder
            .build()
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(store),
        })
    }
}

#[async_trait]
impl BlobStore for GcsBlobStore {
    async fn put(
        &self,
        key: &StorageKey,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let path = StorePath::from(key.as_str());
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&path, PutPayload::from(data), options)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), StorageError> {
        let path = StorePath::from(key.as_str());
        match self.inner.delete(&path).await {
            Ok(()) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(e.to_string())),
        }
    }

    async fn signed_read_url(
        &self,
        key: &StorageKey,
        ttl: Duration,
    ) -> Result<String, StorageError> {
        let path = StorePath::from(key.as_str());
        let url = self
            .inner
            .signed_url(Method::GET, &path, ttl)
            .await
            .map_err(|e| StorageError::SignFailed(e.to_string()))?;
        Ok(url.to_string())
    }

    async fn exists(&self, key: &StorageKey) -> Result<bool, StorageError> {
        let path = StorePath::from(key.as_str());
        match self.inner.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::HeadFailed(e.to_string())),
        }
    }
}
