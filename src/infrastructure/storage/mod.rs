mod gcs_blob_store;
mod local_blob_store;

pub use gcs_blob_store::GcsBlobStore;
pub use local_blob_store::LocalBlobStore;
