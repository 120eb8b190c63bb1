use serde::Serialize;

/// Upload areas for images referenced by records.
pub const UPLOAD_BUCKETS: &[&str] = &["member-photos", "blog-covers", "gear-images"];

/// A stored upload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Object key inside the blob store.
    #[schema(example = "member-photos/0192f3c1-7d2a-7c4e-9a51-3b1f0e2d4c6a.jpg")]
    pub key: String,
    /// Public URL to save on the record.
    #[schema(example = "/media/member-photos/0192f3c1-7d2a-7c4e-9a51-3b1f0e2d4c6a.jpg")]
    pub url: String,
}
