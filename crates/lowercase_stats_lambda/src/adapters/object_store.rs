use aws_sdk_s3::error::DisplayErrorContext;

/// Read side of the blob store holding the uploaded objects.
pub trait ObjectFetcher: Send + Sync {
    fn fetch_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, String>;
}

pub struct S3ObjectFetcher {
    s3_client: aws_sdk_s3::Client,
}

impl S3ObjectFetcher {
    pub fn new(s3_client: aws_sdk_s3::Client) -> Self {
        Self { s3_client }
    }
}

impl ObjectFetcher for S3ObjectFetcher {
    fn fetch_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, String> {
        let bucket = bucket.to_string();
        let object_key = key.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_object()
                    .bucket(bucket)
                    .key(object_key)
                    .send()
                    .await
                    .map_err(|error| {
                        format!(
                            "failed to read object from s3: {}",
                            DisplayErrorContext(&error)
                        )
                    })?;
                let body = output
                    .body
                    .collect()
                    .await
                    .map_err(|error| format!("failed to read object body from s3: {error}"))?;
                Ok::<_, String>(body.into_bytes().to_vec())
            })
        })
    }
}
