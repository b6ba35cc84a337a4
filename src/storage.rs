use anyhow::anyhow;
use async_trait::async_trait;
use aws_sdk_s3::presigning::config::PresigningConfig;
use std::time::Duration;

use crate::{config::AppConfig, constants::*};

#[cfg(test)]
use mockall::automock;

/// Blob store holding the uploaded images
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `data` under `path` and returns a signed url to read it back
    async fn upload(&self, data: Vec<u8>, path: &str, content_type: &str)
        -> anyhow::Result<String>;
}

pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Storage {
    /// Credentials and region come from the standard AWS environment
    pub async fn new(config: &AppConfig) -> Self {
        let sdk_config = aws_config::load_from_env().await;
        let client = aws_sdk_s3::Client::new(&sdk_config);
        Self {
            client,
            bucket: config.aws_bucket.to_owned(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(
        &self,
        data: Vec<u8>,
        path: &str,
        content_type: &str,
    ) -> anyhow::Result<String> {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let resp = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(data.into())
            .content_type(content_type)
            .content_disposition(format!("inline; filename={file_name}"))
            .cache_control(IMAGE_CACHE_CONTROL)
            .send()
            .await
            .map_err(|err| anyhow!("unable to upload `{path}`: {err}"))?;
        tracing::debug!("{:?}", resp);
        let expires_in = Duration::from_secs(SIGNED_URL_EXPIRY_SECS);
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .presigned(PresigningConfig::expires_in(expires_in)?)
            .await
            .map_err(|err| anyhow!("unable to sign url for `{path}`: {err}"))?;
        Ok(presigned.uri().to_string())
    }
}
