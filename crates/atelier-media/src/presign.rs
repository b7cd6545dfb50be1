// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AWS SigV4 query-string presigning for PUT uploads.
//!
//! Pure computation — the server never proxies upload bytes. The browser
//! PUTs directly to the bucket with the returned URL, which stays valid
//! for fifteen minutes and pins the content type it was signed for.

use atelier_config::model::MediaConfig;
use atelier_core::AtelierError;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Presigned-URL validity window in seconds.
const EXPIRES_SECS: u32 = 900;

/// A URL pair for one upload: where to PUT, and where the object will be
/// publicly served from afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUpload {
    pub upload_url: String,
    pub public_url: String,
}

/// Presigner for one S3-compatible bucket (Cloudflare R2 shaped:
/// virtual-hosted `{bucket}.{account_id}.r2.cloudflarestorage.com`).
pub struct BucketPresigner {
    access_key_id: String,
    secret_access_key: String,
    host: String,
    region: String,
    public_base_url: String,
}

impl BucketPresigner {
    /// Build a presigner from config. Fails unless every media field is set.
    pub fn from_config(config: &MediaConfig) -> Result<Self, AtelierError> {
        let (Some(account_id), Some(access_key_id), Some(secret_access_key), Some(bucket), Some(public_base_url)) = (
            config.account_id.as_ref(),
            config.access_key_id.as_ref(),
            config.secret_access_key.as_ref(),
            config.bucket.as_ref(),
            config.public_base_url.as_ref(),
        ) else {
            return Err(AtelierError::Media(
                "media storage is not configured".into(),
            ));
        };

        Ok(Self {
            access_key_id: access_key_id.clone(),
            secret_access_key: secret_access_key.clone(),
            host: format!("{bucket}.{account_id}.r2.cloudflarestorage.com"),
            region: config.region.clone(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Presign a PUT of `content_type` to `key`, valid from `now`.
    pub fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        now: DateTime<Utc>,
    ) -> PresignedUpload {
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();
        let scope = format!("{date}/{}/s3/aws4_request", self.region);
        let credential = format!("{}/{scope}", self.access_key_id);

        let canonical_uri = format!("/{}", uri_encode(key, false));

        // Query parameters, already sorted by key.
        let query_pairs = [
            ("X-Amz-Algorithm", "AWS4-HMAC-SHA256".to_string()),
            ("X-Amz-Credential", credential),
            ("X-Amz-Date", amz_date.clone()),
            ("X-Amz-Expires", EXPIRES_SECS.to_string()),
            ("X-Amz-SignedHeaders", "content-type;host".to_string()),
        ];
        let canonical_query: String = query_pairs
            .iter()
            .map(|(k, v)| format!("{}={}", uri_encode(k, true), uri_encode(v, true)))
            .collect::<Vec<_>>()
            .join("&");

        let canonical_headers = format!("content-type:{content_type}\nhost:{}\n", self.host);
        let canonical_request = format!(
            "PUT\n{canonical_uri}\n{canonical_query}\n{canonical_headers}\ncontent-type;host\nUNSIGNED-PAYLOAD"
        );

        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{}",
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let date_key = hmac(format!("AWS4{}", self.secret_access_key).as_bytes(), &date);
        let region_key = hmac(&date_key, &self.region);
        let service_key = hmac(&region_key, "s3");
        let signing_key = hmac(&service_key, "aws4_request");
        let signature = hex::encode(hmac(&signing_key, &string_to_sign));

        let upload_url = format!(
            "https://{}{canonical_uri}?{canonical_query}&X-Amz-Signature={signature}",
            self.host
        );

        PresignedUpload {
            upload_url,
            public_url: self.public_url(key),
        }
    }

    /// Public URL the object is served from after upload.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }
}

fn hmac(key: &[u8], data: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// SigV4 percent-encoding: unreserved characters pass through, everything
/// else becomes uppercase `%XX`. Path encoding keeps `/` literal.
fn uri_encode(input: &str, encode_slash: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            b'/' if !encode_slash => out.push('/'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
