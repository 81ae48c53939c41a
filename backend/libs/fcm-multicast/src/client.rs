use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::FcmError;
use crate::models::*;

const OAUTH_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Firebase Cloud Messaging client
///
/// Owns the service-account credentials, an OAuth2 access-token cache and
/// the HTTP client. One instance is shared across all requests.
pub struct FcmClient {
    pub project_id: String,
    credentials: Arc<ServiceAccountKey>,
    token_cache: Arc<Mutex<Option<TokenCache>>>,
    http_client: reqwest::Client,
}

impl FcmClient {
    pub fn new(credentials: ServiceAccountKey) -> Self {
        Self {
            project_id: credentials.project_id.clone(),
            credentials: Arc::new(credentials),
            token_cache: Arc::new(Mutex::new(None)),
            http_client: reqwest::Client::new(),
        }
    }

    /// Fan one notification out to every token in the list.
    ///
    /// Delivery is best-effort per token: a rejected token is recorded in
    /// the receipt and does not abort the remaining sends. Only a failure
    /// to obtain an access token fails the whole call.
    pub async fn send_multicast(
        &self,
        tokens: &[String],
        notification: &FcmNotification,
        data: &HashMap<String, String>,
        priority: MessagePriority,
    ) -> Result<MulticastReceipt, FcmError> {
        let access_token = self.access_token().await?;

        let mut outcomes = Vec::with_capacity(tokens.len());
        let mut success_count = 0;
        let mut failure_count = 0;

        for token in tokens {
            match self
                .send_one(&access_token, token, notification, data, priority)
                .await
            {
                Ok(message_id) => {
                    success_count += 1;
                    outcomes.push(SendOutcome {
                        token: token.clone(),
                        message_id,
                        success: true,
                        error: None,
                    });
                }
                Err(e) => {
                    warn!("delivery to one device failed: {}", e);
                    failure_count += 1;
                    outcomes.push(SendOutcome {
                        token: token.clone(),
                        message_id: Uuid::new_v4().to_string(),
                        success: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        debug!(
            "multicast complete: {} delivered, {} failed",
            success_count, failure_count
        );

        Ok(MulticastReceipt {
            success_count,
            failure_count,
            outcomes,
        })
    }

    async fn send_one(
        &self,
        access_token: &str,
        device_token: &str,
        notification: &FcmNotification,
        data: &HashMap<String, String>,
        priority: MessagePriority,
    ) -> Result<String, FcmError> {
        let message = FcmMessage {
            message: FcmMessageContent {
                token: device_token.to_string(),
                notification: notification.clone(),
                data: if data.is_empty() {
                    None
                } else {
                    Some(data.clone())
                },
                android: Some(AndroidConfig {
                    priority: priority.as_str().to_string(),
                }),
            },
        };

        let url = format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            self.project_id
        );

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .header("Content-Type", "application/json")
            .json(&message)
            .send()
            .await
            .map_err(|e| FcmError::SendRequest(e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let body: FcmApiResponse = response
                    .json()
                    .await
                    .map_err(|e| FcmError::ResponseParse(e.to_string()))?;
                Ok(body.name.unwrap_or_else(|| Uuid::new_v4().to_string()))
            }
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unknown error".to_string());
                Err(FcmError::SendRequest(format!("{} - {}", status, error_text)))
            }
        }
    }

    /// Get an OAuth2 access token for the FCM API, reusing the cached one
    /// while it has at least 60 seconds of validity left.
    async fn access_token(&self) -> Result<String, FcmError> {
        {
            let cache = self.token_cache.lock().expect("token cache lock poisoned");
            if let Some(cached) = cache.as_ref() {
                if cached.expires_at > Utc::now().timestamp() + 60 {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let now = Utc::now();
        let claims = OauthClaims {
            iss: self.credentials.client_email.clone(),
            sub: self.credentials.client_email.clone(),
            scope: OAUTH_SCOPE.to_string(),
            aud: self.credentials.token_uri.clone(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .map_err(|e| FcmError::KeyParse(e.to_string()))?;
        let assertion = encode(&Header::new(jsonwebtoken::Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| FcmError::JwtEncode(e.to_string()))?;

        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", &assertion),
        ];

        let response = self
            .http_client
            .post(&self.credentials.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| FcmError::TokenRequest(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FcmError::TokenRejected(response.status().to_string()));
        }

        let token_response: GoogleTokenResponse = response
            .json()
            .await
            .map_err(|e| FcmError::TokenParse(e.to_string()))?;

        let expires_at = Utc::now().timestamp() + token_response.expires_in;
        {
            let mut cache = self.token_cache.lock().expect("token cache lock poisoned");
            *cache = Some(TokenCache {
                access_token: token_response.access_token.clone(),
                expires_at,
            });
        }

        Ok(token_response.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> ServiceAccountKey {
        ServiceAccountKey {
            project_id: "test-project".to_string(),
            private_key_id: "key-id".to_string(),
            private_key: "private-key".to_string(),
            client_email: "test@test.iam.gserviceaccount.com".to_string(),
            client_id: "123456".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        }
    }

    #[test]
    fn test_client_takes_project_from_credentials() {
        let client = FcmClient::new(test_credentials());
        assert_eq!(client.project_id, "test-project");
    }

    #[test]
    fn test_priority_as_str() {
        assert_eq!(MessagePriority::High.as_str(), "high");
        assert_eq!(MessagePriority::Normal.as_str(), "normal");
    }

    #[test]
    fn test_receipt_counts() {
        let receipt = MulticastReceipt {
            success_count: 3,
            failure_count: 1,
            outcomes: vec![],
        };
        assert_eq!(receipt.success_count, 3);
        assert_eq!(receipt.failure_count, 1);
    }

    #[test]
    fn test_message_serialization_omits_empty_sections() {
        let message = FcmMessage {
            message: FcmMessageContent {
                token: "tokA".to_string(),
                notification: FcmNotification {
                    title: "Hi".to_string(),
                    body: "there".to_string(),
                },
                data: None,
                android: Some(AndroidConfig {
                    priority: "high".to_string(),
                }),
            },
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["message"]["token"], "tokA");
        assert_eq!(json["message"]["android"]["priority"], "high");
        assert!(json["message"].get("data").is_none());
    }

    #[test]
    fn test_credentials_file_missing() {
        let err = ServiceAccountKey::from_file("/nonexistent/credentials.json").unwrap_err();
        assert!(matches!(err, FcmError::Credentials(_)));
    }
}
