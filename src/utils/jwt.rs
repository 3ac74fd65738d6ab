use crate::config::AppConfig;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// 身份服务签发的令牌只接受 access 类型
pub const ACCESS_TOKEN_TYPE: &str = "access";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型，仅接受 "access"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok()
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 使用配置中的密钥验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::verify_access_token_with(token, &config.jwt.secret, config.jwt.leeway)
    }

    pub fn verify_access_token_with(
        token: &str,
        secret: &str,
        leeway: u64,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let mut validation = Validation::default();
        validation.leeway = leeway;

        let claims =
            decode::<Claims>(token, &decoding_key, &validation).map(|data| data.claims)?;
        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    // 签发令牌：仅供测试与运维脚本使用，正式令牌由身份服务签发
    pub fn issue_token_with(
        secret: &str,
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_access_token_round_trip() {
        let token =
            JwtUtils::issue_token_with(SECRET, 42, "teacher", "access", chrono::Duration::minutes(5))
                .unwrap();
        let claims = JwtUtils::verify_access_token_with(&token, SECRET, 0).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "teacher");
    }

    #[test]
    fn test_rejects_refresh_token_and_wrong_secret() {
        let refresh =
            JwtUtils::issue_token_with(SECRET, 1, "parent", "refresh", chrono::Duration::minutes(5))
                .unwrap();
        assert!(JwtUtils::verify_access_token_with(&refresh, SECRET, 0).is_err());

        let access =
            JwtUtils::issue_token_with(SECRET, 1, "parent", "access", chrono::Duration::minutes(5))
                .unwrap();
        assert!(JwtUtils::verify_access_token_with(&access, "other", 0).is_err());
    }

    #[test]
    fn test_expired_token_within_leeway() {
        let token =
            JwtUtils::issue_token_with(SECRET, 7, "admin", "access", chrono::Duration::seconds(-30))
                .unwrap();
        assert!(JwtUtils::verify_access_token_with(&token, SECRET, 0).is_err());
        assert!(JwtUtils::verify_access_token_with(&token, SECRET, 120).is_ok());
    }
}
