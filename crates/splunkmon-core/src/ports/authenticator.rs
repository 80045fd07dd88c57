//! 인증 포트.
//!
//! 구현: `splunkmon-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::session::SessionToken;

/// 자격증명 → 세션 토큰 교환
///
/// 실행 단위마다 한 번 호출된다. 실패하면 `CoreError::Auth`를 반환하고
/// 호출자는 키워드 검색을 시작하지 않는다.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<SessionToken, CoreError>;
}
