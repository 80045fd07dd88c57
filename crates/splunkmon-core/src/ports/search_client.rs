//! 검색 클라이언트 포트.
//!
//! 구현: `splunkmon-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::session::{RawResponse, SessionToken};
use crate::query::SearchQuery;

/// 인증된 검색 요청 실행
///
/// 호출당 export 엔드포인트 POST 1회. 응답은 소유된 [`RawResponse`]로 읽어 들인 뒤
/// 반환하므로 연결 자원은 모든 경로에서 해제된다. 상태 코드 해석은 호출자 몫이다.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(
        &self,
        token: &SessionToken,
        query: &SearchQuery,
    ) -> Result<RawResponse, CoreError>;
}
