//! gRPC service implementation for pooled short-code generation.
//!
//! This module defines [`CodeService`], the concrete implementation of the
//! [`CodeGenerator`] gRPC service defined in the protobuf specification.
//! Each request drains one code from the pool (or falls back to direct
//! generation when the pool is empty) and schedules an asynchronous refill
//! after answering, so the pool stays warm without ever blocking a caller.

use std::sync::Arc;

use shortcode_tonic_core::{
    Error,
    proto::{GetShortCodeRequest, GetShortCodeResponse, code_generator_server::CodeGenerator},
    shortcode::{CodePool, CodeStore, ThreadRandomCodes, UniquenessOracle},
};
use tonic::{Request, Response, Status};

/// gRPC service handing out unused short codes.
///
/// Holds the process-wide [`CodePool`]; cloning the service shares it.
/// Uniqueness is validated against snapshots read from `S`, the consuming
/// API's persistent store.
pub struct CodeService<S> {
    pool: Arc<CodePool<S>>,
}

impl<S> Clone for CodeService<S> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
        }
    }
}

impl<S: CodeStore> CodeService<S> {
    pub fn new(store: S, pool_size: usize) -> Self {
        let pool = CodePool::new(store, UniquenessOracle::new(ThreadRandomCodes), pool_size);
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Fills the pool once, before the listener starts serving.
    pub async fn warm_up(&self) {
        self.pool.refill().await;
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &CodePool<S> {
        &self.pool
    }
}

#[tonic::async_trait]
impl<S: CodeStore> CodeGenerator for CodeService<S> {
    /// Hands out one unused short code.
    ///
    /// No per-request retry: a failed take surfaces as an opaque error and
    /// the caller owns its retry and deadline policy. Whether the code came
    /// from the pool or the fallback path, a refill is scheduled after the
    /// response is on its way.
    #[tracing::instrument(skip_all)]
    async fn get_short_code(
        &self,
        _req: Request<GetShortCodeRequest>,
    ) -> Result<Response<GetShortCodeResponse>, Status> {
        let code = self
            .pool
            .take()
            .await
            .map_err(|e| Status::from(Error::from(e)))?;

        let pool = Arc::clone(&self.pool);
        tokio::spawn(async move { pool.refill().await });

        Ok(Response::new(GetShortCodeResponse {
            code: code.into_inner(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortcode_tonic_core::shortcode::{CODE_LENGTH, MemoryStore, ShortCode};
    use std::collections::HashSet;

    #[tokio::test]
    async fn warm_up_fills_the_pool() {
        let service = CodeService::new(MemoryStore::new(), 10);
        service.warm_up().await;
        assert_eq!(service.pool().len(), 10);
    }

    #[tokio::test]
    async fn serves_distinct_well_formed_codes() {
        let service = CodeService::new(MemoryStore::new(), 10);
        service.warm_up().await;

        let mut seen = HashSet::new();
        for _ in 0..12 {
            let resp = service
                .get_short_code(Request::new(GetShortCodeRequest {}))
                .await
                .unwrap();
            let code = resp.into_inner().code;
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(seen.insert(code), "duplicate code over the rpc boundary");
        }
    }

    #[tokio::test]
    async fn codes_avoid_the_persisted_set() {
        let store = Arc::new(MemoryStore::new());
        for i in 0..50 {
            store.record(ShortCode::from(format!("used{i:03}")));
        }
        let service = CodeService::new(Arc::clone(&store), 4);
        service.warm_up().await;

        for _ in 0..8 {
            let resp = service
                .get_short_code(Request::new(GetShortCodeRequest {}))
                .await
                .unwrap();
            let code = ShortCode::from(resp.into_inner().code);
            let snapshot = store.snapshot().await.unwrap();
            assert!(!snapshot.contains(&code));
        }
    }
}
