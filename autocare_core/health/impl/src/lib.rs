use std::{sync::Arc, time::Duration};

use autocare_core_health_contracts::{HealthFeatureService, HealthStatus};
use autocare_di::Build;
use autocare_email_contracts::EmailService;
use autocare_shared_contracts::time::TimeService;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Build)]
pub struct HealthFeatureServiceImpl<Time, Email> {
    time: Time,
    email: Email,
    config: HealthFeatureConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl<Time, Email> HealthFeatureService for HealthFeatureServiceImpl<Time, Email>
where
    Time: TimeService,
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }

        let email = self
            .email
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping smtp server: {err}"))
            .is_ok();

        let status = HealthStatus { email };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use autocare_email_contracts::MockEmailService;
    use autocare_shared_contracts::time::MockTimeService;
    use chrono::TimeZone;

    use super::*;

    fn sut(
        time: MockTimeService,
        email: MockEmailService,
    ) -> HealthFeatureServiceImpl<MockTimeService, MockEmailService> {
        HealthFeatureServiceImpl {
            time,
            email,
            config: HealthFeatureConfig {
                cache_ttl: Duration::from_secs(10),
            },
            state: Default::default(),
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let time = MockTimeService::new().with_now(at(0));
        let email = MockEmailService::new().with_ping(true);

        let sut = sut(time, email);

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { email: true });
    }

    #[tokio::test]
    async fn unhealthy() {
        // Arrange
        let time = MockTimeService::new().with_now(at(0));
        let email = MockEmailService::new().with_ping(false);

        let sut = sut(time, email);

        // Act
        let result = sut.get_status().await;

        // Assert
        assert!(!result.ok());
    }

    #[tokio::test]
    async fn cached_until_ttl_expires() {
        // Arrange
        let mut time = MockTimeService::new();
        let mut seq = mockall::Sequence::new();
        for secs in [0, 5, 11] {
            time.expect_now()
                .once()
                .in_sequence(&mut seq)
                .return_const(at(secs));
        }

        let mut email = MockEmailService::new();
        email
            .expect_ping()
            .times(2)
            .returning(|| Box::pin(std::future::ready(Ok(()))));

        let sut = sut(time, email);

        // Act
        let first = sut.get_status().await;
        let cached = sut.get_status().await;
        let refreshed = sut.get_status().await;

        // Assert
        assert!(first.ok() && cached.ok() && refreshed.ok());
    }
}
